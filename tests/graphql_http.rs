use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use message_board_backend::adapters::InMemoryStore;
use message_board_backend::entities::UserId;
use message_board_backend::graphql::{create_schema, ContextBuilder, TOKEN_HEADER};
use message_board_backend::token::TokenService;
use message_board_backend::{seed, server};

async fn seeded() -> (ContextBuilder, Arc<TokenService>) {
    let store = InMemoryStore::new().into_store();
    seed::seed_users_with_messages(&store, Utc::now() - Duration::hours(1))
        .await
        .unwrap();
    let tokens = Arc::new(TokenService::new(b"integration", Duration::minutes(30)));
    (ContextBuilder::new(store, tokens.clone()), tokens)
}

macro_rules! app {
    ($builder:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(create_schema())))
                .app_data(web::Data::new($builder))
                .configure(server::configure),
        )
        .await
    };
}

fn query(query: &str) -> Value {
    json!({ "query": query })
}

#[actix_web::test]
async fn test_sign_in_then_me() {
    let (builder, _) = seeded().await;
    let app = app!(builder);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(query(
            r#"mutation { signIn(login: "Deveritas", password: "wasddoom") { token } }"#,
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["signIn"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header((TOKEN_HEADER, token))
        .set_json(query("{ me { username role messages { text } } }"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({
            "data": {
                "me": {
                    "username": "Deveritas",
                    "role": "ADMIN",
                    "messages": [{ "text": "Published the Road to learn React" }],
                }
            }
        })
    );
}

#[actix_web::test]
async fn test_anonymous_request() {
    let (builder, _) = seeded().await;
    let app = app!(builder);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(query("{ me { username } users { username } }"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["me"], Value::Null);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_invalid_token_rejects_whole_operation() {
    let (builder, tokens) = seeded().await;
    let app = app!(builder);
    let expired = tokens
        .issue(UserId::from(1), Utc::now() - Duration::hours(1))
        .unwrap();

    for token in [expired.as_str(), "not-a-token"] {
        let req = test::TestRequest::post()
            .uri("/graphql")
            .insert_header((TOKEN_HEADER, token))
            .set_json(query("{ users { username } }"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({
                "data": null,
                "errors": [{
                    "message": "Your session expired. Sign in again.",
                    "extensions": { "code": "EXPIRED_OR_INVALID_SESSION" },
                }],
            })
        );
    }
}

#[actix_web::test]
async fn test_delete_user_as_member_is_denied() {
    let (builder, _) = seeded().await;
    let app = app!(builder);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(query(
            r#"mutation { signIn(login: "hello@david.com", password: "ddavids") { token } }"#,
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["signIn"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header((TOKEN_HEADER, token))
        .set_json(query(r#"mutation { deleteUser(id: "1") }"#))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["errors"][0]["message"], "Not authorized as admin.");
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        "NOT_AUTHORIZED_FOR_ROLE"
    );
}

#[actix_web::test]
async fn test_graphiql_page() {
    let (builder, _) = seeded().await;
    let app = app!(builder);

    let req = test::TestRequest::get().uri("/graphiql").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
