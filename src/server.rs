use std::sync::Arc;

use actix_web::{error, web, HttpRequest, HttpResponse};
use chrono::Utc;
use juniper::http::graphiql::graphiql_source;
use juniper::http::GraphQLRequest;

use crate::graphql::{rejected_operation, ContextBuilder, Operation, Schema};

async fn graphiql() -> HttpResponse {
    let html = graphiql_source("/graphql", None);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

async fn graphql(
    st: web::Data<Arc<Schema>>,
    builder: web::Data<ContextBuilder>,
    req: HttpRequest,
    data: web::Json<GraphQLRequest>,
) -> Result<HttpResponse, error::Error> {
    let ctx = match builder.build(
        Operation::Request {
            headers: req.headers(),
        },
        Utc::now(),
    ) {
        Ok(ctx) => ctx,
        Err(err) => return Ok(HttpResponse::Ok().json(rejected_operation(&err))),
    };

    let res = data.execute(&st, &ctx).await;
    let json = serde_json::to_string(&res)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(json))
}

/// Registers `/graphql` and `/graphiql`. The app must carry
/// `web::Data<Arc<Schema>>` and `web::Data<ContextBuilder>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/graphql").route(web::post().to(graphql)))
        .service(web::resource("/graphiql").route(web::get().to(graphiql)));
}
