use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message_board_backend::adapters::{self, InMemoryStore};
use message_board_backend::app_config::{AppConfig, StoreConfig};
use message_board_backend::graphql::{create_schema, ContextBuilder};
use message_board_backend::token::TokenService;
use message_board_backend::{ports, seed, server};

fn other_error(err: impl Into<anyhow::Error>) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err.into()))
}

async fn open_store(config: &StoreConfig) -> anyhow::Result<ports::Store> {
    match config {
        StoreConfig::Postgres { database_url } => {
            let pool = PgPoolOptions::new().connect(database_url).await?;
            sqlx::migrate!().run(&pool).await?;
            tracing::info!("connected to postgres");
            Ok(adapters::postgres_store(pool))
        }
        StoreConfig::Memory => {
            tracing::info!("using in-memory store");
            Ok(InMemoryStore::new().into_store())
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().map_err(other_error)?;
    tracing::debug!("config: {:?}", config);

    let store = open_store(&config.store).await.map_err(other_error)?;
    if config.seed_data {
        seed::seed_users_with_messages(&store, Utc::now())
            .await
            .map_err(other_error)?;
    }

    let token_service = Arc::new(TokenService::new(&config.token.secret, config.token.ttl));
    let builder = web::Data::new(ContextBuilder::new(store, token_service));
    let schema = Arc::new(create_schema());

    let host = config.host.clone();
    let port = config.port;
    tracing::info!("listening on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(schema.clone()))
            .app_data(builder.clone())
            .wrap(middleware::Logger::default())
            .configure(server::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
