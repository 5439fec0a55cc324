use anyhow::{anyhow, Context};
use chrono::Duration;
use std::env;

#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgres { database_url: String },
    Memory,
}

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub ttl: Duration,
}

// secret はログに出さない
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub store: StoreConfig,
    pub token: TokenConfig,
    pub seed_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<AppConfig> {
        let port = var("PORT")
            .map(|x| x.parse::<u16>())
            .unwrap_or(Ok(8000))
            .context("PORT")?;
        let host = var("HOST").unwrap_or_else(|| "localhost".to_owned());
        let store = match var("STORE_KIND").as_deref().unwrap_or("POSTGRES") {
            "POSTGRES" => {
                let database_url = var("DATABASE_URL")
                    .ok_or_else(|| anyhow!("not set"))
                    .context("DATABASE_URL")?;
                StoreConfig::Postgres { database_url }
            }
            "MEMORY" => StoreConfig::Memory,
            _ => Err(anyhow!("Invalid store kind"))?,
        };
        let secret = var("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| anyhow!("not set"))
            .context("JWT_SECRET")?;
        let ttl = var("TOKEN_TTL_SECONDS")
            .map(|x| x.parse::<i64>())
            .unwrap_or(Ok(1800))
            .context("TOKEN_TTL_SECONDS")?;
        if ttl <= 0 {
            return Err(anyhow!("must be positive")).context("TOKEN_TTL_SECONDS");
        }
        let seed_data = var("SEED_DATA").map(|v| v == "TRUE").unwrap_or(false);

        Ok(AppConfig {
            port,
            host,
            store,
            token: TokenConfig {
                secret: secret.into_bytes(),
                ttl: Duration::seconds(ttl),
            },
            seed_data,
        })
    }
}
