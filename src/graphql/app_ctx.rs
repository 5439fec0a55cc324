use std::sync::Arc;

use actix_web::http::header::HeaderMap;
use chrono::{DateTime, Utc};

use crate::access_error::AccessError;
use crate::token::TokenService;
use crate::{entities, ports};

pub use super::loaders::Loaders;

pub const TOKEN_HEADER: &str = "x-token";

/// What an execution context is built from.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    /// A query or mutation carrying its own headers.
    Request { headers: &'a HeaderMap },
    /// A long-lived subscription channel; no per-operation headers.
    /// The schema has no subscription fields and no websocket route is
    /// mounted, so only tests build this today.
    Subscription,
}

/// Per-operation execution context handed to every resolver.
pub struct AppCtx {
    pub store: ports::Store,
    pub identity: Option<entities::UserId>,
    pub now: DateTime<Utc>,
    pub loaders: Loaders,
    pub token_service: Option<Arc<TokenService>>,
}

impl juniper::Context for AppCtx {}

impl AppCtx {
    pub fn identity(&self) -> Option<entities::UserId> {
        self.identity
    }

    pub async fn load_user(
        &self,
        id: entities::UserId,
    ) -> Result<Option<entities::User>, AccessError> {
        Ok(self.loaders.user_by_id_loader.load(id).await?)
    }

    pub fn require_authenticated(&self) -> Result<entities::UserId, AccessError> {
        super::guards::require_authenticated(self)
    }

    pub async fn require_role(&self, role: entities::Role) -> Result<(), AccessError> {
        super::guards::require_role(self, role).await
    }
}

/// Holds the process-wide, read-only dependencies and turns each inbound
/// operation into a fresh [`AppCtx`].
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    store: ports::Store,
    token_service: Arc<TokenService>,
}

impl ContextBuilder {
    pub fn new(store: ports::Store, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            token_service,
        }
    }

    pub fn build(&self, operation: Operation<'_>, now: DateTime<Utc>) -> Result<AppCtx, AccessError> {
        match operation {
            Operation::Subscription => Ok(AppCtx {
                store: self.store.clone(),
                identity: None,
                now,
                loaders: Loaders::new(&self.store),
                token_service: None,
            }),
            Operation::Request { headers } => {
                let identity = match extract_token(headers)? {
                    Some(token) => Some(self.token_service.verify(token, now).map_err(|e| {
                        tracing::warn!("rejected session token: {}", e);
                        AccessError::from(e)
                    })?),
                    None => None,
                };
                tracing::debug!("build request context: identity={:?}", identity);

                Ok(AppCtx {
                    store: self.store.clone(),
                    identity,
                    now,
                    loaders: Loaders::new(&self.store),
                    token_service: Some(self.token_service.clone()),
                })
            }
        }
    }
}

// 空文字のトークンは未ログイン扱い
fn extract_token(headers: &HeaderMap) -> Result<Option<&str>, AccessError> {
    let Some(value) = headers.get(TOKEN_HEADER) else {
        return Ok(None);
    };
    let token = value
        .to_str()
        .map_err(|_| AccessError::ExpiredOrInvalidSession)?;
    Ok(Some(token).filter(|token| !token.is_empty()))
}
