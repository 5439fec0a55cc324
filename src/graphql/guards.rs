//! Authorization guards consulted by resolvers before privileged actions.
//!
//! Guards do no I/O of their own; anything they need to know about the
//! caller comes through the context's loaders, so it shares the per-request
//! cache and batching with the rest of the operation.

use super::AppCtx;
use crate::access_error::AccessError;
use crate::entities;

pub fn require_authenticated(ctx: &AppCtx) -> Result<entities::UserId, AccessError> {
    ctx.identity.ok_or(AccessError::NotAuthenticated)
}

pub async fn require_role(ctx: &AppCtx, role: entities::Role) -> Result<(), AccessError> {
    let user_id = require_authenticated(ctx)?;
    let user = ctx.loaders.user_by_id_loader.load(user_id).await?;

    match user {
        Some(user) if user.has_role(role) => Ok(()),
        _ => Err(AccessError::NotAuthorizedForRole(role)),
    }
}

/// `Ok(None)` when the message does not exist.
pub async fn require_message_owner(
    ctx: &AppCtx,
    message_id: entities::MessageId,
) -> Result<Option<entities::Message>, AccessError> {
    let user_id = require_authenticated(ctx)?;
    let message = ctx.loaders.message_by_id_loader.load(message_id).await?;

    match message {
        Some(message) if message.user_id != user_id => Err(AccessError::NotMessageOwner),
        message => Ok(message),
    }
}
