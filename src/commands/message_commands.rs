use anyhow::Context;
use chrono::{DateTime, Utc};

use super::UserInputError;
use crate::{entities, ports};

pub async fn create_message(
    store: &ports::Store,
    now: DateTime<Utc>,
    user_id: entities::UserId,
    text: String,
) -> anyhow::Result<entities::Message> {
    if text.trim().is_empty() {
        return Err(UserInputError::Empty("text").into());
    }

    store
        .messages
        .create(user_id, text, now)
        .await
        .context("create message")
}

pub async fn delete_message(
    store: &ports::Store,
    id: entities::MessageId,
) -> anyhow::Result<bool> {
    store.messages.delete(id).await.context("delete message")
}
