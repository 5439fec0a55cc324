use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities;

#[async_trait]
pub trait MessagesRepository: Send + Sync {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::MessageId],
    ) -> anyhow::Result<Vec<entities::Message>>;

    async fn find_by_user_ids(
        &self,
        user_ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::Message>>;

    /// Newest first, strictly older than `before` when given.
    async fn list(
        &self,
        before: Option<DateTime<Utc>>,
        limit: u32,
    ) -> anyhow::Result<Vec<entities::Message>>;

    async fn create(
        &self,
        user_id: entities::UserId,
        text: String,
        now: DateTime<Utc>,
    ) -> anyhow::Result<entities::Message>;

    async fn delete(&self, id: entities::MessageId) -> anyhow::Result<bool>;
}
