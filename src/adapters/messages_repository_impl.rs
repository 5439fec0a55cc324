use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct MessageModel {
    id: i64,
    text: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<MessageModel> for entities::Message {
    fn from(model: MessageModel) -> Self {
        entities::Message {
            id: entities::MessageId::from(model.id),
            text: model.text,
            user_id: entities::UserId::from(model.user_id),
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessagesRepositoryImpl {
    pool: PgPool,
}

impl MessagesRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ports::MessagesRepository for MessagesRepositoryImpl {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::MessageId],
    ) -> anyhow::Result<Vec<entities::Message>> {
        let ids = ids.iter().map(|id| i64::from(*id)).collect::<Vec<_>>();

        let models = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT
                id,
                text,
                user_id,
                created_at
            FROM
                messages
            WHERE
                id = Any($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("fetch messages")?;

        Ok(models.into_iter().map(entities::Message::from).collect())
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::Message>> {
        let user_ids = user_ids.iter().map(|id| i64::from(*id)).collect::<Vec<_>>();

        let models = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT
                id,
                text,
                user_id,
                created_at
            FROM
                messages
            WHERE
                user_id = Any($1)
            ORDER BY
                created_at ASC,
                id ASC
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .context("fetch messages by user")?;

        Ok(models.into_iter().map(entities::Message::from).collect())
    }

    async fn list(
        &self,
        before: Option<DateTime<Utc>>,
        limit: u32,
    ) -> anyhow::Result<Vec<entities::Message>> {
        let models = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT
                id,
                text,
                user_id,
                created_at
            FROM
                messages
            WHERE
                ($1::TIMESTAMPTZ IS NULL OR created_at < $1)
            ORDER BY
                created_at DESC,
                id DESC
            LIMIT $2
            "#,
        )
        .bind(before)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("fetch messages")?;

        Ok(models.into_iter().map(entities::Message::from).collect())
    }

    async fn create(
        &self,
        user_id: entities::UserId,
        text: String,
        now: DateTime<Utc>,
    ) -> anyhow::Result<entities::Message> {
        let model = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT
                INTO messages (
                    text,
                    user_id,
                    created_at
                ) VALUES ($1, $2, $3)
            RETURNING
                id,
                text,
                user_id,
                created_at
            "#,
        )
        .bind(text)
        .bind(i64::from(user_id))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("insert message")?;

        Ok(entities::Message::from(model))
    }

    async fn delete(&self, id: entities::MessageId) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
                WHERE
                    id = $1
            "#,
        )
        .bind(i64::from(id))
        .execute(&self.pool)
        .await
        .context("delete message")?;

        Ok(result.rows_affected() > 0)
    }
}
