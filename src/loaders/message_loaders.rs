use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use dataloader::BatchFn;

use crate::cached_loader::distribute;
use crate::entities;
use crate::ports;
use crate::ShareableError;

#[derive(Clone)]
pub struct MessageByIdLoader {
    pub messages_repository: Arc<dyn ports::MessagesRepository>,
}

#[async_trait]
impl BatchFn<entities::MessageId, Result<Option<entities::Message>, ShareableError>>
    for MessageByIdLoader
{
    async fn load(
        &mut self,
        keys: &[entities::MessageId],
    ) -> HashMap<entities::MessageId, Result<Option<entities::Message>, ShareableError>>
    where
        entities::MessageId: 'async_trait,
        Result<Option<entities::Message>, ShareableError>: 'async_trait,
    {
        let mut ids = keys.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let message_map = self
            .messages_repository
            .find_all_by_ids(&ids)
            .await
            .context("fetch messages")
            .map(|messages| {
                messages
                    .into_iter()
                    .map(|message| (message.id, Some(message)))
                    .collect::<HashMap<_, _>>()
            })
            .map_err(ShareableError::from);

        distribute(keys, message_map, || None)
    }
}

#[derive(Clone)]
pub struct MessagesByUserLoader {
    pub messages_repository: Arc<dyn ports::MessagesRepository>,
}

#[async_trait]
impl BatchFn<entities::UserId, Result<Vec<entities::Message>, ShareableError>>
    for MessagesByUserLoader
{
    async fn load(
        &mut self,
        keys: &[entities::UserId],
    ) -> HashMap<entities::UserId, Result<Vec<entities::Message>, ShareableError>>
    where
        entities::UserId: 'async_trait,
        Result<Vec<entities::Message>, ShareableError>: 'async_trait,
    {
        let mut user_ids = keys.to_vec();
        user_ids.sort_unstable();
        user_ids.dedup();

        let messages_map = self
            .messages_repository
            .find_by_user_ids(&user_ids)
            .await
            .context("fetch messages by user")
            .map(|messages| {
                messages
                    .into_iter()
                    .fold(HashMap::new(), |mut map, message| {
                        map.entry(message.user_id)
                            .or_insert_with(Vec::new)
                            .push(message);
                        map
                    })
            })
            .map_err(ShareableError::from);

        distribute(keys, messages_map, Vec::new)
    }
}
