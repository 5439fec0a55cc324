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
pub struct UserByIdLoader {
    pub users_repository: Arc<dyn ports::UsersRepository>,
}

#[async_trait]
impl BatchFn<entities::UserId, Result<Option<entities::User>, ShareableError>>
    for UserByIdLoader
{
    async fn load(
        &mut self,
        keys: &[entities::UserId],
    ) -> HashMap<entities::UserId, Result<Option<entities::User>, ShareableError>>
    where
        entities::UserId: 'async_trait,
        Result<Option<entities::User>, ShareableError>: 'async_trait,
    {
        let mut ids = keys.to_vec();
        ids.sort_unstable();
        ids.dedup();

        tracing::debug!("batch load users: {:?}", ids);
        let user_map = self
            .users_repository
            .find_all_by_ids(&ids)
            .await
            .context("fetch users")
            .map(|users| {
                users
                    .into_iter()
                    .map(|user| (user.id, Some(user)))
                    .collect::<HashMap<_, _>>()
            })
            .map_err(ShareableError::from);

        distribute(keys, user_map, || None)
    }
}
