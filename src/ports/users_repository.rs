use async_trait::async_trait;
use thiserror::Error;

use crate::entities;

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("{0} must be unique")]
    Duplicate(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Ids with no matching user are simply absent from the result.
    async fn find_all_by_ids(&self, ids: &[entities::UserId])
        -> anyhow::Result<Vec<entities::User>>;

    async fn find_all(&self) -> anyhow::Result<Vec<entities::User>>;

    /// `login` matches either the username or the email.
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<entities::User>>;

    async fn create(&self, new_user: entities::NewUser)
        -> Result<entities::User, CreateUserError>;

    /// Removes the user together with their messages.
    async fn delete(&self, id: entities::UserId) -> anyhow::Result<bool>;
}
