use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{entities, ports};

/// Delegates to another repository and records every bulk fetch.
#[derive(Clone)]
pub struct RecordingUsersRepository<A> {
    pub inner: A,
    pub bulk_calls: Arc<Mutex<Vec<Vec<entities::UserId>>>>,
}

impl<A> RecordingUsersRepository<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            bulk_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn bulk_calls(&self) -> Vec<Vec<entities::UserId>> {
        self.bulk_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<A: ports::UsersRepository> ports::UsersRepository for RecordingUsersRepository<A> {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::User>> {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();
        self.bulk_calls.lock().unwrap().push(sorted);
        self.inner.find_all_by_ids(ids).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<entities::User>> {
        self.inner.find_all().await
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<entities::User>> {
        self.inner.find_by_login(login).await
    }

    async fn create(
        &self,
        new_user: entities::NewUser,
    ) -> Result<entities::User, ports::CreateUserError> {
        self.inner.create(new_user).await
    }

    async fn delete(&self, id: entities::UserId) -> anyhow::Result<bool> {
        self.inner.delete(id).await
    }
}

/// Every call fails as if the database were unreachable.
#[derive(Clone, Copy, Debug)]
pub struct FailingUsersRepository;

#[async_trait]
impl ports::UsersRepository for FailingUsersRepository {
    async fn find_all_by_ids(
        &self,
        _ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::User>> {
        Err(anyhow!("connection refused"))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<entities::User>> {
        Err(anyhow!("connection refused"))
    }

    async fn find_by_login(&self, _login: &str) -> anyhow::Result<Option<entities::User>> {
        Err(anyhow!("connection refused"))
    }

    async fn create(
        &self,
        _new_user: entities::NewUser,
    ) -> Result<entities::User, ports::CreateUserError> {
        Err(anyhow!("connection refused").into())
    }

    async fn delete(&self, _id: entities::UserId) -> anyhow::Result<bool> {
        Err(anyhow!("connection refused"))
    }
}
