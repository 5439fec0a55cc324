use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{entities, ports};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<entities::UserId, entities::User>,
    messages: BTreeMap<entities::MessageId, entities::Message>,
    last_user_id: i64,
    last_message_id: i64,
}

/// Process-local store. Used by tests and by `STORE_KIND=MEMORY`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_store(self) -> ports::Store {
        ports::Store::new(Arc::new(self.clone()), Arc::new(self))
    }

    /// Overwrites a user in place, bypassing uniqueness checks.
    pub async fn put_user(&self, user: entities::User) {
        let mut state = self.state.write().await;
        state.last_user_id = state.last_user_id.max(i64::from(user.id));
        state.users.insert(user.id, user);
    }
}

#[async_trait]
impl ports::UsersRepository for InMemoryStore {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::User>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<entities::User>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<entities::User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == login || user.email == login)
            .cloned())
    }

    async fn create(
        &self,
        new_user: entities::NewUser,
    ) -> Result<entities::User, ports::CreateUserError> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(ports::CreateUserError::Duplicate("username"));
        }
        if state.users.values().any(|user| user.email == new_user.email) {
            return Err(ports::CreateUserError::Duplicate("email"));
        }

        state.last_user_id += 1;
        let user = entities::User {
            id: entities::UserId::from(state.last_user_id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: entities::UserId) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.messages.retain(|_, message| message.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ports::MessagesRepository for InMemoryStore {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::MessageId],
    ) -> anyhow::Result<Vec<entities::Message>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.messages.get(id).cloned())
            .collect())
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::Message>> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .values()
            .filter(|message| user_ids.contains(&message.user_id))
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        before: Option<DateTime<Utc>>,
        limit: u32,
    ) -> anyhow::Result<Vec<entities::Message>> {
        let state = self.state.read().await;
        let mut messages = state
            .messages
            .values()
            .filter(|message| before.map_or(true, |before| message.created_at < before))
            .cloned()
            .collect::<Vec<_>>();
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn create(
        &self,
        user_id: entities::UserId,
        text: String,
        now: DateTime<Utc>,
    ) -> anyhow::Result<entities::Message> {
        let mut state = self.state.write().await;
        state.last_message_id += 1;
        let message = entities::Message {
            id: entities::MessageId::from(state.last_message_id),
            text,
            user_id,
            created_at: now,
        };
        state.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn delete(&self, id: entities::MessageId) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.messages.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn new_user(username: &str, email: &str) -> entities::NewUser {
        entities::NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_users_repository() {
        use crate::ports::UsersRepository;

        let store = InMemoryStore::new();

        let alice = store
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = store.create(new_user("bob", "bob@example.com")).await.unwrap();
        assert_eq!(i64::from(alice.id), 1);
        assert_eq!(i64::from(bob.id), 2);

        let found = store
            .find_all_by_ids(&[bob.id, entities::UserId::from(42)])
            .await
            .unwrap();
        assert_eq!(found, vec![bob.clone()]);

        assert_eq!(
            store.find_by_login("alice@example.com").await.unwrap(),
            Some(alice.clone())
        );
        assert_eq!(store.find_by_login("bob").await.unwrap(), Some(bob.clone()));
        assert_eq!(store.find_by_login("carol").await.unwrap(), None);

        assert!(matches!(
            store.create(new_user("alice", "other@example.com")).await,
            Err(ports::CreateUserError::Duplicate("username"))
        ));
        assert!(matches!(
            store.create(new_user("carol", "bob@example.com")).await,
            Err(ports::CreateUserError::Duplicate("email"))
        ));

        assert!(store.delete(alice.id).await.unwrap());
        assert!(!store.delete(alice.id).await.unwrap());
        assert_eq!(store.find_all().await.unwrap(), vec![bob]);
    }

    #[tokio::test]
    async fn test_messages_repository() {
        use crate::ports::{MessagesRepository, UsersRepository};

        let store = InMemoryStore::new();
        let user = UsersRepository::create(&store, new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        let now = Utc::now();

        let first = MessagesRepository::create(&store, user.id, "first".to_string(), now)
            .await
            .unwrap();
        let second = MessagesRepository::create(
            &store,
            user.id,
            "second".to_string(),
            now + Duration::seconds(1),
        )
        .await
        .unwrap();

        let listed = store.list(None, 10).await.unwrap();
        assert_eq!(listed, vec![second.clone(), first.clone()]);

        let older = store.list(Some(second.created_at), 10).await.unwrap();
        assert_eq!(older, vec![first.clone()]);

        let limited = store.list(None, 1).await.unwrap();
        assert_eq!(limited, vec![second.clone()]);

        let by_user = store.find_by_user_ids(&[user.id]).await.unwrap();
        assert_eq!(by_user.len(), 2);

        UsersRepository::delete(&store, user.id).await.unwrap();
        assert!(store.list(None, 10).await.unwrap().is_empty());
    }
}
