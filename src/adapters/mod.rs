mod in_memory_store;
mod messages_repository_impl;
mod users_repository_impl;

use std::sync::Arc;

use sqlx::PgPool;

pub use in_memory_store::InMemoryStore;
pub use messages_repository_impl::MessagesRepositoryImpl;
pub use users_repository_impl::UsersRepositoryImpl;

use crate::ports;

pub fn postgres_store(pool: PgPool) -> ports::Store {
    ports::Store::new(
        Arc::new(UsersRepositoryImpl::new(pool.clone())),
        Arc::new(MessagesRepositoryImpl::new(pool)),
    )
}
