use crate::cached_loader::CachedLoader;
use crate::entities;
use crate::loaders::{MessageByIdLoader, MessagesByUserLoader, UserByIdLoader};
use crate::ports;

/// Loaders owned by one execution context. Never shared between operations.
pub struct Loaders {
    pub user_by_id_loader: CachedLoader<entities::UserId, Option<entities::User>, UserByIdLoader>,
    pub message_by_id_loader:
        CachedLoader<entities::MessageId, Option<entities::Message>, MessageByIdLoader>,
    pub messages_by_user_loader:
        CachedLoader<entities::UserId, Vec<entities::Message>, MessagesByUserLoader>,
}

impl Loaders {
    pub fn new(store: &ports::Store) -> Self {
        Self {
            user_by_id_loader: CachedLoader::new(UserByIdLoader {
                users_repository: store.users.clone(),
            }),
            message_by_id_loader: CachedLoader::new(MessageByIdLoader {
                messages_repository: store.messages.clone(),
            }),
            messages_by_user_loader: CachedLoader::new(MessagesByUserLoader {
                messages_repository: store.messages.clone(),
            }),
        }
    }
}
