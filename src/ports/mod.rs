mod messages_repository;
mod store;
mod users_repository;

pub use messages_repository::*;
pub use store::*;
pub use users_repository::*;
