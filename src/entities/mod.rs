mod limit;
mod message;
mod role;
mod user;
mod user_id;

pub use limit::{CreateLimitError, Limit, MAX_LIMIT};
pub use message::{Message, MessageId};
pub use role::{Role, RoleFromStrError};
pub use user::{NewUser, User};
pub use user_id::UserId;
