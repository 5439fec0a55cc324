mod message_loaders;
mod user_loaders;

pub use message_loaders::*;
pub use user_loaders::*;
