use std::fmt;
use std::sync::Arc;

use super::{MessagesRepository, UsersRepository};

/// Process-wide handle on the backend. Cloning shares the same repositories.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UsersRepository>,
    pub messages: Arc<dyn MessagesRepository>,
}

impl Store {
    pub fn new(users: Arc<dyn UsersRepository>, messages: Arc<dyn MessagesRepository>) -> Self {
        Self { users, messages }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
