use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};

use super::UserId;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into, Display)]
pub struct MessageId(i64);

impl FromStr for MessageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
