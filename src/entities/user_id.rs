use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::{Display, From, Into};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into, Display)]
pub struct UserId(i64);

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}
