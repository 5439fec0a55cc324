use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
        }
    }
}

// 表示用: "Not authorized as admin." のようなメッセージに埋め込む
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[error("unknown role: {0}")]
pub struct RoleFromStrError(String);

impl FromStr for Role {
    type Err = RoleFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            _ => Err(RoleFromStrError(s.to_string())),
        }
    }
}
