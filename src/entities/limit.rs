use thiserror::Error;

pub const MAX_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone)]
pub enum CreateLimitError {
    #[error("limit must be less than or equal to {}", MAX_LIMIT)]
    LimitTooLarge,
    #[error("limit must be greater than or equal to 0")]
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit(u32);

impl Limit {
    pub fn new(value: u32) -> Result<Self, CreateLimitError> {
        if value > MAX_LIMIT {
            Err(CreateLimitError::LimitTooLarge)
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(MAX_LIMIT)
    }
}

impl TryFrom<i32> for Limit {
    type Error = CreateLimitError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| CreateLimitError::Negative)?;
        Self::new(value)
    }
}
