use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use juniper::{FieldError, GraphQLObject, ScalarValue, ID};
use thiserror::Error;

use crate::access_error::AccessError;
use crate::commands::UserInputError;
use crate::entities;

#[derive(Debug, Error)]
#[error("{source}")]
pub struct GraphqlUserError {
    #[source]
    pub source: anyhow::Error,
}

impl From<anyhow::Error> for GraphqlUserError {
    fn from(source: anyhow::Error) -> Self {
        Self { source }
    }
}

impl From<&str> for GraphqlUserError {
    fn from(source: &str) -> Self {
        Self {
            source: anyhow!("{}", source),
        }
    }
}

fn coded_field_error<S: ScalarValue>(message: impl fmt::Display, code: &str) -> FieldError<S> {
    let mut extensions = juniper::Object::with_capacity(1);
    extensions.add_field("code", juniper::Value::scalar(code.to_string()));
    FieldError::new(message, juniper::Value::Object(extensions))
}

#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<S: ScalarValue> juniper::IntoFieldError<S> for ApiError {
    fn into_field_error(self) -> FieldError<S> {
        if let Some(err) = self.0.downcast_ref::<AccessError>() {
            if let AccessError::BackendUnavailable(source) = err {
                tracing::error!("{:?}", source);
            }
            return coded_field_error(err, err.code());
        }
        if let Some(err) = self.0.downcast_ref::<UserInputError>() {
            return coded_field_error(err, err.code());
        }
        match self.0.downcast_ref::<GraphqlUserError>() {
            Some(err) => coded_field_error(&err.source, "BAD_USER_INPUT"),
            None => {
                tracing::error!("{:?}", self.0);
                coded_field_error("Internal error", "INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl<T: Into<anyhow::Error>> From<T> for ApiError {
    fn from(err: T) -> Self {
        Self(err.into())
    }
}

/// Response body for an operation refused before any resolver ran.
pub fn rejected_operation(err: &AccessError) -> serde_json::Value {
    serde_json::json!({
        "data": null,
        "errors": [{
            "message": err.to_string(),
            "extensions": { "code": err.code() },
        }],
    })
}

pub fn decode_id<T: FromStr>(id: &ID) -> Result<T, GraphqlUserError> {
    id.parse::<T>()
        .map_err(|_| GraphqlUserError::from(anyhow!("invalid id: {}", &**id)))
}

pub fn encode_limit(limit: Option<i32>) -> Result<entities::Limit, GraphqlUserError> {
    limit
        .map(entities::Limit::try_from)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(anyhow::Error::from)
        .map_err(GraphqlUserError::from)
}

pub fn encode_cursor(created_at: DateTime<Utc>) -> String {
    STANDARD.encode(created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn decode_cursor(cursor: &str) -> Result<DateTime<Utc>, GraphqlUserError> {
    let decoded: Option<DateTime<Utc>> = (|| {
        let buf = STANDARD.decode(cursor).ok()?;
        let s = String::from_utf8(buf).ok()?;
        let created_at = DateTime::parse_from_rfc3339(&s).ok()?;
        Some(created_at.with_timezone(&Utc))
    })();
    decoded.ok_or_else(|| GraphqlUserError::from("invalid cursor"))
}

#[derive(GraphQLObject, Clone, Debug)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
