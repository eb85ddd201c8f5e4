//! The module contains the errors the engine can return.
//!
//! Transport failures are reported as [`ClientError`] and wrapped by the
//! operation that issued them:
//!
//! - [`Load`] when refreshing the cached collections failed.
//! - [`Save`] when a create or update request failed.
//! - [`Delete`] when a delete request failed.
//!
//! Form problems found before any request is sent ([`MissingField`],
//! [`InvalidNumber`]) are save failures too, see [`EngineError::is_save`].
//!
//!  [`Load`]: EngineError::Load
//!  [`Save`]: EngineError::Save
//!  [`Delete`]: EngineError::Delete
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidNumber`]: EngineError::InvalidNumber
use reqwest::StatusCode;
use thiserror::Error;

use crate::form::FormField;

/// Errors coming from the request client.
///
/// `Display` yields the most specific message available: the server's
/// `message` field, then the transport message, then the raw error.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{}", server_message(*status, message.as_deref()))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

fn server_message(status: StatusCode, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("request failed with status code {}", status.as_u16()),
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Error loading transactions: {0}")]
    Load(ClientError),
    #[error("Save failed: {0}")]
    Save(ClientError),
    #[error("Delete failed: {0}")]
    Delete(ClientError),
    #[error("Save failed: {} is required", .0.label())]
    MissingField(FormField),
    #[error("Save failed: {} is not a number: {value:?}", field.label())]
    InvalidNumber { field: FormField, value: String },
    #[error("unknown timezone: {0}")]
    Timezone(String),
}

impl EngineError {
    /// True for every failure that leaves the form untouched after `submit`.
    pub fn is_save(&self) -> bool {
        matches!(
            self,
            Self::Save(_) | Self::MissingField(_) | Self::InvalidNumber { .. }
        )
    }
}
