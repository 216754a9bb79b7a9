//! Error taxonomy of the grid engine

use thiserror::Error;

use super::schema::Mode;

/// Malformed column schema. Fatal at load time: the screen must not render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column schema is empty")]
    Empty,

    #[error("column #{index} has an empty field key")]
    EmptyFieldKey { index: usize },

    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },

    #[error("field '{field}' declares unknown mode '{mode}'")]
    UnknownMode { field: String, mode: String },

    #[error("field '{field}' is required in {mode} mode but has no editable widget")]
    RequiredWithoutWidget { field: String, mode: Mode },

    #[error("failed to parse column schema: {0}")]
    Parse(String),
}

/// Client-side required-field check failed. The form stays open and nothing is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in the following required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Display titles of the missing fields, in schema order.
    pub missing: Vec<String>,
}

/// Network or backend failure reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

/// Any failure the grid surfaces to its host screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GridError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
