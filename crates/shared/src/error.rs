use thiserror::Error;

/// Failure to obtain a usable catalog from the remote endpoint.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog transport failure: {0}")]
    Transport(String),
    #[error("catalog endpoint returned status {status}")]
    Status { status: u16 },
    #[error("malformed catalog body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why a single catalog record was rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("record does not match product shape: {0}")]
    Shape(String),
}
