use thiserror::Error;

/// A response body the client could not map onto a known shape.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown action status {0}")]
    UnknownStatus(i64),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}
