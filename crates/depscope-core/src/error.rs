//! Error taxonomy for the analysis pipeline.
//!
//! Every variant is fatal: the report is only meaningful when the complete,
//! well-formed input was processed in one pass, so there is no recovery path.

#[derive(Debug, thiserror::Error)]
pub enum DepscopeError {
    /// Input unreadable or report file uncreatable/unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record in the input stream does not conform to the expected shape.
    #[error("malformed package record: {0}")]
    Decode(#[from] serde_json::Error),

    /// Config file unreadable or invalid.
    #[error("config error: {0}")]
    Config(String),
}
