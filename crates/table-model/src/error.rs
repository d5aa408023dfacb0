use thiserror::Error;

/// Result type for table model operations
pub type Result<T> = std::result::Result<T, TableModelError>;

/// Errors that can occur while loading or addressing tables
#[derive(Error, Debug)]
pub enum TableModelError {
    /// A structured cell id did not parse into `table/row/column` integers
    #[error("Malformed cell id: {0}")]
    MalformedCellId(String),

    /// A structured cell id parsed but does not address a cell in this table
    #[error("Unknown cell id: {0}")]
    UnknownCell(String),

    /// The requested document is not in the corpus
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A corpus line failed to deserialize
    #[error("Invalid page JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
