use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Closed set of reasons a table or page cannot yield evidence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TableErrorKind {
    /// The table has neither top header rows nor left header cells
    NoHeaders,

    /// Header row, left-header list, or usable transposed columns are
    /// shorter than the required column count
    NotEnoughColumns,

    /// The sub-table row span holds fewer usable rows than requested
    NotEnoughRows,

    /// A structured cell id did not parse or did not resolve to a cell
    MalformedCellId,

    /// The bounded sub-table search exhausted its header cycle
    SubTableNotFound,

    /// The page has tables, but fewer than the per-page budget
    NotEnoughTables,

    /// The page has no tables at all
    NoExtractableTable,

    /// Negative synthesis found no qualifying substitution
    NegativeNotFound,
}

impl TableErrorKind {
    /// Every kind, in report order
    pub const ALL: [Self; 8] = [
        Self::NoHeaders,
        Self::NotEnoughColumns,
        Self::NotEnoughRows,
        Self::MalformedCellId,
        Self::SubTableNotFound,
        Self::NotEnoughTables,
        Self::NoExtractableTable,
        Self::NegativeNotFound,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoHeaders => "no_headers",
            Self::NotEnoughColumns => "not_enough_columns",
            Self::NotEnoughRows => "not_enough_rows",
            Self::MalformedCellId => "malformed_cell_id",
            Self::SubTableNotFound => "subtable_not_found",
            Self::NotEnoughTables => "not_enough_tables",
            Self::NoExtractableTable => "no_extractable_table",
            Self::NegativeNotFound => "negative_not_found",
        }
    }
}

impl std::fmt::Display for TableErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table-level failure, carrying the page it occurred on so the
/// orchestrator can bucket it into the discard report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} on page {page:?}")]
pub struct TableError {
    pub kind: TableErrorKind,
    pub page: String,
}

impl TableError {
    pub fn new(kind: TableErrorKind, page: impl Into<String>) -> Self {
        let err = Self {
            kind,
            page: page.into(),
        };
        log::debug!("discarding table: {err}");
        err
    }
}
