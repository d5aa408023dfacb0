use serde::{Deserialize, Serialize};

use crate::error::{Result, TableModelError};

/// One table cell addressable by its structured id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    /// Structured id: `cell_<table>_<row>_<col>` for data cells,
    /// `header_cell_<table>_<row>_<col>` for header cells
    pub name: String,

    /// Raw textual content as read from the corpus
    pub content: String,

    /// Whether this cell is a header cell
    pub is_header: bool,

    /// Row index within the table (0-based)
    pub row_num: usize,

    /// Column index within the table (0-based)
    pub col_num: usize,
}

impl Cell {
    pub fn new(
        table_id: usize,
        row_num: usize,
        col_num: usize,
        content: impl Into<String>,
        is_header: bool,
    ) -> Self {
        let prefix = if is_header { "header_cell" } else { "cell" };
        Self {
            name: format!("{prefix}_{table_id}_{row_num}_{col_num}"),
            content: content.into(),
            is_header,
            row_num,
            col_num,
        }
    }

    /// A cell is empty when its content carries no alphanumeric character,
    /// e.g. `---` or `—` placeholders
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.content.chars().any(char::is_alphanumeric)
    }

    /// Parse this cell's structured id
    pub fn id(&self) -> Result<CellId> {
        CellId::parse(&self.name)
    }
}

/// A parsed structured cell id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub table: usize,
    pub row: usize,
    pub col: usize,
}

impl CellId {
    /// Parse a structured id of the form `cell_<t>_<r>_<c>` or
    /// `header_cell_<t>_<r>_<c>`
    pub fn parse(name: &str) -> Result<Self> {
        let rest = name
            .strip_prefix("header_cell_")
            .or_else(|| name.strip_prefix("cell_"))
            .ok_or_else(|| TableModelError::MalformedCellId(name.to_string()))?;

        let mut parts = rest.split('_');
        let mut next = || -> Result<usize> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| TableModelError::MalformedCellId(name.to_string()))
        };

        let id = Self {
            table: next()?,
            row: next()?,
            col: next()?,
        };

        if parts.next().is_some() {
            return Err(TableModelError::MalformedCellId(name.to_string()));
        }

        Ok(id)
    }
}
