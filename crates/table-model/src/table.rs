use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellId};
use crate::error::{Result, TableModelError};

/// One table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    /// Row index within the table (0-based)
    pub row_num: usize,

    /// Cells in column order
    pub cells: Vec<Cell>,
}

impl Row {
    /// A header row is a non-empty row made entirely of header cells
    #[must_use]
    pub fn is_header_row(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| c.is_header)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// A semi-structured table extracted from one wiki page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WikiTable {
    /// Title of the page this table belongs to
    pub page: String,

    /// Index of the table within the page (0 for the first table)
    pub table_id: usize,

    /// Caption strings attached to the table (section titles etc.)
    pub caption: Vec<String>,

    /// All rows in source order, headers included
    pub rows: Vec<Row>,
}

impl WikiTable {
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows made entirely of header cells, in source order
    pub fn header_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.is_header_row())
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Fetch a cell by structured id. The id must parse, address this
    /// table, and resolve to an existing cell.
    pub fn get_cell(&self, name: &str) -> Result<&Cell> {
        let id = CellId::parse(name)?;
        if id.table != self.table_id {
            return Err(TableModelError::UnknownCell(name.to_string()));
        }
        self.rows
            .get(id.row)
            .and_then(|r| r.cells.get(id.col))
            .filter(|c| c.name == name)
            .ok_or_else(|| TableModelError::UnknownCell(name.to_string()))
    }

    /// Contextual strings for evidence built from this table:
    /// page title first, then the caption entries
    #[must_use]
    pub fn context(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.caption.len() + 1);
        out.push(self.page.clone());
        out.extend(self.caption.iter().cloned());
        out
    }
}
