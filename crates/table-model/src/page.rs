use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::table::{Row, WikiTable};

/// A parsed wiki page holding zero or more tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    tables: Vec<WikiTable>,
}

impl WikiPage {
    pub fn new(title: impl Into<String>, tables: Vec<WikiTable>) -> Self {
        Self {
            title: title.into(),
            tables,
        }
    }

    #[must_use]
    pub fn get_tables(&self) -> &[WikiTable] {
        &self.tables
    }

    /// Build a page from its corpus document, assigning structured cell ids
    /// from (table index, row index, column index)
    pub fn from_doc(doc: PageDoc) -> Self {
        let title = doc.title;
        let tables = doc
            .tables
            .into_iter()
            .enumerate()
            .map(|(table_id, tbl)| {
                let rows = tbl
                    .rows
                    .into_iter()
                    .enumerate()
                    .map(|(row_num, cells)| Row {
                        row_num,
                        cells: cells
                            .into_iter()
                            .enumerate()
                            .map(|(col_num, c)| {
                                Cell::new(table_id, row_num, col_num, c.value, c.header)
                            })
                            .collect(),
                    })
                    .collect();
                WikiTable {
                    page: title.clone(),
                    table_id,
                    caption: tbl.caption,
                    rows,
                }
            })
            .collect();
        Self { title, tables }
    }
}

/// Corpus document for one page: one of these per JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDoc {
    pub title: String,

    #[serde(default)]
    pub tables: Vec<TableDoc>,
}

/// Corpus document for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDoc {
    #[serde(default)]
    pub caption: Vec<String>,

    pub rows: Vec<Vec<CellDoc>>,
}

/// Corpus document for one cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDoc {
    pub value: String,

    #[serde(default)]
    pub header: bool,
}

impl CellDoc {
    pub fn data(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            header: false,
        }
    }

    pub fn header(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            header: true,
        }
    }
}
