use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tablefact_table_model::{Cell, CellId};

use crate::error::{Result, TableError, TableErrorKind};

/// Matches the `[[target|` half of a piped wiki link
static LINK_TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\[\]|]*\|").unwrap());

/// Matches a single bracketed group with no nested brackets
static BRACKET_GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());

/// Strip wiki formatting from cell content: `[H]` markers, newlines,
/// `[[target|label]]` links (the label survives), bracketed footnotes,
/// stray brackets. Applying it twice yields the same string as once.
#[must_use]
pub fn clean_content(content: &str) -> String {
    let content = content.replace("[H]", "").replace('\n', " ");
    let content = LINK_TARGET_RE.replace_all(&content, "");
    let content = BRACKET_GROUP_RE.replace_all(&content, "");
    content.replace(['[', ']'], "")
}

/// Owned copy of one table cell, used for alternative pools so evidence
/// does not borrow from the table it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Structured id of the cell
    pub id: String,

    pub table: usize,
    pub row: usize,
    pub col: usize,

    /// Raw content as read from the table; cleaned only when promoted
    /// into an evidence piece
    pub content: String,

    pub is_header: bool,
}

impl CellSnapshot {
    /// Snapshot a cell; fails when its structured id does not parse
    pub fn from_cell(cell: &Cell, page: &str) -> Result<Self> {
        let id = CellId::parse(&cell.name)
            .map_err(|_| TableError::new(TableErrorKind::MalformedCellId, page))?;
        Ok(Self {
            id: cell.name.clone(),
            table: id.table,
            row: id.row,
            col: id.col,
            content: cell.content.clone(),
            is_header: cell.is_header,
        })
    }
}

/// One selected cell together with its header cell and the alternative
/// cells that could legally substitute it in a negative sample.
///
/// `None` entries in `possible_pieces` mark unusable alternative slots
/// (empty, header, or duplicate-content cells).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidencePiece {
    /// Source page identifier
    pub wiki_page: String,

    /// Structured id of the selected cell
    pub cell_id: String,

    /// Indices parsed from `cell_id`
    pub table: usize,
    pub row: usize,
    pub column: usize,

    /// Contextual strings (page title, section titles), resolved once per
    /// table and shared read-only across all pieces from that table
    pub caption: Arc<Vec<String>>,

    /// Cleaned cell content
    pub content: String,

    /// Structured id of the header cell
    pub header_id: String,

    /// Cleaned header content
    pub header_content: String,

    /// Alternative cells usable to build a negative sample
    pub possible_pieces: Vec<Option<CellSnapshot>>,

    /// The original piece, when this one was substituted in for a
    /// REFUTES sample; `None` for an original piece
    pub true_piece: Option<Box<EvidencePiece>>,
}

impl EvidencePiece {
    pub fn new(
        wiki_page: &str,
        caption: Arc<Vec<String>>,
        cell: &Cell,
        header: &Cell,
        possible_pieces: Vec<Option<CellSnapshot>>,
    ) -> Result<Self> {
        let id = CellId::parse(&cell.name)
            .map_err(|_| TableError::new(TableErrorKind::MalformedCellId, wiki_page))?;
        Ok(Self {
            wiki_page: wiki_page.to_string(),
            cell_id: cell.name.clone(),
            table: id.table,
            row: id.row,
            column: id.col,
            caption,
            content: clean_content(&cell.content),
            header_id: header.name.clone(),
            header_content: clean_content(&header.content),
            possible_pieces,
            true_piece: None,
        })
    }

    /// Pieces serialize in `(wiki_page, table, row, column)` order
    #[must_use]
    pub fn sort_key(&self) -> (&str, usize, usize, usize) {
        (&self.wiki_page, self.table, self.row, self.column)
    }
}

/// Claim label an evidence set supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "SUPPORTS")]
    Supports,

    #[serde(rename = "REFUTES")]
    Refutes,
}

impl Label {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supports => "SUPPORTS",
            Self::Refutes => "REFUTES",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural family the evidence was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableType {
    /// Headers on top, data varying by row
    #[serde(rename = "relational")]
    Relational,

    /// Headers on the left, each row one entity's attributes
    #[serde(rename = "entity")]
    Entity,
}

impl TableType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Entity => "entity",
        }
    }
}

/// An ordered set of evidence pieces sampled from one sub-table,
/// labeled with the claim polarity it backs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    pub pieces: Vec<EvidencePiece>,
    pub label: Label,
    pub table_type: TableType,
}

impl Evidence {
    pub fn supports(pieces: Vec<EvidencePiece>, table_type: TableType) -> Self {
        Self {
            pieces,
            label: Label::Supports,
            table_type,
        }
    }

    /// Number of pieces carrying a `true_piece`, i.e. substituted cells
    #[must_use]
    pub fn wrong_pieces(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| p.true_piece.is_some())
            .count()
    }
}
