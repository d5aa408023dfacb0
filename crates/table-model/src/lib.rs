//! # Tablefact Table Model
//!
//! Owned model for semi-structured wiki tables, plus the corpus providers
//! the retriever scans.
//!
//! Cells are addressable by structured id (`cell_<table>_<row>_<col>`,
//! header cells with a `header_cell_` prefix), rows know whether they are
//! header rows, and pages expose their tables in source order. The JSONL
//! corpus stores one page document per line; structured ids are assigned
//! at parse time, so malformed ids can only come from lookups, never from
//! loading.

mod cell;
mod corpus;
mod error;
mod page;
mod table;

pub use cell::{Cell, CellId};
pub use corpus::{Corpus, JsonlCorpus, MemoryCorpus};
pub use error::{Result, TableModelError};
pub use page::{CellDoc, PageDoc, TableDoc, WikiPage};
pub use table::{Row, WikiTable};
