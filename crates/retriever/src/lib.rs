//! # Tablefact Retriever
//!
//! Evidence extraction from semi-structured wiki tables for building
//! fact-verification datasets.
//!
//! ## Architecture
//!
//! ```text
//! Corpus (pages)
//!     │
//!     ├──> Classifier
//!     │    ├─> top header rows vs left header cells
//!     │    └─> header-delimited sub-table search (bounded)
//!     │
//!     ├──> Sampler (relational | entity strategy)
//!     │    ├─> key-column selection (random/first/sensible/entity)
//!     │    ├─> alternative pools per selected column
//!     │    └─> EvidencePiece sets (SUPPORTS)
//!     │
//!     ├──> Negative synthesizer
//!     │    └─> constrained cell swaps → REFUTES sets
//!     │
//!     └──> Retriever (orchestrator)
//!          ├─> seeded shuffle over pages and tables
//!          ├─> accumulate up to the positive/negative targets
//!          └─> bucket every skipped table into the DiscardReport
//! ```
//!
//! Every sampling decision draws from one `StdRng` seeded per run, so two
//! runs over the same corpus with the same configuration produce identical
//! evidence. Unsuitable tables are never fatal: each failure is a typed
//! [`TableError`] that the orchestrator turns into a report entry.

mod classifier;
mod config;
mod entity;
mod error;
mod evidence;
mod negative;
mod relational;
mod report;
mod retriever;
mod sampler;
mod strategy;

pub use classifier::{classify, find_sub_table, SubTable, TableShape};
pub use config::RetrieverConfig;
pub use error::{Result, TableError, TableErrorKind};
pub use evidence::{clean_content, CellSnapshot, Evidence, EvidencePiece, Label, TableType};
pub use negative::synthesize_negative;
pub use report::DiscardReport;
pub use retriever::{RetrievalOutcome, Retriever};
pub use sampler::{RandomSampler, SampledEvidence, TableSampler};
pub use strategy::KeyStrategy;
