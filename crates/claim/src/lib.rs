//! # Tablefact Claim
//!
//! Turns retrieved evidence into labeled textual claims and dataset
//! records.
//!
//! Evidence is first linearized into a model-ready string (compact or
//! ToTTo-style encoding), then handed to a [`ClaimGenerator`] — the seam
//! behind which real sequence-to-sequence inference lives. The built-in
//! [`TemplateGenerator`] keeps runs deterministic and self-contained.

mod claim;
mod encode;
mod generator;
mod pipeline;

pub use claim::TextualClaim;
pub use encode::{encode, Encoding};
pub use generator::{ClaimGenerator, TemplateGenerator};
pub use pipeline::ClaimPipeline;
