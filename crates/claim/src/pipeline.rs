use anyhow::{Context, Result};
use tablefact_retriever::Evidence;

use crate::claim::TextualClaim;
use crate::encode::{encode, Encoding};
use crate::generator::ClaimGenerator;

/// Runs evidence through encoding and claim generation.
///
/// The retrieval side produces `Evidence`; this side turns each one into
/// a `TextualClaim` via the configured encoding and generator.
pub struct ClaimPipeline<G> {
    generator: G,
    encoding: Encoding,
}

impl<G: ClaimGenerator> ClaimPipeline<G> {
    pub fn new(generator: G, encoding: Encoding) -> Self {
        Self {
            generator,
            encoding,
        }
    }

    /// Generate one claim per evidence, preserving order
    pub fn generate(&self, evidence: &[Evidence]) -> Result<Vec<TextualClaim>> {
        let mut claims = Vec::with_capacity(evidence.len());
        for (i, ev) in evidence.iter().enumerate() {
            claims.push(self.generate_one(ev).with_context(|| {
                format!("claim generation failed for evidence {i}")
            })?);
        }
        log::info!(
            "generated {} claim(s) with the {} generator ({} encoding)",
            claims.len(),
            self.generator.name(),
            self.encoding.as_str(),
        );
        Ok(claims)
    }

    /// Encode and generate a single claim
    pub fn generate_one(&self, evidence: &Evidence) -> Result<TextualClaim> {
        let text = encode(evidence, self.encoding);
        let claim = self.generator.generate_claim(&text)?;
        Ok(TextualClaim::new(claim, evidence.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TemplateGenerator;
    use std::sync::Arc;
    use tablefact_retriever::{EvidencePiece, TableType};
    use tablefact_table_model::Cell;

    fn evidence() -> Evidence {
        let cell = Cell::new(0, 1, 0, "Totti", false);
        let header = Cell::new(0, 0, 0, "Name", true);
        let piece =
            EvidencePiece::new("Roma", Arc::new(vec![]), &cell, &header, vec![]).unwrap();
        Evidence::supports(vec![piece], TableType::Relational)
    }

    #[test]
    fn test_pipeline_generates_in_order() {
        let pipeline = ClaimPipeline::new(TemplateGenerator::new(), Encoding::Compact);
        let claims = pipeline.generate(&[evidence(), evidence()]).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].claim(), "In Roma, Name is Totti.");
        assert_eq!(claims[0].claim(), claims[1].claim());
    }
}
