use serde_json::{json, Value};
use tablefact_retriever::{Evidence, EvidencePiece};

/// A generated claim paired with the evidence it was generated from.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TextualClaim {
    claim: String,
    evidence: Evidence,
}

impl TextualClaim {
    pub fn new(claim: String, evidence: Evidence) -> Self {
        Self { claim, evidence }
    }

    #[must_use]
    pub fn claim(&self) -> &str {
        &self.claim
    }

    #[must_use]
    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }

    /// Dataset record for one claim.
    ///
    /// For a refuted piece the record's `evidence`/`context` describe the
    /// original (true) cell, while `swapped` lists what was substituted in.
    #[must_use]
    pub fn to_json_record(&self, sample_id: usize) -> Value {
        let mut content = Vec::new();
        let mut context = serde_json::Map::new();
        let mut true_cells = String::new();
        let mut swapped_cells = String::new();

        for piece in &self.evidence.pieces {
            let source: &EvidencePiece = match &piece.true_piece {
                Some(original) => {
                    true_cells.push_str(&format!("{}, {} | ", original.content, original.cell_id));
                    swapped_cells.push_str(&format!("{}, {} | ", piece.content, piece.cell_id));
                    original
                }
                None => {
                    true_cells.push_str(&format!("{}, {} | ", piece.content, piece.cell_id));
                    swapped_cells.push_str("- | ");
                    piece
                }
            };

            let header_key = format!("{}_{}", source.wiki_page, source.header_id);
            let cell_key = format!("{}_{}", source.wiki_page, source.cell_id);

            let mut cell_context: Vec<Value> =
                source.caption.iter().map(|s| json!(s)).collect();
            cell_context.push(json!(header_key));
            context.insert(cell_key.clone(), Value::Array(cell_context));
            content.push(json!(cell_key));
        }

        json!({
            "id": sample_id,
            "label": self.evidence.label.as_str(),
            "evidence": [{
                "content": content,
                "context": context,
            }],
            "claim": self.claim,
            "true": true_cells,
            "swapped": swapped_cells,
            "table": self.evidence.table_type.as_str(),
            "expected_challenge": "Augmented",
            "challenge": "Augmented",
        })
    }

    /// Convert a batch of claims into dataset records
    #[must_use]
    pub fn to_json_records(claims: &[TextualClaim]) -> Vec<Value> {
        claims
            .iter()
            .enumerate()
            .map(|(i, c)| c.to_json_record(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tablefact_retriever::{Label, TableType};
    use tablefact_table_model::Cell;

    fn piece(row: usize, col: usize, content: &str) -> EvidencePiece {
        let cell = Cell::new(0, row, col, content, false);
        let header = Cell::new(0, 0, col, "Name", true);
        EvidencePiece::new(
            "Page",
            Arc::new(vec!["Page".to_string(), "Section".to_string()]),
            &cell,
            &header,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_supports_record() {
        let evidence = Evidence::supports(vec![piece(1, 0, "Totti")], TableType::Relational);
        let claim = TextualClaim::new("Totti played for Roma.".to_string(), evidence);
        let record = claim.to_json_record(3);

        assert_eq!(record["id"], 3);
        assert_eq!(record["label"], "SUPPORTS");
        assert_eq!(record["table"], "relational");
        assert_eq!(record["claim"], "Totti played for Roma.");
        assert_eq!(record["true"], "Totti, cell_0_1_0 | ");
        assert_eq!(record["swapped"], "- | ");

        let content = record["evidence"][0]["content"].as_array().unwrap();
        assert_eq!(content[0], "Page_cell_0_1_0");
        let context = &record["evidence"][0]["context"]["Page_cell_0_1_0"];
        assert_eq!(
            context,
            &json!(["Page", "Section", "Page_header_cell_0_0_0"])
        );
    }

    #[test]
    fn test_refutes_record_tracks_originals() {
        let original = piece(1, 0, "Totti");
        let mut swapped = piece(2, 0, "Cassano");
        swapped.true_piece = Some(Box::new(original));

        let mut evidence = Evidence::supports(vec![swapped], TableType::Relational);
        evidence.label = Label::Refutes;

        let claim = TextualClaim::new("Cassano scored 128 goals.".to_string(), evidence);
        let record = claim.to_json_record(0);

        assert_eq!(record["label"], "REFUTES");
        assert_eq!(record["true"], "Totti, cell_0_1_0 | ");
        assert_eq!(record["swapped"], "Cassano, cell_0_2_0 | ");
        // evidence content points at the true cell, not the substitute
        assert_eq!(record["evidence"][0]["content"][0], "Page_cell_0_1_0");
    }

    #[test]
    fn test_batch_ids_are_positional() {
        let evidence = Evidence::supports(vec![piece(1, 0, "Totti")], TableType::Relational);
        let claims = vec![
            TextualClaim::new("a".to_string(), evidence.clone()),
            TextualClaim::new("b".to_string(), evidence),
        ];
        let records = TextualClaim::to_json_records(&claims);
        assert_eq!(records[0]["id"], 0);
        assert_eq!(records[1]["id"], 1);
    }
}
