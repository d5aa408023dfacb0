use serde::{Deserialize, Serialize};
use tablefact_retriever::{Evidence, EvidencePiece};

/// Text encoding handed to the claim generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// `content && page && header` pieces joined by ` | `
    #[default]
    Compact,

    /// ToTTo-style tagged table linearization
    Totto,
}

impl Encoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Totto => "totto",
        }
    }
}

/// Serialize an evidence set into the single string the generator consumes
#[must_use]
pub fn encode(evidence: &Evidence, encoding: Encoding) -> String {
    match encoding {
        Encoding::Compact => to_compact_text(&evidence.pieces),
        Encoding::Totto => to_totto_text(&evidence.pieces),
    }
}

/// Example: `Washington && List of cities && City | 7.615 && List of cities && Inhabitants`
fn to_compact_text(pieces: &[EvidencePiece]) -> String {
    pieces
        .iter()
        .map(|p| format!("{} && {} && {}", p.content, p.wiki_page, p.header_content))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Example:
/// `<page_title> list of governors </page_title> <table> <row> <cell> 76
/// <col_header> number </col_header> </cell> </row> </table>`
///
/// Pieces are sorted by `(wiki_page, table, row, column)` first, so the
/// emitted row and cell breaks follow the table layout deterministically.
fn to_totto_text(pieces: &[EvidencePiece]) -> String {
    if pieces.is_empty() {
        return String::new();
    }

    let mut sorted: Vec<&EvidencePiece> = pieces.iter().collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut text = format!(
        " <page_title> {} </page_title> <table> <row>  <cell> ",
        sorted[0].wiki_page
    );

    let mut curr = (sorted[0].table, sorted[0].row, sorted[0].column);
    for (i, p) in sorted.iter().enumerate() {
        if p.table != curr.0 {
            text.push_str(" </cell> </row> </table> <table> <row>  <cell> ");
            curr = (p.table, p.row, p.column);
        } else if p.row != curr.1 {
            text.push_str(" </cell> </row> <row>  <cell> ");
            curr = (p.table, p.row, p.column);
        } else if i > 0 && p.column != curr.2 {
            text.push_str(" </cell>  <cell> ");
            curr = (p.table, p.row, p.column);
        }
        text.push_str(&p.content);
        text.push_str(" <col_header> ");
        text.push_str(&p.header_content);
        text.push_str(" </col_header> ");
    }

    text.push_str(" </cell> </row> </table>");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tablefact_retriever::TableType;
    use tablefact_table_model::Cell;

    fn piece(row: usize, col: usize, content: &str, header: &str) -> EvidencePiece {
        let cell = Cell::new(0, row, col, content, false);
        let header = Cell::new(0, 0, col, header, true);
        EvidencePiece::new("List of cities", Arc::new(vec![]), &cell, &header, vec![]).unwrap()
    }

    #[test]
    fn test_compact_encoding() {
        let evidence = Evidence::supports(
            vec![
                piece(1, 0, "Washington", "City"),
                piece(1, 1, "7.615", "Inhabitants"),
            ],
            TableType::Relational,
        );
        assert_eq!(
            encode(&evidence, Encoding::Compact),
            "Washington && List of cities && City | 7.615 && List of cities && Inhabitants"
        );
    }

    #[test]
    fn test_totto_encoding_single_row() {
        let evidence = Evidence::supports(
            vec![
                piece(1, 1, "7.615", "Inhabitants"),
                piece(1, 0, "Washington", "City"),
            ],
            TableType::Relational,
        );
        let text = encode(&evidence, Encoding::Totto);

        assert!(text.starts_with(" <page_title> List of cities </page_title>"));
        // sorted by column: Washington first despite input order
        let w = text.find("Washington").unwrap();
        let n = text.find("7.615").unwrap();
        assert!(w < n);
        // two cells, one row
        assert_eq!(text.matches("<col_header>").count(), 2);
        assert_eq!(text.matches("<row>").count(), 1);
        assert!(text.ends_with("</cell> </row> </table>"));
    }

    #[test]
    fn test_totto_encoding_breaks_rows() {
        let evidence = Evidence::supports(
            vec![piece(1, 0, "Washington", "City"), piece(2, 0, "Rome", "City")],
            TableType::Entity,
        );
        let text = encode(&evidence, Encoding::Totto);
        assert_eq!(text.matches("<row>").count(), 2);
    }

    #[test]
    fn test_empty_evidence_encodes_to_empty_string() {
        let evidence = Evidence::supports(vec![], TableType::Relational);
        assert_eq!(encode(&evidence, Encoding::Totto), "");
    }
}
