use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, TableError, TableErrorKind};
use crate::evidence::{clean_content, CellSnapshot, Evidence, EvidencePiece, Label, TableType};

/// Build a REFUTES evidence from a positive one by substituting exactly
/// `wrong_cell` pieces with validated alternative cells.
///
/// The positive evidence is never mutated: the result is a fresh clone
/// with swapped pieces, each carrying its original as `true_piece`.
pub fn synthesize_negative(
    positive: &Evidence,
    wrong_cell: usize,
    rng: &mut StdRng,
) -> Result<Evidence> {
    let page = positive
        .pieces
        .first()
        .map(|p| p.wiki_page.clone())
        .unwrap_or_default();

    let table_type = infer_table_type(positive);

    // indices already occupied by the positive set; a substitution must not
    // collapse onto a row/column another piece (original or swapped) uses
    let mut used: HashSet<usize> = positive
        .pieces
        .iter()
        .map(|p| axis_index(p, table_type))
        .collect();

    let mut negative = positive.clone();
    negative.label = Label::Refutes;
    negative.table_type = table_type;

    let mut positions: Vec<usize> = (0..negative.pieces.len()).collect();
    positions.shuffle(rng);

    let mut swapped = 0;
    for pos in positions {
        if swapped == wrong_cell {
            break;
        }
        if let Some(candidate) = pick_substitute(&negative.pieces[pos], table_type, &used, rng) {
            used.insert(match table_type {
                TableType::Relational => candidate.row,
                TableType::Entity => candidate.col,
            });
            let original = negative.pieces[pos].clone();
            negative.pieces[pos] = substituted_piece(original, &candidate);
            swapped += 1;
        }
    }

    if swapped < wrong_cell {
        return Err(TableError::new(TableErrorKind::NegativeNotFound, page));
    }

    Ok(negative)
}

/// Pieces sharing a row were sampled relationally; sharing a column,
/// entity-wise. Single-piece evidence keeps its recorded type.
fn infer_table_type(evidence: &Evidence) -> TableType {
    let pieces = &evidence.pieces;
    if pieces.len() < 2 {
        return evidence.table_type;
    }
    if pieces.iter().all(|p| p.row == pieces[0].row) {
        TableType::Relational
    } else if pieces.iter().all(|p| p.column == pieces[0].column) {
        TableType::Entity
    } else {
        evidence.table_type
    }
}

const fn axis_index(piece: &EvidencePiece, table_type: TableType) -> usize {
    match table_type {
        TableType::Relational => piece.row,
        TableType::Entity => piece.column,
    }
}

/// Scan the piece's shuffled alternative pool for the first cell that can
/// stand in: usable, a different cell, not a header, on a fresh
/// row/column, and unique in content across the pool
fn pick_substitute(
    piece: &EvidencePiece,
    table_type: TableType,
    used: &HashSet<usize>,
    rng: &mut StdRng,
) -> Option<CellSnapshot> {
    let mut order: Vec<usize> = (0..piece.possible_pieces.len()).collect();
    order.shuffle(rng);

    for i in order {
        let Some(candidate) = &piece.possible_pieces[i] else {
            continue;
        };
        if candidate.id == piece.cell_id || candidate.is_header {
            continue;
        }
        let axis = match table_type {
            TableType::Relational => candidate.row,
            TableType::Entity => candidate.col,
        };
        if used.contains(&axis) {
            continue;
        }
        if content_occurrences(piece, &candidate.content) > 1 {
            continue;
        }
        return Some(candidate.clone());
    }
    None
}

/// How many usable pool entries carry this content
fn content_occurrences(piece: &EvidencePiece, content: &str) -> usize {
    piece
        .possible_pieces
        .iter()
        .flatten()
        .filter(|c| c.content == content)
        .count()
}

fn substituted_piece(original: EvidencePiece, candidate: &CellSnapshot) -> EvidencePiece {
    EvidencePiece {
        cell_id: candidate.id.clone(),
        table: candidate.table,
        row: candidate.row,
        column: candidate.col,
        content: clean_content(&candidate.content),
        true_piece: Some(Box::new(original.clone())),
        ..original
    }
}
