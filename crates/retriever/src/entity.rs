use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::index;
use tablefact_table_model::Cell;

use crate::classifier::TableShape;
use crate::error::{Result, TableError, TableErrorKind};
use crate::evidence::CellSnapshot;
use crate::sampler::SampledCells;

/// Sample evidence columns from an entity table (headers on the left).
///
/// The transpose of the relational strategy: left headers play the role of
/// column headers, and the evidence "rows" are columns of the original
/// table. Per chosen header row, only non-header, non-empty,
/// first-occurrence-content cells are usable alternatives.
pub(crate) fn sample_entity<'t>(
    shape: &TableShape<'t>,
    evidence_per_table: usize,
    column_per_table: usize,
    rng: &mut StdRng,
) -> Result<SampledCells<'t>> {
    let table = shape.table;
    let page = table.page.as_str();

    if shape.left_headers.len() < column_per_table {
        return Err(TableError::new(TableErrorKind::NotEnoughColumns, page));
    }

    let picked: Vec<&Cell> = index::sample(rng, shape.left_headers.len(), column_per_table)
        .iter()
        .map(|i| shape.left_headers[i])
        .collect();

    // per chosen header row, the usable cells at each column position
    // (column 0 is the header itself and is excluded)
    let mut cell_rows: Vec<Vec<Option<&'t Cell>>> = Vec::with_capacity(picked.len());
    for h in &picked {
        cell_rows.push(row_alternatives(shape, h.row_num));
    }
    let width = cell_rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut cell_rows {
        row.resize(width, None);
    }

    // usable evidence columns: every chosen header row has a cell there
    let usable: Vec<usize> = (0..width)
        .filter(|&p| cell_rows.iter().all(|row| row[p].is_some()))
        .collect();
    if usable.len() < evidence_per_table {
        return Err(TableError::new(TableErrorKind::NotEnoughColumns, page));
    }

    let mut sets = Vec::with_capacity(evidence_per_table);
    for i in index::sample(rng, usable.len(), evidence_per_table) {
        let p = usable[i];
        let set: Vec<&Cell> = cell_rows.iter().filter_map(|row| row[p]).collect();
        debug_assert_eq!(set.len(), cell_rows.len());
        sets.push(set);
    }

    let mut pools = Vec::with_capacity(cell_rows.len());
    for row in &cell_rows {
        let mut pool = Vec::with_capacity(row.len());
        for cell in row {
            match cell {
                Some(c) => pool.push(Some(CellSnapshot::from_cell(c, page)?)),
                None => pool.push(None),
            }
        }
        pools.push(pool);
    }

    Ok(SampledCells {
        sets,
        headers: picked,
        pools,
    })
}

/// Usable alternatives across one header's row: header cells, empty cells,
/// and repeated contents (including the header's own) are unusable
fn row_alternatives<'t>(shape: &TableShape<'t>, row_num: usize) -> Vec<Option<&'t Cell>> {
    let Some(row) = shape.table.rows().get(row_num) else {
        return Vec::new();
    };

    let mut seen: HashSet<&str> = HashSet::new();
    if let Some(first) = row.cells.first() {
        seen.insert(first.content.as_str());
    }

    row.cells
        .iter()
        .skip(1)
        .map(|c| {
            if c.is_header || c.is_empty() || !seen.insert(c.content.as_str()) {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}
