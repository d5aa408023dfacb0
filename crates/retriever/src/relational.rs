use rand::rngs::StdRng;
use rand::seq::index;
use tablefact_table_model::Cell;

use crate::classifier::{find_sub_table, TableShape};
use crate::error::{Result, TableError, TableErrorKind};
use crate::evidence::{clean_content, CellSnapshot};
use crate::sampler::SampledCells;
use crate::strategy::KeyStrategy;

/// Sample evidence rows from a relational table (headers on top).
///
/// Picks a header-delimited sub-table, selects the column set via the key
/// strategy, collects per-column alternative pools over the data span, and
/// draws `evidence_per_table` rows whose selected cells are all usable.
pub(crate) fn sample_relational<'t>(
    shape: &TableShape<'t>,
    evidence_per_table: usize,
    column_per_table: usize,
    key_strategy: KeyStrategy,
    rng: &mut StdRng,
) -> Result<SampledCells<'t>> {
    let table = shape.table;
    let page = table.page.as_str();

    let sub = find_sub_table(shape, evidence_per_table, rng)?;
    let header = shape.header_rows[sub.header_index];

    // header rows may differ in width; the chosen one must be wide enough
    if header.width() < column_per_table {
        return Err(TableError::new(TableErrorKind::NotEnoughColumns, page));
    }

    let data_rows: Vec<usize> = sub.data_rows().collect();
    if data_rows.len() < evidence_per_table {
        return Err(TableError::new(TableErrorKind::NotEnoughRows, page));
    }

    let columns = key_strategy.select_columns(
        &column_values(shape, header.width(), &data_rows),
        column_per_table,
        rng,
    );

    // one alternative pool per selected column; empty cells become None
    let mut pools: Vec<Vec<Option<CellSnapshot>>> = Vec::with_capacity(columns.len());
    for &j in &columns {
        let mut pool = Vec::with_capacity(data_rows.len());
        for &r in &data_rows {
            let cell = fetch(shape, r, j)?;
            if cell.is_empty() {
                pool.push(None);
            } else {
                pool.push(Some(CellSnapshot::from_cell(cell, page)?));
            }
        }
        pools.push(pool);
    }

    // a row is usable only when every selected column holds a usable cell
    let valid_rows: Vec<usize> = data_rows
        .iter()
        .enumerate()
        .filter(|&(i, _)| pools.iter().all(|pool| pool[i].is_some()))
        .map(|(_, &r)| r)
        .collect();
    if valid_rows.len() < evidence_per_table {
        return Err(TableError::new(TableErrorKind::NotEnoughRows, page));
    }

    let mut sets = Vec::with_capacity(evidence_per_table);
    for i in index::sample(rng, valid_rows.len(), evidence_per_table) {
        let r = valid_rows[i];
        let mut set = Vec::with_capacity(columns.len());
        for &j in &columns {
            set.push(fetch(shape, r, j)?);
        }
        sets.push(set);
    }

    let headers: Vec<&Cell> = columns.iter().map(|&j| &header.cells[j]).collect();
    Ok(SampledCells {
        sets,
        headers,
        pools,
    })
}

/// Cleaned per-column value slices over the data span, for key scoring.
/// Missing cells score as empty strings; only evidence fetching treats
/// them as errors.
fn column_values(shape: &TableShape<'_>, width: usize, data_rows: &[usize]) -> Vec<Vec<String>> {
    (0..width)
        .map(|j| {
            data_rows
                .iter()
                .map(|&r| {
                    shape
                        .table
                        .rows()
                        .get(r)
                        .and_then(|row| row.cells.get(j))
                        .map(|c| clean_content(&c.content))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

/// Fetch the data cell at `(row, col)` by structured id
fn fetch<'t>(shape: &TableShape<'t>, row: usize, col: usize) -> Result<&'t Cell> {
    let table = shape.table;
    let name = format!("cell_{}_{row}_{col}", table.table_id);
    table
        .get_cell(&name)
        .map_err(|_| TableError::new(TableErrorKind::MalformedCellId, &table.page))
}
