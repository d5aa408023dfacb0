use rand::rngs::StdRng;
use rand::Rng;
use tablefact_table_model::{Cell, Row, WikiTable};

use crate::error::{Result, TableError, TableErrorKind};
use crate::evidence::TableType;

/// Structural classification of one table: where its headers are and
/// how many rows it spans
#[derive(Debug)]
pub struct TableShape<'t> {
    pub table: &'t WikiTable,

    /// Rows made entirely of header cells, in source order
    pub header_rows: Vec<&'t Row>,

    /// Column-0 cells of non-header rows that are themselves header cells
    pub left_headers: Vec<&'t Cell>,

    /// Total row count, headers included
    pub row_count: usize,
}

impl<'t> TableShape<'t> {
    /// Any left header makes the table an entity table; top headers alone
    /// make it relational; neither means it is unusable
    #[must_use]
    pub fn table_type(&self) -> Option<TableType> {
        if !self.left_headers.is_empty() {
            Some(TableType::Entity)
        } else if !self.header_rows.is_empty() {
            Some(TableType::Relational)
        } else {
            None
        }
    }
}

/// Scan a table for top header rows and left header cells
#[must_use]
pub fn classify(table: &WikiTable) -> TableShape<'_> {
    let header_rows: Vec<&Row> = table.header_rows().collect();

    let left_headers = table
        .rows()
        .iter()
        .filter(|r| !r.is_header_row())
        .filter_map(|r| r.cells.first())
        .filter(|c| c.is_header)
        .collect();

    TableShape {
        table,
        header_rows,
        left_headers,
        row_count: table.row_count(),
    }
}

/// A header-delimited row span within a relational table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTable {
    /// Index of the governing header row within the header-row list
    pub header_index: usize,

    /// Row number of the governing header row
    pub header_row: usize,

    /// Exclusive end row; data rows span `header_row + 1 .. end_row`
    pub end_row: usize,
}

impl SubTable {
    /// Data row numbers governed by this header
    pub fn data_rows(&self) -> impl Iterator<Item = usize> {
        self.header_row + 1..self.end_row
    }
}

/// Randomly pick a header row whose span can hold `evidence_per_table`
/// evidence rows. Consecutive-header spans and too-short spans advance the
/// search cyclically; after `2 × header_count` advances the table has no
/// extractable sub-table.
pub fn find_sub_table(
    shape: &TableShape<'_>,
    evidence_per_table: usize,
    rng: &mut StdRng,
) -> Result<SubTable> {
    let header_nums: Vec<usize> = shape.header_rows.iter().map(|r| r.row_num).collect();
    if header_nums.is_empty() {
        return Err(TableError::new(
            TableErrorKind::NoHeaders,
            &shape.table.page,
        ));
    }

    let mut index = rng.gen_range(0..header_nums.len());
    let mut count = 0;
    loop {
        let header_row = header_nums[index];
        let end_row = if index == header_nums.len() - 1 {
            shape.row_count
        } else {
            header_nums[index + 1]
        };

        // interval == 1 means consecutive headers with no data between them
        let interval = end_row - header_row;
        if interval != 1 && interval >= evidence_per_table {
            return Ok(SubTable {
                header_index: index,
                header_row,
                end_row,
            });
        }

        if count == header_nums.len() * 2 {
            return Err(TableError::new(
                TableErrorKind::SubTableNotFound,
                &shape.table.page,
            ));
        }
        count += 1;
        index = (index + 1) % header_nums.len();
    }
}
