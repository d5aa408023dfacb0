use std::sync::Arc;

use rand::rngs::StdRng;
use tablefact_table_model::{Cell, WikiTable};

use crate::classifier::classify;
use crate::entity::sample_entity;
use crate::error::{Result, TableError, TableErrorKind};
use crate::evidence::{CellSnapshot, EvidencePiece, TableType};
use crate::relational::sample_relational;
use crate::strategy::KeyStrategy;

/// Raw cells selected from one table before they become evidence pieces.
///
/// `sets[i][k]` pairs with `headers[k]` and draws alternatives from
/// `pools[k]`.
pub(crate) struct SampledCells<'t> {
    pub sets: Vec<Vec<&'t Cell>>,
    pub headers: Vec<&'t Cell>,
    pub pools: Vec<Vec<Option<CellSnapshot>>>,
}

/// Evidence-piece sets sampled from one table
#[derive(Debug, Clone)]
pub struct SampledEvidence {
    /// `evidence_per_table` sets of `column_per_table` pieces each
    pub sets: Vec<Vec<EvidencePiece>>,

    /// Which strategy family produced the sets
    pub table_type: TableType,
}

/// Extracts evidence-piece sets from a classified table.
///
/// The orchestrator takes an implementation as a constructor argument, so
/// sampling policies stay swappable without touching the scan loop.
pub trait TableSampler {
    fn sample(&self, table: &WikiTable, rng: &mut StdRng) -> Result<SampledEvidence>;
}

/// Seeded random sampler over header-delimited sub-tables
#[derive(Debug, Clone)]
pub struct RandomSampler {
    pub evidence_per_table: usize,
    pub column_per_table: usize,
    pub key_strategy: KeyStrategy,
}

impl RandomSampler {
    pub fn new(evidence_per_table: usize, column_per_table: usize) -> Self {
        Self {
            evidence_per_table,
            column_per_table,
            key_strategy: KeyStrategy::Random,
        }
    }

    #[must_use]
    pub const fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }
}

impl TableSampler for RandomSampler {
    fn sample(&self, table: &WikiTable, rng: &mut StdRng) -> Result<SampledEvidence> {
        let page = table.page.as_str();
        let shape = classify(table);

        let Some(table_type) = shape.table_type() else {
            return Err(TableError::new(TableErrorKind::NoHeaders, page));
        };

        let cells = match table_type {
            TableType::Relational => {
                let width = shape.header_rows[0].width();
                if width < self.column_per_table {
                    return Err(TableError::new(TableErrorKind::NotEnoughColumns, page));
                }
                sample_relational(
                    &shape,
                    self.evidence_per_table,
                    self.column_per_table,
                    self.key_strategy,
                    rng,
                )?
            }
            TableType::Entity => {
                sample_entity(&shape, self.evidence_per_table, self.column_per_table, rng)?
            }
        };

        // caption context is resolved once here and shared by every piece
        let caption = Arc::new(table.context());

        let mut sets = Vec::with_capacity(cells.sets.len());
        for selected in &cells.sets {
            let mut pieces = Vec::with_capacity(selected.len());
            for (k, cell) in selected.iter().enumerate() {
                pieces.push(EvidencePiece::new(
                    page,
                    Arc::clone(&caption),
                    cell,
                    cells.headers[k],
                    cells.pools[k].clone(),
                )?);
            }
            sets.push(pieces);
        }

        log::debug!(
            "sampled {} evidence set(s) from page {:?} table {} ({})",
            sets.len(),
            page,
            table.table_id,
            table_type.as_str(),
        );

        Ok(SampledEvidence { sets, table_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tablefact_table_model::{PageDoc, WikiPage};

    fn page(json: &str) -> WikiPage {
        let doc: PageDoc = serde_json::from_str(json).unwrap();
        WikiPage::from_doc(doc)
    }

    fn relational_page() -> WikiPage {
        page(
            r#"{"title":"Roma players","tables":[{"caption":["Top scorers"],"rows":[
                [{"value":"Name","header":true},{"value":"Goals","header":true}],
                [{"value":"Totti"},{"value":"128"}],
                [{"value":"Cassano"},{"value":"103"}],
                [{"value":"Montella"},{"value":"83"}]
            ]}]}"#,
        )
    }

    fn entity_page() -> WikiPage {
        page(
            r#"{"title":"Francesco Totti","tables":[{"rows":[
                [{"value":"Born","header":true},{"value":"1976"},{"value":"Rome"}],
                [{"value":"Clubs","header":true},{"value":"Roma"},{"value":"Italy"}]
            ]}]}"#,
        )
    }

    #[test]
    fn test_relational_sampling_shapes() {
        let pg = relational_page();
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = RandomSampler::new(2, 2);

        let out = sampler.sample(&pg.get_tables()[0], &mut rng).unwrap();
        assert_eq!(out.table_type, TableType::Relational);
        assert_eq!(out.sets.len(), 2);
        for set in &out.sets {
            assert_eq!(set.len(), 2);
            // pieces from one set share the sampled row
            assert_eq!(set[0].row, set[1].row);
            assert!(!set[0].possible_pieces.is_empty());
        }
    }

    #[test]
    fn test_relational_caption_shared() {
        let pg = relational_page();
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = RandomSampler::new(1, 2);

        let out = sampler.sample(&pg.get_tables()[0], &mut rng).unwrap();
        let set = &out.sets[0];
        assert!(Arc::ptr_eq(&set[0].caption, &set[1].caption));
        assert_eq!(
            *set[0].caption,
            vec!["Roma players".to_string(), "Top scorers".to_string()]
        );
    }

    #[test]
    fn test_entity_sampling_shapes() {
        let pg = entity_page();
        let mut rng = StdRng::seed_from_u64(7);
        let sampler = RandomSampler::new(2, 2);

        let out = sampler.sample(&pg.get_tables()[0], &mut rng).unwrap();
        assert_eq!(out.table_type, TableType::Entity);
        assert_eq!(out.sets.len(), 2);
        for set in &out.sets {
            assert_eq!(set.len(), 2);
            // pieces from one set share the sampled column
            assert_eq!(set[0].column, set[1].column);
        }
    }

    #[test]
    fn test_headerless_table_rejected() {
        let pg = page(
            r#"{"title":"P","tables":[{"rows":[
                [{"value":"a"},{"value":"b"}],
                [{"value":"c"},{"value":"d"}]
            ]}]}"#,
        );
        let mut rng = StdRng::seed_from_u64(0);
        let err = RandomSampler::new(1, 1)
            .sample(&pg.get_tables()[0], &mut rng)
            .unwrap_err();
        assert_eq!(err.kind, TableErrorKind::NoHeaders);
        assert_eq!(err.page, "P");
    }

    #[test]
    fn test_narrow_header_rejected() {
        let pg = relational_page();
        let mut rng = StdRng::seed_from_u64(0);
        let err = RandomSampler::new(1, 3)
            .sample(&pg.get_tables()[0], &mut rng)
            .unwrap_err();
        assert_eq!(err.kind, TableErrorKind::NotEnoughColumns);
    }

    #[test]
    fn test_too_few_rows_rejected() {
        let pg = relational_page();
        let mut rng = StdRng::seed_from_u64(0);
        let err = RandomSampler::new(4, 2)
            .sample(&pg.get_tables()[0], &mut rng)
            .unwrap_err();
        // the sole sub-table holds 3 data rows
        assert!(matches!(
            err.kind,
            TableErrorKind::NotEnoughRows | TableErrorKind::SubTableNotFound
        ));
    }

    #[test]
    fn test_empty_cells_excluded_from_rows() {
        let pg = page(
            r#"{"title":"P","tables":[{"rows":[
                [{"value":"Name","header":true},{"value":"Goals","header":true}],
                [{"value":"Totti"},{"value":"128"}],
                [{"value":"Cassano"},{"value":"---"}]
            ]}]}"#,
        );
        let sampler = RandomSampler::new(1, 2);

        // only the Totti row is fully usable, so it must always be chosen
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = sampler.sample(&pg.get_tables()[0], &mut rng).unwrap();
            assert_eq!(out.sets[0][0].row, 1);
        }
    }
}
