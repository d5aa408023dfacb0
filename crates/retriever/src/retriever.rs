use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tablefact_table_model::{Corpus, WikiTable};

use crate::config::RetrieverConfig;
use crate::error::{TableError, TableErrorKind};
use crate::evidence::Evidence;
use crate::negative::synthesize_negative;
use crate::report::DiscardReport;
use crate::sampler::TableSampler;

/// What a retrieval run produced: positives first, then negatives, plus
/// the audit trail of everything that was skipped
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    pub evidence: Vec<Evidence>,
    pub report: DiscardReport,
}

/// Scans a corpus of pages and accumulates evidence up to the configured
/// targets.
///
/// The sampler is injected, so the scan loop is independent of the
/// sampling policy. All randomness flows through one seeded generator
/// owned by the run.
pub struct Retriever<C, S> {
    corpus: C,
    sampler: S,
    config: RetrieverConfig,
}

impl<C: Corpus, S: TableSampler> Retriever<C, S> {
    pub fn new(corpus: C, sampler: S, config: RetrieverConfig) -> Self {
        Self {
            corpus,
            sampler,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Scan the corpus until both targets are met or the corpus is
    /// exhausted. Never fails: a short yield shows up as fewer evidences
    /// plus a fuller discard report.
    pub fn retrieve(&self) -> RetrievalOutcome {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let mut ids = self.corpus.doc_ids();
        ids.shuffle(&mut rng);

        let mut report = DiscardReport::default();
        let mut positives: Vec<Evidence> = Vec::new();
        let mut negatives: Vec<Evidence> = Vec::new();

        for page_id in &ids {
            if positives.len() >= cfg.num_positive && negatives.len() >= cfg.num_negative {
                break;
            }
            if cfg.verbose {
                log::info!("wikipage: {page_id}");
            }

            let page = match self.corpus.get_page(page_id) {
                Ok(page) => page,
                Err(err) => {
                    log::warn!("failed to load page {page_id:?}: {err}");
                    continue;
                }
            };

            let mut tables: Vec<&WikiTable> = page.get_tables().iter().collect();
            if tables.is_empty() {
                report.record(&TableError::new(
                    TableErrorKind::NoExtractableTable,
                    page_id,
                ));
                continue;
            }
            if tables.len() < cfg.table_per_page {
                report.record(&TableError::new(TableErrorKind::NotEnoughTables, page_id));
                continue;
            }
            tables.shuffle(&mut rng);

            for table in tables.iter().take(cfg.table_per_page) {
                if positives.len() >= cfg.num_positive && negatives.len() >= cfg.num_negative {
                    break;
                }
                match self.sampler.sample(table, &mut rng) {
                    Ok(sampled) => {
                        for pieces in sampled.sets {
                            let positive = Evidence::supports(pieces, sampled.table_type);
                            if negatives.len() < cfg.num_negative {
                                // negatives are best-effort: synthesis works on
                                // its own clone and failures only mark the report
                                match synthesize_negative(&positive, cfg.wrong_cell, &mut rng) {
                                    Ok(negative) => negatives.push(negative),
                                    Err(err) => report.record(&err),
                                }
                            }
                            positives.push(positive);
                        }
                    }
                    Err(err) => report.record(&err),
                }
            }
        }

        positives.truncate(cfg.num_positive);
        negatives.truncate(cfg.num_negative);

        log::info!(
            "retrieved {}/{} positive and {}/{} negative evidences over {} pages",
            positives.len(),
            cfg.num_positive,
            negatives.len(),
            cfg.num_negative,
            ids.len(),
        );
        report.log_summary();

        let mut evidence = positives;
        evidence.append(&mut negatives);
        RetrievalOutcome { evidence, report }
    }
}
