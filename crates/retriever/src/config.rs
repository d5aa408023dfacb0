use serde::{Deserialize, Serialize};

use crate::strategy::KeyStrategy;

/// Configuration for one retrieval run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// How many SUPPORTS evidences to accumulate
    pub num_positive: usize,

    /// How many REFUTES evidences to accumulate
    pub num_negative: usize,

    /// How many pieces to corrupt per negative evidence
    pub wrong_cell: usize,

    /// How many tables to attempt per page
    pub table_per_page: usize,

    /// How many evidences to extract from one table
    pub evidence_per_table: usize,

    /// How many cells per evidence
    pub column_per_table: usize,

    /// Column-selection strategy
    pub key_strategy: KeyStrategy,

    /// Seed for the run's single random generator
    pub seed: u64,

    /// Log every scanned page at info level
    pub verbose: bool,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            num_positive: 50,
            num_negative: 50,
            wrong_cell: 1,
            table_per_page: 1,
            evidence_per_table: 1,
            column_per_table: 2,
            key_strategy: KeyStrategy::Random,
            seed: 0,
            verbose: false,
        }
    }
}

impl RetrieverConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.column_per_table == 0 {
            return Err("column_per_table must be > 0".to_string());
        }
        if self.evidence_per_table == 0 {
            return Err("evidence_per_table must be > 0".to_string());
        }
        if self.table_per_page == 0 {
            return Err("table_per_page must be > 0".to_string());
        }
        if self.wrong_cell == 0 || self.wrong_cell > self.column_per_table {
            return Err(format!(
                "wrong_cell ({}) must be in 1..={}",
                self.wrong_cell, self.column_per_table
            ));
        }
        if self.num_positive == 0 && self.num_negative == 0 {
            return Err("at least one of num_positive/num_negative must be > 0".to_string());
        }
        Ok(())
    }
}
