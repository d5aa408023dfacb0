use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableErrorKind};

/// Where the unsuitable tables went: page ids bucketed by failure kind.
///
/// Accumulated by the orchestrator and returned next to the evidence so a
/// run's yield can be audited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscardReport {
    buckets: BTreeMap<TableErrorKind, Vec<String>>,
}

impl DiscardReport {
    /// Record one discarded table/page
    pub fn record(&mut self, err: &TableError) {
        self.buckets
            .entry(err.kind)
            .or_default()
            .push(err.page.clone());
    }

    /// Page ids recorded under one kind, in scan order
    #[must_use]
    pub fn pages(&self, kind: TableErrorKind) -> &[String] {
        self.buckets.get(&kind).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn count(&self, kind: TableErrorKind) -> usize {
        self.pages(kind).len()
    }

    /// Total discards across all kinds
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Log one summary line per non-empty bucket
    pub fn log_summary(&self) {
        for kind in TableErrorKind::ALL {
            let n = self.count(kind);
            if n > 0 {
                log::info!("discarded {n} for {kind}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_buckets_by_kind() {
        let mut report = DiscardReport::default();
        report.record(&TableError::new(TableErrorKind::NoHeaders, "A"));
        report.record(&TableError::new(TableErrorKind::NoHeaders, "B"));
        report.record(&TableError::new(TableErrorKind::NotEnoughRows, "C"));

        assert_eq!(report.count(TableErrorKind::NoHeaders), 2);
        assert_eq!(report.pages(TableErrorKind::NoHeaders), ["A", "B"]);
        assert_eq!(report.count(TableErrorKind::NotEnoughRows), 1);
        assert_eq!(report.count(TableErrorKind::SubTableNotFound), 0);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_report_serializes_with_kind_keys() {
        let mut report = DiscardReport::default();
        report.record(&TableError::new(TableErrorKind::NotEnoughTables, "A"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["buckets"]["NotEnoughTables"][0], "A");
    }
}
