use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// How the sampler picks the column set for one evidence.
///
/// Each variant is a pure function of the sub-table's column values and the
/// generator; all variants return exactly `count` distinct in-range indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Uniform choice without replacement
    #[default]
    Random,

    /// Always include column 0, fill the rest randomly
    First,

    /// Score columns by uniqueness and primitive type (string > int >
    /// float), biased toward the left; the best column anchors the set
    Sensible,

    /// Like `Sensible`, but scored by named-entity likeness instead of
    /// primitive type
    Entity,
}

impl KeyStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::First => "first",
            Self::Sensible => "sensible",
            Self::Entity => "entity",
        }
    }

    /// Select `count` distinct column indices from the sub-table.
    ///
    /// `columns[j]` holds column `j`'s data-row values. Callers must
    /// guarantee `columns.len() >= count`.
    #[must_use]
    pub fn select_columns(
        self,
        columns: &[Vec<String>],
        count: usize,
        rng: &mut StdRng,
    ) -> Vec<usize> {
        match self {
            Self::Random => index::sample(rng, columns.len(), count).into_vec(),
            Self::First => anchored_fill(0, columns.len(), count, rng),
            Self::Sensible => {
                let key = best_key_column(columns, type_weight);
                anchored_fill(key, columns.len(), count, rng)
            }
            Self::Entity => {
                let key = best_key_column(columns, entity_weight);
                anchored_fill(key, columns.len(), count, rng)
            }
        }
    }
}

/// Fixed anchor column plus `count - 1` random distinct columns
fn anchored_fill(anchor: usize, width: usize, count: usize, rng: &mut StdRng) -> Vec<usize> {
    let rest: Vec<usize> = (0..width).filter(|&j| j != anchor).collect();
    let mut picked = vec![anchor];
    for i in index::sample(rng, rest.len(), count - 1) {
        picked.push(rest[i]);
    }
    picked
}

/// Highest-scoring key candidate, or column 0 when none qualifies.
///
/// A column qualifies only when all its values are distinct; scores decay
/// with distance from the left edge.
fn best_key_column(columns: &[Vec<String>], weight: fn(&[String]) -> f64) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (j, values) in columns.iter().enumerate() {
        if !all_unique(values) {
            continue;
        }
        let score = weight(values) / (j + 1) as f64;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((j, score));
        }
    }
    best.map_or(0, |(j, _)| j)
}

fn all_unique(values: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    !values.is_empty() && values.iter().all(|v| seen.insert(v.as_str()))
}

/// Primitive-type weight: string columns make the best keys, floats the
/// worst
fn type_weight(values: &[String]) -> f64 {
    if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        0.5
    } else if values.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
        0.3
    } else {
        1.0
    }
}

/// Named-entity weight: fraction of values shaped like proper nouns
/// (every word capitalized), floored so numeric columns still rank
fn entity_weight(values: &[String]) -> f64 {
    if values.is_empty() {
        return 0.3;
    }
    let entity_like = values.iter().filter(|v| looks_like_entity(v)).count();
    0.3 + 0.7 * entity_like as f64 / values.len() as f64
}

fn looks_like_entity(value: &str) -> bool {
    let mut words = value.split_whitespace().peekable();
    words.peek().is_some()
        && value.chars().any(char::is_alphabetic)
        && words.all(|w| {
            w.chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_numeric())
        })
}
