use std::collections::{HashMap, HashSet};

use crate::model::{ExactMatchOutput, MatchedPair, TrackRow};

/// Inner join of two collections on equality of all merge-field values.
///
/// Duplicate keys produce the full cross-product, standard relational
/// semantics: a degenerate library with two identical rows against two
/// identical player rows yields four pairs. Residuals are the rows whose
/// stable index appears in no pair. Pair order follows the truth collection,
/// then the player collection, so the output is deterministic.
pub fn match_exact(
    truth: &[TrackRow],
    other: &[TrackRow],
    merge_fields: &[String],
) -> ExactMatchOutput {
    let key = |row: &TrackRow| -> Vec<String> {
        merge_fields
            .iter()
            .map(|f| row.merge_value(f).to_string())
            .collect()
    };

    let mut other_by_key: HashMap<Vec<String>, Vec<&TrackRow>> = HashMap::new();
    for row in other {
        other_by_key.entry(key(row)).or_default().push(row);
    }

    let mut matched = Vec::new();
    let mut matched_truth: HashSet<usize> = HashSet::new();
    let mut matched_other: HashSet<usize> = HashSet::new();

    for truth_row in truth {
        if let Some(hits) = other_by_key.get(&key(truth_row)) {
            for other_row in hits {
                matched_truth.insert(truth_row.index);
                matched_other.insert(other_row.index);
                matched.push(MatchedPair {
                    truth: truth_row.clone(),
                    other: (*other_row).clone(),
                });
            }
        }
    }

    let truth_residual = truth
        .iter()
        .filter(|r| !matched_truth.contains(&r.index))
        .cloned()
        .collect();
    let other_residual = other
        .iter()
        .filter(|r| !matched_other.contains(&r.index))
        .cloned()
        .collect();

    ExactMatchOutput {
        matched,
        truth_residual,
        other_residual,
    }
}
