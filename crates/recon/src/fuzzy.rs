use crate::config::MatchConfig;
use crate::model::{MatchCandidate, TrackRow};

/// Distance between two rows: Levenshtein per merge field, summed.
///
/// Summation makes the result insensitive to which field contributed the
/// edits, and integer distances give a clean total order (ties fall back to
/// pool position).
fn row_distance(truth: &TrackRow, candidate: &TrackRow, merge_fields: &[String]) -> usize {
    merge_fields
        .iter()
        .map(|f| strsim::levenshtein(truth.merge_value(f), candidate.merge_value(f)))
        .sum()
}

/// Rank the candidate pool against one library row.
///
/// Returns at most `max_candidates` entries, all strictly below the distance
/// threshold, sorted ascending by distance with ties in original pool order.
/// An empty result is the valid "no proposal" outcome, not an error.
pub fn propose_candidates(
    row: &TrackRow,
    pool: &[TrackRow],
    config: &MatchConfig,
) -> Vec<MatchCandidate> {
    let mut candidates: Vec<MatchCandidate> = pool
        .iter()
        .map(|other| MatchCandidate {
            truth_index: row.index,
            other_index: other.index,
            distance: row_distance(row, other, &config.merge_fields),
        })
        .filter(|c| c.distance < config.distance_threshold)
        .collect();

    // Pool iteration order is the tie-break, so a stable sort suffices.
    candidates.sort_by_key(|c| c.distance);
    candidates.truncate(config.max_candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold: usize, max: usize) -> MatchConfig {
        MatchConfig {
            merge_fields: vec!["artist".into(), "title".into()],
            distance_threshold: threshold,
            max_candidates: max,
        }
    }

    fn row(index: usize, artist: &str, title: &str) -> TrackRow {
        TrackRow {
            index,
            library_id: index as i64,
            location_id: None,
            path: None,
            fields: [
                ("artist".to_string(), artist.to_string()),
                ("title".to_string(), title.to_string()),
            ]
            .into(),
        }
    }

    #[test]
    fn one_edit_distance() {
        let truth = row(0, "Daft Punk", "Aerodynamic");
        let pool = vec![row(0, "Daft Punk", "Arodynamic")];
        let candidates = propose_candidates(&truth, &pool, &config(3, 5));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 1);
    }

    #[test]
    fn threshold_is_strict() {
        let truth = row(0, "Daft Punk", "Aerodynamic");
        // Two edits in title, one in artist.
        let pool = vec![row(0, "Daft Pank", "Arodynamc")];
        let candidates = propose_candidates(&truth, &pool, &config(3, 5));
        assert!(candidates.is_empty());
        let candidates = propose_candidates(&truth, &pool, &config(4, 5));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 3);
    }

    #[test]
    fn sorted_by_distance_then_pool_order() {
        let truth = row(0, "Boards of Canada", "Roygbiv");
        let pool = vec![
            row(0, "Boards of Canada", "Roygbivv"), // distance 1
            row(1, "Boards of Canada", "Roygbiv"),  // distance 0
            row(2, "Boards of Canada", "Roygbjv"),  // distance 1
        ];
        let candidates = propose_candidates(&truth, &pool, &config(5, 5));
        let ranked: Vec<(usize, usize)> = candidates
            .iter()
            .map(|c| (c.other_index, c.distance))
            .collect();
        assert_eq!(ranked, vec![(1, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn capped_at_max_candidates() {
        let truth = row(0, "Orbital", "Halcyon");
        let pool: Vec<TrackRow> = (0..10).map(|i| row(i, "Orbital", "Halcyon")).collect();
        let candidates = propose_candidates(&truth, &pool, &config(2, 3));
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].other_index, 0);
        assert_eq!(candidates[2].other_index, 2);
    }

    #[test]
    fn missing_fields_compare_as_empty() {
        let mut truth = row(0, "Aphex Twin", "Xtal");
        truth.fields.remove("title");
        let pool = vec![row(0, "Aphex Twin", "")];
        let candidates = propose_candidates(&truth, &pool, &config(2, 5));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 0);
    }

    #[test]
    fn deterministic_across_runs() {
        let truth = row(0, "Underworld", "Born Slippy");
        let pool: Vec<TrackRow> = (0..6)
            .map(|i| row(i, "Underworld", if i % 2 == 0 { "Born Slippy" } else { "Born Sloppy" }))
            .collect();
        let first = propose_candidates(&truth, &pool, &config(4, 10));
        let second = propose_candidates(&truth, &pool, &config(4, 10));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pool_is_no_proposal() {
        let truth = row(0, "Plaid", "Eyen");
        assert!(propose_candidates(&truth, &[], &config(4, 5)).is_empty());
    }
}
