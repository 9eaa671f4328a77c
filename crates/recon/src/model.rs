use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single normalized track row from either library.
///
/// `index` is the stable original index within the row's own collection; it
/// survives every filtering step and is what "already matched" checks use.
/// Text attributes live in `fields`; a missing or null column is simply
/// absent and reads back as `""`.
#[derive(Debug, Clone)]
pub struct TrackRow {
    pub index: usize,
    /// Track id in the row's own database.
    pub library_id: i64,
    /// Mixxx `library.location` foreign key. Library side only.
    pub location_id: Option<i64>,
    /// Resolved filesystem path. Player side only.
    pub path: Option<String>,
    pub fields: HashMap<String, String>,
}

impl TrackRow {
    /// Value of a merge field, with missing/null defaulted to the empty
    /// string so distance math never sees an absent column.
    pub fn merge_value(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// The merge-field values in field order, for display.
    pub fn merge_values(&self, merge_fields: &[String]) -> Vec<&str> {
        merge_fields.iter().map(|f| self.merge_value(f)).collect()
    }
}

// ---------------------------------------------------------------------------
// Exact matching
// ---------------------------------------------------------------------------

/// One (library, player) row pair joined on equal merge-field values.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub truth: TrackRow,
    pub other: TrackRow,
}

#[derive(Debug)]
pub struct ExactMatchOutput {
    pub matched: Vec<MatchedPair>,
    pub truth_residual: Vec<TrackRow>,
    pub other_residual: Vec<TrackRow>,
}

// ---------------------------------------------------------------------------
// Fuzzy matching
// ---------------------------------------------------------------------------

/// A proposed near-match. `distance` is the summed per-field edit distance;
/// lower is more similar, ties rank by original pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub truth_index: usize,
    pub other_index: usize,
    pub distance: usize,
}

/// An operator-approved association between one library row and one player
/// row.
#[derive(Debug, Clone)]
pub struct ConfirmedMatch {
    pub truth: TrackRow,
    pub other: TrackRow,
}

// ---------------------------------------------------------------------------
// Merge output
// ---------------------------------------------------------------------------

/// One resolved library track: its own identifiers plus where the player
/// says the file lives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRow {
    pub library_id: i64,
    pub location_id: i64,
    pub path: String,
    pub filename: String,
    pub directory: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeSummary {
    pub exact: usize,
    pub confirmed: usize,
    pub skipped: usize,
    /// Residual rows for which no candidate cleared the threshold.
    pub no_proposal: usize,
}

#[derive(Debug)]
pub struct MergeOutput {
    pub rows: Vec<MergeRow>,
    pub summary: MergeSummary,
}

/// Engine status, returned to the caller instead of exiting the process.
#[derive(Debug)]
pub enum ReconOutcome {
    Completed(MergeOutput),
    /// Empty truth collection: nothing to reconcile, success with no output.
    NothingToDo,
}
