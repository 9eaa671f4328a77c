// ---------------------------------------------------------------------------
// Export input
// ---------------------------------------------------------------------------

/// One fully resolved collection entry. Times are seconds with any encoder
/// offset already applied; `location` is the final percent-encoded
/// `file://localhost/` URL.
#[derive(Debug, Clone)]
pub struct CollectionTrack {
    pub track_id: i64,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub track_number: String,
    pub total_time_sec: f64,
    pub key_id: i64,
    pub average_bpm: f64,
    pub location: String,
    pub sample_rate: f64,
    /// Mixxx star rating, 0-5.
    pub rating: i64,
    /// Mixxx packed RGB, when the track has a colour.
    pub color: Option<i64>,
    pub comment: String,
    pub cues: Vec<CuePoint>,
    pub tempo: Option<TempoAnchor>,
}

/// A hot cue, in seconds from the start of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePoint {
    pub num: i64,
    pub start_sec: f64,
}

/// Beatgrid anchor: where beat 1 of bar 1 falls, and the constant tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoAnchor {
    pub inizio_sec: f64,
    pub bpm: f64,
    pub beats_per_bar: u32,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub name: String,
    /// Collection `track_id`s in play order.
    pub track_ids: Vec<i64>,
}
