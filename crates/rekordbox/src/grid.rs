//! Beatgrid and cue time conversions.
//!
//! Mixxx stores `BeatGrid-2.0` data as a tiny protobuf blob (a BPM
//! submessage and a first-beat frame position). No crate in use here speaks
//! protobuf, so the two fields are pulled out with a minimal wire walk that
//! skips everything else.

/// Constant-tempo grid: where beat 1 falls and how fast the track runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatGridInfo {
    pub bpm: f64,
    pub first_beat_sec: f64,
}

/// Cue positions are stereo interleaved samples; two samples per frame.
pub fn cue_position_to_sec(position: i64, samplerate: f64) -> f64 {
    if samplerate <= 0.0 {
        return 0.0;
    }
    position as f64 / (2.0 * samplerate)
}

/// Pull a bar-anchor cue back to the first beat-1 at or after time zero.
///
/// The cue marks the start of *some* bar; subtracting whole bars gives the
/// grid origin Rekordbox wants as `Inizio`.
pub fn bar_start_sec(cue_sec: f64, bpm: f64, beats_per_bar: u32) -> f64 {
    if bpm <= 0.0 || beats_per_bar == 0 {
        return cue_sec;
    }
    let bar_len = beats_per_bar as f64 * 60.0 / bpm;
    cue_sec - bar_len * (cue_sec / bar_len).floor()
}

/// Decode the grid from a Mixxx `beats` blob. Returns `None` when the blob
/// is absent, truncated, or missing either field.
pub fn parse_beatgrid(blob: &[u8], samplerate: f64) -> Option<BeatGridInfo> {
    if samplerate <= 0.0 {
        return None;
    }
    let mut bpm: Option<f64> = None;
    let mut first_beat_frame: Option<i64> = None;

    let mut cursor = 0usize;
    while cursor < blob.len() {
        let (tag, next) = read_varint(blob, cursor)?;
        cursor = next;
        let field = tag >> 3;
        let wire_type = tag & 0x7;
        match (field, wire_type) {
            // Bpm submessage: { double bpm = 1; }
            (1, 2) => {
                let (len, next) = read_varint(blob, cursor)?;
                let end = next.checked_add(len as usize)?;
                bpm = read_double_field(blob.get(next..end)?, 1);
                cursor = end;
            }
            // Beat submessage: { int32 frame_position = 1; ... }
            (2, 2) => {
                let (len, next) = read_varint(blob, cursor)?;
                let end = next.checked_add(len as usize)?;
                first_beat_frame = read_varint_field(blob.get(next..end)?, 1).map(|v| v as i64);
                cursor = end;
            }
            _ => cursor = skip_field(blob, cursor, wire_type)?,
        }
    }

    let bpm = bpm.filter(|b| *b > 0.0)?;
    let frame = first_beat_frame?;
    Some(BeatGridInfo {
        bpm,
        first_beat_sec: frame as f64 / samplerate,
    })
}

fn read_varint(blob: &[u8], mut cursor: usize) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *blob.get(cursor)?;
        cursor += 1;
        value |= u64::from(byte & 0x7F).checked_shl(shift)?;
        if byte & 0x80 == 0 {
            return Some((value, cursor));
        }
        shift += 7;
        if shift >= 64 {
            return None;
        }
    }
}

fn skip_field(blob: &[u8], cursor: usize, wire_type: u64) -> Option<usize> {
    match wire_type {
        0 => read_varint(blob, cursor).map(|(_, next)| next),
        1 => (cursor + 8 <= blob.len()).then_some(cursor + 8),
        2 => {
            let (len, next) = read_varint(blob, cursor)?;
            let end = next + len as usize;
            (end <= blob.len()).then_some(end)
        }
        5 => (cursor + 4 <= blob.len()).then_some(cursor + 4),
        _ => None,
    }
}

fn read_double_field(body: &[u8], wanted: u64) -> Option<f64> {
    let mut cursor = 0usize;
    while cursor < body.len() {
        let (tag, next) = read_varint(body, cursor)?;
        cursor = next;
        if tag >> 3 == wanted && tag & 0x7 == 1 {
            let bytes: [u8; 8] = body.get(cursor..cursor + 8)?.try_into().ok()?;
            return Some(f64::from_le_bytes(bytes));
        }
        cursor = skip_field(body, cursor, tag & 0x7)?;
    }
    None
}

fn read_varint_field(body: &[u8], wanted: u64) -> Option<u64> {
    let mut cursor = 0usize;
    while cursor < body.len() {
        let (tag, next) = read_varint(body, cursor)?;
        cursor = next;
        if tag >> 3 == wanted && tag & 0x7 == 0 {
            return read_varint(body, cursor).map(|(v, _)| v);
        }
        cursor = skip_field(body, cursor, tag & 0x7)?;
    }
    None
}
