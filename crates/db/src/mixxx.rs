//! Readers for the Mixxx library database.

use std::path::Path;

use rusqlite::Connection;

use crate::error::DbError;

/// Offset applied to crate ids when crates are exposed as pseudo-playlists,
/// keeping them clear of real playlist ids.
const CRATE_PLAYLIST_ID_OFFSET: i64 = 1_000_000;

/// Which library rows to load, judged by the on-disk state recorded in
/// `track_locations.fs_deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFilter {
    All,
    /// Tracks whose file is still present — the export set.
    OnlyPresent,
    /// Tracks whose file went missing — the reconcile set.
    OnlyMissing,
}

/// One row of the `library` table, with text columns null-defaulted.
#[derive(Debug, Clone)]
pub struct LibraryTrack {
    pub id: i64,
    pub location_id: i64,
    pub artist: String,
    pub title: String,
    pub album: String,
    pub genre: String,
    pub tracknumber: String,
    pub comment: String,
    pub duration: f64,
    pub bpm: f64,
    pub samplerate: f64,
    pub rating: i64,
    pub key_id: i64,
    pub color: Option<i64>,
    pub beats: Option<Vec<u8>>,
    pub beats_version: String,
}

#[derive(Debug, Clone)]
pub struct TrackLocation {
    pub id: i64,
    pub location: String,
    pub fs_deleted: bool,
}

/// One cue row. Positions are in stereo interleaved samples.
#[derive(Debug, Clone)]
pub struct CueRow {
    pub track_id: i64,
    pub position: i64,
    pub hotcue: i64,
}

#[derive(Debug, Clone)]
pub struct PlaylistRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PlaylistTrackRow {
    pub playlist_id: i64,
    pub track_id: i64,
    pub position: i64,
}

pub fn open_connection(path: &Path) -> Result<Connection, DbError> {
    Connection::open(path).map_err(|e| DbError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn open_library(conn: &Connection, filter: TrackFilter) -> Result<Vec<LibraryTrack>, DbError> {
    let condition = match filter {
        TrackFilter::All => "",
        TrackFilter::OnlyPresent => "AND loc.fs_deleted = 0",
        TrackFilter::OnlyMissing => "AND loc.fs_deleted = 1",
    };
    let sql = format!(
        "SELECT lib.id, lib.location, lib.artist, lib.title, lib.album, lib.genre, \
                lib.tracknumber, lib.comment, lib.duration, lib.bpm, lib.samplerate, \
                lib.rating, lib.key_id, lib.color, lib.beats, lib.beats_version \
         FROM library lib \
         JOIN track_locations loc ON loc.id = lib.location \
         WHERE lib.mixxx_deleted = 0 {condition} \
         ORDER BY lib.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(LibraryTrack {
            id: row.get(0)?,
            location_id: row.get(1)?,
            artist: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            title: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            album: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            genre: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            tracknumber: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            comment: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            duration: row.get::<_, Option<f64>>(8)?.unwrap_or_default(),
            bpm: row.get::<_, Option<f64>>(9)?.unwrap_or_default(),
            samplerate: row.get::<_, Option<f64>>(10)?.unwrap_or_default(),
            rating: row.get::<_, Option<i64>>(11)?.unwrap_or_default(),
            key_id: row.get::<_, Option<i64>>(12)?.unwrap_or_default(),
            color: row.get(13)?,
            beats: row.get(14)?,
            beats_version: row.get::<_, Option<String>>(15)?.unwrap_or_default(),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn open_track_locations(conn: &Connection) -> Result<Vec<TrackLocation>, DbError> {
    let mut stmt =
        conn.prepare("SELECT id, location, fs_deleted FROM track_locations ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(TrackLocation {
            id: row.get(0)?,
            location: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            fs_deleted: row.get::<_, i64>(2)? != 0,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn open_cues(conn: &Connection, only_hot_cues: bool) -> Result<Vec<CueRow>, DbError> {
    let condition = if only_hot_cues { "WHERE hotcue >= 0" } else { "" };
    let sql =
        format!("SELECT track_id, position, hotcue FROM cues {condition} ORDER BY track_id, hotcue");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(CueRow {
            track_id: row.get(0)?,
            position: row.get(1)?,
            hotcue: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Load playlists with their track memberships, optionally hiding Mixxx's
/// internal hidden playlists and optionally appending crates as
/// pseudo-playlists (name suffixed, ids offset).
pub fn open_playlists_with_tracks(
    conn: &Connection,
    filter_hidden: bool,
    add_crates_as_playlists: bool,
    crate_suffix: &str,
) -> Result<(Vec<PlaylistRow>, Vec<PlaylistTrackRow>), DbError> {
    let condition = if filter_hidden { "WHERE hidden = 0" } else { "" };
    let sql = format!("SELECT id, name FROM Playlists {condition} ORDER BY position");
    let mut stmt = conn.prepare(&sql)?;
    let mut playlists: Vec<PlaylistRow> = stmt
        .query_map([], |row| {
            Ok(PlaylistRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT playlist_id, track_id, position FROM PlaylistTracks ORDER BY playlist_id, position",
    )?;
    let mut playlist_tracks: Vec<PlaylistTrackRow> = stmt
        .query_map([], |row| {
            Ok(PlaylistTrackRow {
                playlist_id: row.get(0)?,
                track_id: row.get(1)?,
                position: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if add_crates_as_playlists {
        let mut stmt = conn.prepare("SELECT id, name FROM crates ORDER BY name")?;
        let crates: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn
            .prepare("SELECT crate_id, track_id FROM crate_tracks ORDER BY crate_id, track_id")?;
        let crate_tracks: Vec<(i64, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        for (crate_id, name) in crates {
            let playlist_id = crate_id + CRATE_PLAYLIST_ID_OFFSET;
            playlists.push(PlaylistRow {
                id: playlist_id,
                name: format!("{name}{crate_suffix}"),
            });
            // Crates carry no ordering, so membership order stands in.
            for (position, (_, track_id)) in crate_tracks
                .iter()
                .filter(|(c, _)| *c == crate_id)
                .enumerate()
            {
                playlist_tracks.push(PlaylistTrackRow {
                    playlist_id,
                    track_id: *track_id,
                    position: position as i64,
                });
            }
        }
    }

    Ok((playlists, playlist_tracks))
}
