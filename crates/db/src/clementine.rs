//! Reader for the Clementine `songs` table.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::DbError;
use crate::normalize::file_url_to_path;

/// One row of Clementine's `songs` table with its `file://` location
/// already resolved to a path.
///
/// Clementine keeps deleted tracks around, so callers are expected to drop
/// rows whose `path` no longer exists before matching.
#[derive(Debug, Clone)]
pub struct Song {
    pub rowid: i64,
    pub artist: String,
    pub title: String,
    pub album: String,
    pub path: PathBuf,
}

pub fn open_connection(path: &Path) -> Result<Connection, DbError> {
    Connection::open(path).map_err(|e| DbError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn open_songs(conn: &Connection) -> Result<Vec<Song>, DbError> {
    let mut stmt =
        conn.prepare("SELECT rowid, artist, title, album, filename FROM songs ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        ))
    })?;

    let mut songs = Vec::new();
    for row in rows {
        let (rowid, artist, title, album, filename) = row?;
        songs.push(Song {
            rowid,
            artist,
            title,
            album,
            path: file_url_to_path(&filename)?,
        });
    }
    Ok(songs)
}
