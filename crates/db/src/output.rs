//! Writer for the custom mapping table consumed by the path-fixing SQL.

use std::path::Path;

use rusqlite::{params, Connection};

use mixxtools_recon::model::MergeRow;

use crate::error::DbError;

pub fn open_connection(path: &Path) -> Result<Connection, DbError> {
    Connection::open(path).map_err(|e| DbError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write the merge result into `table`, all-or-nothing.
///
/// With `overwrite` the previous table is dropped first; a run therefore
/// replaces prior output wholesale. Without it, writing over an existing
/// table fails on the CREATE.
pub fn write_merge_table(
    conn: &mut Connection,
    table: &str,
    rows: &[MergeRow],
    overwrite: bool,
) -> Result<(), DbError> {
    if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DbError::Query(format!("invalid table name: '{table}'")));
    }

    let tx = conn.transaction()?;
    if overwrite {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;
    }
    tx.execute_batch(&format!(
        "CREATE TABLE {table} (
            lib_idx INTEGER NOT NULL,
            loc_idx INTEGER NOT NULL,
            path TEXT NOT NULL,
            filename TEXT NOT NULL,
            directory TEXT NOT NULL
        )"
    ))?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} (lib_idx, loc_idx, path, filename, directory) \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        ))?;
        for row in rows {
            stmt.execute(params![
                row.library_id,
                row.location_id,
                row.path,
                row.filename,
                row.directory,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}
