//! The `fix-paths` flow: match Mixxx tracks whose file went missing against
//! the Clementine library, then write the resulting mapping table.

use std::collections::HashMap;
use std::path::Path;

use mixxtools_db::mixxx::{self, TrackFilter};
use mixxtools_db::normalize::remove_feat;
use mixxtools_db::{clementine, output};
use mixxtools_recon::model::ReconOutcome;
use mixxtools_recon::TrackRow;

use crate::config::AppConfig;
use crate::exit_codes::{EXIT_RECON_ABORTED, EXIT_SUCCESS};
use crate::prompt::{confirm, StdinPrompt};
use crate::CliError;

pub fn run(config_path: &Path) -> Result<u8, CliError> {
    let config = AppConfig::load(config_path).map_err(CliError::usage)?;
    let clementine_db = match &config.clementine {
        Some(c) => c.db.clone(),
        None => {
            return Err(CliError::usage(
                "fix-paths needs a [clementine] section with the player database path",
            ))
        }
    };

    let mixxx_conn = mixxx::open_connection(&config.mixxx.db)?;
    let missing = mixxx::open_library(&mixxx_conn, TrackFilter::OnlyMissing)?;
    if missing.is_empty() {
        println!("No missing tracks, congratulation!");
        return Ok(EXIT_SUCCESS);
    }
    println!("{} tracks in Mixxx point at files that no longer exist.", missing.len());

    // The player rescans on startup; a stale library would propose moves to
    // files that are themselves gone.
    if !confirm("Did you refresh Clementine's library (y/*)? : ")? {
        println!("Well do it <3");
        return Ok(EXIT_RECON_ABORTED);
    }

    let clem_conn = clementine::open_connection(&clementine_db)?;
    let mut songs = clementine::open_songs(&clem_conn)?;
    songs.retain(|song| song.path.exists());

    let truth: Vec<TrackRow> = missing
        .iter()
        .enumerate()
        .map(|(index, track)| TrackRow {
            index,
            library_id: track.id,
            location_id: Some(track.location_id),
            path: None,
            fields: HashMap::from([
                ("artist".to_string(), remove_feat(&track.artist)),
                ("title".to_string(), remove_feat(&track.title)),
                ("album".to_string(), track.album.clone()),
            ]),
        })
        .collect();

    let other: Vec<TrackRow> = songs
        .iter()
        .enumerate()
        .map(|(index, song)| TrackRow {
            index,
            library_id: song.rowid,
            location_id: None,
            path: Some(song.path.to_string_lossy().into_owned()),
            fields: HashMap::from([
                ("artist".to_string(), remove_feat(&song.artist)),
                ("title".to_string(), remove_feat(&song.title)),
                ("album".to_string(), song.album.clone()),
            ]),
        })
        .collect();

    let mut prompt = StdinPrompt;
    let outcome = mixxtools_recon::run(&config.matching, &truth, &other, &mut prompt)?;
    let merged = match outcome {
        ReconOutcome::NothingToDo => {
            println!("No missing tracks, congratulation!");
            return Ok(EXIT_SUCCESS);
        }
        ReconOutcome::Completed(merged) => merged,
    };

    println!(
        "Matched {} tracks ({} exact, {} confirmed); {} skipped, {} without a proposal.",
        merged.summary.exact + merged.summary.confirmed,
        merged.summary.exact,
        merged.summary.confirmed,
        merged.summary.skipped,
        merged.summary.no_proposal,
    );
    for row in &merged.rows {
        println!("\t{} <- {}", row.library_id, row.path);
    }

    let output_db = config.output.db.as_deref().unwrap_or(&clementine_db);
    let mut out_conn = output::open_connection(output_db)?;
    output::write_merge_table(&mut out_conn, &config.output.table, &merged.rows, true)?;
    println!(
        "Wrote {} rows into '{}' of {}.",
        merged.rows.len(),
        config.output.table,
        output_db.display(),
    );
    println!(
        "If applying the table fails with \"UNIQUE CONSTRAINT FAILED\", \
         check the hidden tracks in Mixxx: a hidden row may already claim the new path."
    );
    Ok(EXIT_SUCCESS)
}
