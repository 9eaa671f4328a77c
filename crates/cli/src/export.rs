//! The `export-xml` flow: pull tracks, hot cues, beatgrids and playlists out
//! of the Mixxx database and write a Rekordbox `DJ_PLAYLISTS` document.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use url::Url;

use mixxtools_db::mixxx::{self, CueRow, LibraryTrack, TrackFilter};
use mixxtools_rekordbox::grid;
use mixxtools_rekordbox::{build_document, CollectionTrack, CuePoint, Playlist, TempoAnchor};

use crate::config::AppConfig;
use crate::exit_codes::{EXIT_EXPORT_ABORTED, EXIT_GRID_UNCONFIRMED, EXIT_SUCCESS};
use crate::prompt::confirm;
use crate::CliError;

pub fn run(config_path: &Path) -> Result<u8, CliError> {
    let config = AppConfig::load(config_path).map_err(CliError::usage)?;

    println!("Loaded configuration:\n{config:#?}");
    if !confirm("\nAre you OK with these settings (y/*)? : ")? {
        return Ok(EXIT_EXPORT_ABORTED);
    }
    if config.export.bar_start_hot_cue != 0 {
        println!(
            "Hot cue #{} will be used as the start-of-bar anchor for the beatgrid.",
            config.export.bar_start_hot_cue
        );
        if !confirm("Are you sure all these hot cues are snapped to the beatgrid (y/*)? : ")? {
            return Ok(EXIT_GRID_UNCONFIRMED);
        }
    }

    let conn = mixxx::open_connection(&config.mixxx.db)?;
    let mut tracks = mixxx::open_library(&conn, TrackFilter::OnlyPresent)?;

    if config.export.filter_stem_tracks {
        let before = tracks.len();
        tracks.retain(|t| !t.comment.to_lowercase().contains("stem"));
        let dropped = before - tracks.len();
        if dropped > 0 {
            println!("Filtered out {dropped} STEM tracks.");
        }
    }

    let locations: HashMap<i64, String> = mixxx::open_track_locations(&conn)?
        .into_iter()
        .map(|loc| (loc.id, loc.location))
        .collect();

    let mut cues_by_track: HashMap<i64, Vec<CueRow>> = HashMap::new();
    for cue in mixxx::open_cues(&conn, true)? {
        cues_by_track.entry(cue.track_id).or_default().push(cue);
    }

    let (playlist_rows, playlist_tracks) = mixxx::open_playlists_with_tracks(
        &conn,
        true,
        config.export.add_crates_as_playlists,
        &config.export.crate_suffix,
    )?;

    if config.export.only_tracks_in_playlists {
        let members: HashSet<i64> = playlist_tracks.iter().map(|t| t.track_id).collect();
        tracks.retain(|t| members.contains(&t.id));
    }

    let mixxx_folder = config.mixxx.library_folder.as_str();
    let rekordbox_folder = config
        .export
        .rekordbox_library_folder
        .as_deref()
        .unwrap_or(mixxx_folder);

    let mut collection = Vec::with_capacity(tracks.len());
    for track in &tracks {
        let location = match locations.get(&track.location_id) {
            Some(location) => location,
            None => {
                eprintln!(
                    "warning: track {} '{}' has no location row; skipping",
                    track.id, track.title
                );
                continue;
            }
        };
        collection.push(build_collection_track(
            track,
            location,
            mixxx_folder,
            rekordbox_folder,
            cues_by_track.get(&track.id).map_or(&[][..], Vec::as_slice),
            &config,
        ));
    }

    let exported: HashSet<i64> = collection.iter().map(|t| t.track_id).collect();
    let playlists: Vec<Playlist> = playlist_rows
        .iter()
        .map(|p| Playlist {
            name: p.name.clone(),
            track_ids: playlist_tracks
                .iter()
                .filter(|t| t.playlist_id == p.id && exported.contains(&t.track_id))
                .map(|t| t.track_id)
                .collect(),
        })
        .collect();

    let document = build_document(&collection, &playlists)?;
    for warning in &document.warnings {
        eprintln!("warning: {warning}");
    }

    let xml_path = Path::new(mixxx_folder).join(&config.export.xml_file);
    fs::write(&xml_path, &document.xml)?;
    println!(
        "Exported {} tracks and {} playlists.",
        collection.len(),
        playlists.len()
    );
    println!("==> {}", xml_path.display());
    Ok(EXIT_SUCCESS)
}

fn build_collection_track(
    track: &LibraryTrack,
    location: &str,
    mixxx_folder: &str,
    rekordbox_folder: &str,
    cues: &[CueRow],
    config: &AppConfig,
) -> CollectionTrack {
    let final_location = if location.starts_with(mixxx_folder) {
        location.replacen(mixxx_folder, rekordbox_folder, 1)
    } else {
        eprintln!(
            "warning: '{location}' lives outside the library folder; \
             its location is exported unchanged"
        );
        location.to_string()
    };

    // Rekordbox writes `file://localhost/...` URLs; match that form.
    let location_url = match Url::from_file_path(&final_location) {
        Ok(mut u) => {
            let _ = u.set_host(Some("localhost"));
            u.to_string()
        }
        Err(()) => {
            eprintln!("warning: cannot build a file URL for '{final_location}'");
            format!("file://localhost{final_location}")
        }
    };

    // Lossy encoders prepend silence that Mixxx compensates for but
    // Rekordbox does not, so cue and grid times shift for mp3 files.
    let offset_sec = if final_location.to_lowercase().ends_with(".mp3") {
        config.export.mp3_offset_ms as f64 / 1000.0
    } else {
        0.0
    };

    let cue_points: Vec<CuePoint> = cues
        .iter()
        .map(|cue| CuePoint {
            num: cue.hotcue,
            start_sec: grid::cue_position_to_sec(cue.position, track.samplerate) + offset_sec,
        })
        .collect();

    let tempo = tempo_anchor(track, &cue_points, offset_sec, config);
    if tempo.is_none() && track.bpm > 0.0 {
        eprintln!(
            "warning: track {} '{}' has no usable beatgrid; TEMPO omitted",
            track.id, track.title
        );
    }

    CollectionTrack {
        track_id: track.id,
        name: track.title.clone(),
        artist: track.artist.clone(),
        album: track.album.clone(),
        genre: track.genre.clone(),
        track_number: track.tracknumber.clone(),
        total_time_sec: track.duration,
        key_id: track.key_id,
        average_bpm: track.bpm,
        location: location_url,
        sample_rate: track.samplerate,
        rating: track.rating,
        color: track.color,
        comment: track.comment.clone(),
        cues: cue_points,
        tempo,
    }
}

/// Pick the grid origin: a designated bar-start hot cue when configured and
/// present, the `BeatGrid-2.0` blob otherwise.
fn tempo_anchor(
    track: &LibraryTrack,
    cues: &[CuePoint],
    offset_sec: f64,
    config: &AppConfig,
) -> Option<TempoAnchor> {
    if track.bpm <= 0.0 || track.beats_version != "BeatGrid-2.0" {
        return None;
    }
    let beats_per_bar = config.export.beats_per_bar;

    if config.export.bar_start_hot_cue != 0 {
        let wanted = config.export.bar_start_hot_cue as i64 - 1;
        if let Some(cue) = cues.iter().find(|c| c.num == wanted) {
            // The cue already carries the mp3 offset.
            return Some(TempoAnchor {
                inizio_sec: grid::bar_start_sec(cue.start_sec, track.bpm, beats_per_bar),
                bpm: track.bpm,
                beats_per_bar,
            });
        }
    }

    let blob = track.beats.as_deref()?;
    let info = grid::parse_beatgrid(blob, track.samplerate)?;
    Some(TempoAnchor {
        inizio_sec: info.first_beat_sec + offset_sec,
        bpm: info.bpm,
        beats_per_bar,
    })
}
