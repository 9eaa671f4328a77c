//! Emission of the `DJ_PLAYLISTS` interchange document.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::color::rgb_to_rekordbox_color;
use crate::error::ExportError;
use crate::key::key_id_to_lancelot;
use crate::model::{CollectionTrack, Playlist};

/// Mixxx star ratings → the Rekordbox 0-255 scale.
const RATING_SCALE: [i64; 6] = [0, 51, 102, 153, 204, 255];

/// The built document plus data-quality warnings gathered along the way.
/// Warnings never abort the export; the caller decides where they go.
#[derive(Debug)]
pub struct Document {
    pub xml: String,
    pub warnings: Vec<String>,
}

/// Build the full document: collection first, then the playlist tree with
/// playlists sorted by name.
pub fn build_document(
    tracks: &[CollectionTrack],
    playlists: &[Playlist],
) -> Result<Document, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut warnings = Vec::new();

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ExportError::Xml(e.to_string()))?;

    let mut root = BytesStart::new("DJ_PLAYLISTS");
    root.push_attribute(("Version", "1.0.0"));
    writer.write_event(Event::Start(root)).map_err(|e| ExportError::Xml(e.to_string()))?;

    let mut product = BytesStart::new("PRODUCT");
    product.push_attribute(("Name", "rekordbox"));
    product.push_attribute(("Version", "6.7.7"));
    product.push_attribute(("Company", "AlphaTheta"));
    writer.write_event(Event::Empty(product)).map_err(|e| ExportError::Xml(e.to_string()))?;

    let mut collection = BytesStart::new("COLLECTION");
    collection.push_attribute(("Entries", tracks.len().to_string().as_str()));
    writer.write_event(Event::Start(collection)).map_err(|e| ExportError::Xml(e.to_string()))?;
    for track in tracks {
        write_track(&mut writer, track, &mut warnings)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("COLLECTION")))
        .map_err(|e| ExportError::Xml(e.to_string()))?;

    write_playlists(&mut writer, playlists)?;

    writer
        .write_event(Event::End(BytesEnd::new("DJ_PLAYLISTS")))
        .map_err(|e| ExportError::Xml(e.to_string()))?;

    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| ExportError::Xml(e.to_string()))?;
    Ok(Document { xml, warnings })
}

fn write_track(
    writer: &mut Writer<Vec<u8>>,
    track: &CollectionTrack,
    warnings: &mut Vec<String>,
) -> Result<(), ExportError> {
    if track.artist.replace(' ', "").is_empty() {
        warnings.push(format!("artist name is empty for: {}", track.location));
    }
    if track.name.replace(' ', "").is_empty() {
        warnings.push(format!("track name is empty for: {}", track.location));
    }
    if track.average_bpm <= 50.0 {
        warnings.push(format!("suspicious BPM for: {}", track.location));
    }

    let rating = usize::try_from(track.rating)
        .ok()
        .and_then(|r| RATING_SCALE.get(r))
        .ok_or(ExportError::BadRating {
            track_id: track.track_id,
            rating: track.rating,
        })?;

    let mut elem = BytesStart::new("TRACK");
    elem.push_attribute(("TrackID", track.track_id.to_string().as_str()));
    elem.push_attribute(("Name", track.name.as_str()));
    elem.push_attribute(("Artist", track.artist.as_str()));
    elem.push_attribute(("Album", track.album.as_str()));
    elem.push_attribute(("TrackNumber", track.track_number.as_str()));
    elem.push_attribute(("Genre", track.genre.as_str()));
    elem.push_attribute(("TotalTime", format!("{}", track.total_time_sec.round()).as_str()));
    match key_id_to_lancelot(track.key_id) {
        Some(tonality) => elem.push_attribute(("Tonality", tonality)),
        None => warnings.push(format!("no usable key id for: {}", track.location)),
    }
    elem.push_attribute(("AverageBpm", track.average_bpm.to_string().as_str()));
    elem.push_attribute(("Location", track.location.as_str()));
    elem.push_attribute(("SampleRate", track.sample_rate.to_string().as_str()));
    elem.push_attribute(("Rating", rating.to_string().as_str()));
    if !track.comment.replace(' ', "").is_empty() {
        elem.push_attribute(("Comments", track.comment.as_str()));
    }
    if let Some(rgb) = track.color {
        elem.push_attribute(("Colour", rgb_to_rekordbox_color(rgb)));
    }

    let has_children = !track.cues.is_empty() || track.tempo.is_some();
    if !has_children {
        return writer.write_event(Event::Empty(elem)).map_err(|e| ExportError::Xml(e.to_string()));
    }

    writer.write_event(Event::Start(elem)).map_err(|e| ExportError::Xml(e.to_string()))?;

    for cue in &track.cues {
        // Each hot cue is written twice: once as a memory cue (Num="-1"),
        // once under its own number.
        for num in [-1, cue.num] {
            let mut mark = BytesStart::new("POSITION_MARK");
            mark.push_attribute(("Type", "0"));
            mark.push_attribute(("Num", num.to_string().as_str()));
            mark.push_attribute(("Start", format!("{:.3}", cue.start_sec).as_str()));
            writer.write_event(Event::Empty(mark)).map_err(|e| ExportError::Xml(e.to_string()))?;
        }
    }

    if let Some(tempo) = &track.tempo {
        let mut elem = BytesStart::new("TEMPO");
        elem.push_attribute(("Inizio", format!("{:.3}", tempo.inizio_sec).as_str()));
        elem.push_attribute(("Bpm", tempo.bpm.to_string().as_str()));
        elem.push_attribute((
            "Metro",
            format!("{}/{}", tempo.beats_per_bar, tempo.beats_per_bar).as_str(),
        ));
        elem.push_attribute(("Battito", "1"));
        writer.write_event(Event::Empty(elem)).map_err(|e| ExportError::Xml(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("TRACK")))
        .map_err(|e| ExportError::Xml(e.to_string()))
}

fn write_playlists(
    writer: &mut Writer<Vec<u8>>,
    playlists: &[Playlist],
) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new("PLAYLISTS")))
        .map_err(|e| ExportError::Xml(e.to_string()))?;

    let mut root = BytesStart::new("NODE");
    root.push_attribute(("Type", "0"));
    root.push_attribute(("Name", "ROOT"));
    root.push_attribute(("Count", playlists.len().to_string().as_str()));
    writer.write_event(Event::Start(root)).map_err(|e| ExportError::Xml(e.to_string()))?;

    let mut sorted: Vec<&Playlist> = playlists.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for playlist in sorted {
        let mut node = BytesStart::new("NODE");
        node.push_attribute(("Name", playlist.name.as_str()));
        node.push_attribute(("Type", "1"));
        node.push_attribute(("KeyType", "0"));
        node.push_attribute(("Entries", playlist.track_ids.len().to_string().as_str()));
        writer.write_event(Event::Start(node)).map_err(|e| ExportError::Xml(e.to_string()))?;
        for track_id in &playlist.track_ids {
            let mut entry = BytesStart::new("TRACK");
            entry.push_attribute(("Key", track_id.to_string().as_str()));
            writer.write_event(Event::Empty(entry)).map_err(|e| ExportError::Xml(e.to_string()))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("NODE")))
            .map_err(|e| ExportError::Xml(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("NODE")))
        .map_err(|e| ExportError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("PLAYLISTS")))
        .map_err(|e| ExportError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CuePoint, TempoAnchor};
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn track(id: i64, name: &str) -> CollectionTrack {
        CollectionTrack {
            track_id: id,
            name: name.to_string(),
            artist: "Daft Punk".to_string(),
            album: "Discovery".to_string(),
            genre: "House".to_string(),
            track_number: "1".to_string(),
            total_time_sec: 320.4,
            key_id: 1,
            average_bpm: 123.0,
            location: "file://localhost/music/a.mp3".to_string(),
            sample_rate: 44100.0,
            rating: 4,
            color: None,
            comment: String::new(),
            cues: Vec::new(),
            tempo: None,
        }
    }

    fn attr(start: &BytesStart, name: &str) -> Option<String> {
        start
            .attributes()
            .flatten()
            .find(|a| a.key.as_ref() == name.as_bytes())
            .map(|a| String::from_utf8(a.value.to_vec()).unwrap())
    }

    #[test]
    fn collection_counts_and_track_attributes() {
        let doc = build_document(&[track(1, "One More Time")], &[]).unwrap();
        assert!(doc.xml.starts_with("<?xml"));

        let mut reader = Reader::from_str(&doc.xml);
        let mut saw_track = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"COLLECTION" => {
                    assert_eq!(attr(&e, "Entries").unwrap(), "1");
                }
                Event::Empty(e) if e.name().as_ref() == b"TRACK" => {
                    saw_track = true;
                    assert_eq!(attr(&e, "TrackID").unwrap(), "1");
                    assert_eq!(attr(&e, "Name").unwrap(), "One More Time");
                    assert_eq!(attr(&e, "TotalTime").unwrap(), "320");
                    assert_eq!(attr(&e, "Tonality").unwrap(), "8B");
                    assert_eq!(attr(&e, "Rating").unwrap(), "204");
                    assert!(attr(&e, "Comments").is_none());
                }
                Event::Eof => break,
                _ => {}
            }
        }
        assert!(saw_track);
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn hot_cues_write_memory_and_numbered_marks() {
        let mut t = track(1, "Aerodynamic");
        t.cues = vec![CuePoint { num: 0, start_sec: 1.5 }];
        t.tempo = Some(TempoAnchor { inizio_sec: 0.025, bpm: 123.0, beats_per_bar: 4 });
        let doc = build_document(&[t], &[]).unwrap();

        let mut reader = Reader::from_str(&doc.xml);
        let mut nums = Vec::new();
        let mut tempo_metro = None;
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) if e.name().as_ref() == b"POSITION_MARK" => {
                    assert_eq!(attr(&e, "Start").unwrap(), "1.500");
                    nums.push(attr(&e, "Num").unwrap());
                }
                Event::Empty(e) if e.name().as_ref() == b"TEMPO" => {
                    assert_eq!(attr(&e, "Inizio").unwrap(), "0.025");
                    tempo_metro = attr(&e, "Metro");
                }
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(nums, vec!["-1", "0"]);
        assert_eq!(tempo_metro.as_deref(), Some("4/4"));
    }

    #[test]
    fn playlists_sorted_by_name_with_track_keys() {
        let playlists = vec![
            Playlist { name: "Warmup".to_string(), track_ids: vec![2, 1] },
            Playlist { name: "Peak".to_string(), track_ids: vec![3] },
        ];
        let doc = build_document(&[], &playlists).unwrap();

        let mut reader = Reader::from_str(&doc.xml);
        let mut names = Vec::new();
        let mut keys = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"NODE" => {
                    if let Some(name) = attr(&e, "Name") {
                        if name != "ROOT" {
                            names.push(name);
                        } else {
                            assert_eq!(attr(&e, "Count").unwrap(), "2");
                        }
                    }
                }
                Event::Empty(e) if e.name().as_ref() == b"TRACK" => {
                    keys.push(attr(&e, "Key").unwrap());
                }
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(names, vec!["Peak", "Warmup"]);
        assert_eq!(keys, vec!["3", "2", "1"]);
    }

    #[test]
    fn empty_artist_and_bad_key_warn_but_export() {
        let mut t = track(1, "Untitled");
        t.artist = "  ".to_string();
        t.key_id = 0;
        let doc = build_document(&[t], &[]).unwrap();
        assert_eq!(doc.warnings.len(), 2);
        assert!(doc.warnings[0].contains("artist name is empty"));
        assert!(doc.warnings[1].contains("key id"));
        assert!(!doc.xml.contains("Tonality"));
    }

    #[test]
    fn out_of_range_rating_is_an_error() {
        let mut t = track(1, "Broken");
        t.rating = 9;
        let err = build_document(&[t], &[]).unwrap_err();
        assert!(err.to_string().contains("rating 9"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut t = track(1, "Cut & Paste <live>");
        t.artist = "\"A\" & B".to_string();
        let doc = build_document(&[t], &[]).unwrap();
        assert!(doc.xml.contains("Cut &amp; Paste &lt;live&gt;"));

        let mut reader = Reader::from_str(&doc.xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) if e.name().as_ref() == b"TRACK" => {
                    assert_eq!(attr(&e, "Name").unwrap(), "Cut &amp; Paste &lt;live&gt;");
                    break;
                }
                Event::Eof => panic!("no TRACK element"),
                _ => {}
            }
        }
    }
}
