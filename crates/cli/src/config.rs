use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use mixxtools_recon::MatchConfig;

/// Full tool configuration, loaded from one TOML file and echoed back to the
/// operator before anything runs.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub mixxx: MixxxConfig,
    #[serde(default)]
    pub clementine: Option<ClementineConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct MixxxConfig {
    /// Path to `mixxxdb.sqlite`.
    pub db: PathBuf,
    /// Root of the music folder as Mixxx sees it.
    pub library_folder: String,
}

#[derive(Debug, Deserialize)]
pub struct ClementineConfig {
    /// Path to Clementine's `clementine.db`.
    pub db: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Database receiving the mapping table; defaults to the Clementine db
    /// when unset.
    #[serde(default)]
    pub db: Option<PathBuf>,
    #[serde(default = "default_output_table")]
    pub table: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            db: None,
            table: default_output_table(),
        }
    }
}

fn default_output_table() -> String {
    "mixxx_custom".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_xml_file")]
    pub xml_file: String,
    /// Root of the music folder as Rekordbox will see it. Defaults to the
    /// Mixxx folder when unset.
    #[serde(default)]
    pub rekordbox_library_folder: Option<String>,
    #[serde(default = "default_beats_per_bar")]
    pub beats_per_bar: u32,
    /// 1-based hot cue number marking a bar start; 0 disables the feature
    /// and the beatgrid blob drives the tempo anchor instead.
    #[serde(default)]
    pub bar_start_hot_cue: u32,
    #[serde(default)]
    pub add_crates_as_playlists: bool,
    #[serde(default = "default_crate_suffix")]
    pub crate_suffix: String,
    #[serde(default)]
    pub only_tracks_in_playlists: bool,
    /// Drop tracks whose comment mentions STEM exports.
    #[serde(default = "default_true")]
    pub filter_stem_tracks: bool,
    /// Encoder-delay compensation applied to cue and grid times of `.mp3`
    /// files, in milliseconds.
    #[serde(default)]
    pub mp3_offset_ms: i64,
}

fn default_xml_file() -> String {
    "rekordbox.xml".to_string()
}

fn default_beats_per_bar() -> u32 {
    4
}

fn default_crate_suffix() -> String {
    " [crate]".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            xml_file: default_xml_file(),
            rekordbox_library_folder: None,
            beats_per_bar: default_beats_per_bar(),
            bar_start_hot_cue: 0,
            add_crates_as_playlists: false,
            crate_suffix: default_crate_suffix(),
            only_tracks_in_playlists: false,
            filter_stem_tracks: true,
            mp3_offset_ms: 0,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(input: &str) -> Result<Self, String> {
        let config: AppConfig = toml::from_str(input).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.matching.validate().map_err(|e| e.to_string())?;
        if self.export.beats_per_bar == 0 {
            return Err("export.beats_per_bar must be at least 1".into());
        }
        if self.mixxx.library_folder.is_empty() {
            return Err("mixxx.library_folder must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[mixxx]
db = "/home/dj/.mixxx/mixxxdb.sqlite"
library_folder = "/home/dj/Music"
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.output.table, "mixxx_custom");
        assert_eq!(config.matching.merge_fields, vec!["artist", "title"]);
        assert_eq!(config.export.beats_per_bar, 4);
        assert_eq!(config.export.bar_start_hot_cue, 0);
        assert!(config.export.filter_stem_tracks);
        assert!(config.clementine.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config = AppConfig::from_toml(
            r#"
[mixxx]
db = "/x/mixxxdb.sqlite"
library_folder = "/x/Music"

[clementine]
db = "/x/clementine.db"

[output]
table = "fixed_paths"

[matching]
distance_threshold = 6
max_candidates = 3

[export]
xml_file = "out.xml"
rekordbox_library_folder = "/Volumes/DJ"
bar_start_hot_cue = 4
add_crates_as_playlists = true
mp3_offset_ms = 26
"#,
        )
        .unwrap();
        assert_eq!(config.output.table, "fixed_paths");
        assert_eq!(config.matching.distance_threshold, 6);
        assert_eq!(config.export.bar_start_hot_cue, 4);
        assert_eq!(config.export.mp3_offset_ms, 26);
        assert_eq!(
            config.export.rekordbox_library_folder.as_deref(),
            Some("/Volumes/DJ")
        );
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixxtools.toml");
        fs::write(&path, MINIMAL).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.mixxx.library_folder, "/home/dj/Music");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("/does/not/exist.toml")).unwrap_err();
        assert!(err.contains("cannot read config"));
    }

    #[test]
    fn invalid_matching_rejected() {
        let input = format!("{MINIMAL}\n[matching]\nmax_candidates = 0\n");
        assert!(AppConfig::from_toml(&input).is_err());
    }

    #[test]
    fn zero_beats_per_bar_rejected() {
        let input = format!("{MINIMAL}\n[export]\nbeats_per_bar = 0\n");
        assert!(AppConfig::from_toml(&input).is_err());
    }
}
