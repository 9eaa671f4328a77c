use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::DbError;

/// Strip "feat." annotations from an artist or title.
///
/// The guest credit sometimes sits in the artist field of one library and in
/// the title field of the other, so both sides are normalized before
/// matching. Handles `(feat. X)`, `[ft. X]`, and a bare trailing
/// `feat. X`, case-insensitively.
pub fn remove_feat(text: &str) -> String {
    static FEAT: OnceLock<Regex> = OnceLock::new();
    let feat = FEAT.get_or_init(|| {
        Regex::new(r"(?i)\s*[(\[]?\s*f(?:ea)?t\.?\s+[^)\]]*[)\]]?").unwrap()
    });
    feat.replace_all(text, "").trim().to_string()
}

/// Convert a `file://` URL (how Clementine stores locations) to a
/// filesystem path.
pub fn file_url_to_path(file_url: &str) -> Result<PathBuf, DbError> {
    let url = Url::parse(file_url).map_err(|_| DbError::BadUrl(file_url.to_string()))?;
    url.to_file_path()
        .map_err(|_| DbError::BadUrl(file_url.to_string()))
}
