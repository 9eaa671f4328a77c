use std::fmt;

#[derive(Debug)]
pub enum ExportError {
    /// XML emission failed.
    Xml(String),
    /// A rating outside 0-5 cannot be mapped to the Rekordbox scale.
    BadRating { track_id: i64, rating: i64 },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(msg) => write!(f, "XML write error: {msg}"),
            Self::BadRating { track_id, rating } => {
                write!(f, "track {track_id}: rating {rating} is outside 0-5")
            }
        }
    }
}

impl std::error::Error for ExportError {}
