use std::fmt;

#[derive(Debug)]
pub enum DbError {
    /// Cannot open the database file.
    Open { path: String, message: String },
    /// A query failed (missing table/column, malformed database).
    Query(String),
    /// A `file://` URL in the player database cannot be turned into a path.
    BadUrl(String),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot open database '{path}': {message}"),
            Self::Query(msg) => write!(f, "query error: {msg}"),
            Self::BadUrl(url) => write!(f, "cannot convert file URL to a path: {url}"),
        }
    }
}

impl std::error::Error for DbError {}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Query(e.to_string())
    }
}
