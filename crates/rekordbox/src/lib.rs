//! `mixxtools-rekordbox` — Rekordbox XML document builder.
//!
//! Pure crate: receives fully resolved track/playlist structs, returns the
//! `DJ_PLAYLISTS` document as a string plus any data-quality warnings. File
//! writing and database access stay with the caller.

pub mod color;
pub mod document;
pub mod error;
pub mod grid;
pub mod key;
pub mod model;

pub use document::{build_document, Document};
pub use error::ExportError;
pub use model::{CollectionTrack, CuePoint, Playlist, TempoAnchor};
