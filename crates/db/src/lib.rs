//! `mixxtools-db` — SQLite access to the Mixxx and Clementine databases.
//!
//! Readers return plain row structs; nothing here mutates the source
//! databases. The only writer is [`output::write_merge_table`], which
//! replaces the custom mapping table wholesale.

pub mod clementine;
pub mod error;
pub mod mixxx;
pub mod normalize;
pub mod output;

pub use error::DbError;
