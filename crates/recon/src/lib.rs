//! `mixxtools-recon` — Track matching and merge-reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded, pre-normalized track rows from two
//! libraries and returns the merged mapping. No CLI or IO dependencies;
//! operator interaction goes through the [`Prompt`] port.

pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod matcher;
pub mod model;
pub mod resolve;

pub use config::MatchConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{MergeOutput, ReconOutcome, TrackRow};
pub use resolve::Prompt;
