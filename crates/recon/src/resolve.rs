use std::io;
use std::path::Path;

use crate::error::ReconError;
use crate::model::{ConfirmedMatch, MatchedPair, MergeRow, TrackRow};

/// Synchronous operator-interaction port. The CLI backs it with
/// stdin/stderr; tests script it.
pub trait Prompt {
    /// Display one line of text to the operator.
    fn say(&mut self, line: &str);
    /// Display a prompt and block for one line of input.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Present ranked candidates for one library row and block until the
/// operator answers.
///
/// Accepted answers: the empty string (skip) or a list position `0..n-1`.
/// Anything else re-prompts; invalid input is never an error. Returns the
/// chosen position within `candidates`, or `None` for a skip.
pub fn resolve_one(
    candidates: &[&TrackRow],
    merge_fields: &[String],
    prompt: &mut dyn Prompt,
) -> Result<Option<usize>, ReconError> {
    for (i, candidate) in candidates.iter().enumerate() {
        prompt.say(&format!("\t{i}:\t{:?}", candidate.merge_values(merge_fields)));
    }

    loop {
        let answer = prompt
            .ask("Please choose an index or leave empty to skip the operation: ")
            .map_err(|e| ReconError::Prompt(e.to_string()))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        if let Ok(position) = answer.parse::<usize>() {
            if position < candidates.len() {
                return Ok(Some(position));
            }
        }
    }
}

/// Union exact pairs and confirmed fuzzy matches into the final mapping.
///
/// Each row projects to the library-side identifiers plus the player-side
/// path, with filename and parent directory derived from the path.
pub fn merge(exact: &[MatchedPair], confirmed: &[ConfirmedMatch]) -> Vec<MergeRow> {
    exact
        .iter()
        .map(|p| (&p.truth, &p.other))
        .chain(confirmed.iter().map(|c| (&c.truth, &c.other)))
        .map(|(truth, other)| {
            let path = other.path.clone().unwrap_or_default();
            MergeRow {
                library_id: truth.library_id,
                location_id: truth.location_id.unwrap_or_default(),
                filename: Path::new(&path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                directory: Path::new(&path)
                    .parent()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path,
            }
        })
        .collect()
}
