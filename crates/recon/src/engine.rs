use crate::config::MatchConfig;
use crate::error::ReconError;
use crate::fuzzy::propose_candidates;
use crate::matcher::match_exact;
use crate::model::{ConfirmedMatch, MergeOutput, MergeSummary, ReconOutcome, TrackRow};
use crate::resolve::{merge, resolve_one, Prompt};

/// Run the full reconciliation: exact match, fuzzy proposals over the
/// residuals, operator resolution, merge.
///
/// The truth residual is walked in ascending (artist, title) order so an
/// interactive session replays identically on identical inputs. A confirmed
/// player row leaves the candidate pool immediately: no player track can be
/// attached to two library tracks within one run.
pub fn run(
    config: &MatchConfig,
    truth: &[TrackRow],
    other: &[TrackRow],
    prompt: &mut dyn Prompt,
) -> Result<ReconOutcome, ReconError> {
    config.validate()?;

    if truth.is_empty() {
        return Ok(ReconOutcome::NothingToDo);
    }

    let exact = match_exact(truth, other, &config.merge_fields);

    let mut residual = exact.truth_residual.clone();
    residual.sort_by(|a, b| {
        (a.merge_value("artist"), a.merge_value("title"))
            .cmp(&(b.merge_value("artist"), b.merge_value("title")))
    });

    let mut pool: Vec<TrackRow> = exact.other_residual.clone();
    let mut confirmed: Vec<ConfirmedMatch> = Vec::new();
    let mut summary = MergeSummary {
        exact: exact.matched.len(),
        ..Default::default()
    };

    if !residual.is_empty() {
        prompt.say(&format!(
            "\n{} tracks have not been found: we find the closest match for each one…",
            residual.len()
        ));
    }

    for row in &residual {
        prompt.say(&format!(
            "\nFinding the closest match for library entry {:?}",
            row.merge_values(&config.merge_fields)
        ));

        let candidates = propose_candidates(row, &pool, config);
        if candidates.is_empty() {
            prompt.say(&format!(
                "\tCould not find a track with a similar name within the current \
                 maximum similarity distance ({}).",
                config.distance_threshold
            ));
            summary.no_proposal += 1;
            continue;
        }

        // Candidates carry stable indices; resolve against the live rows.
        let candidate_rows: Vec<&TrackRow> = candidates
            .iter()
            .filter_map(|c| pool.iter().find(|r| r.index == c.other_index))
            .collect();

        match resolve_one(&candidate_rows, &config.merge_fields, prompt)? {
            Some(position) => {
                let chosen = candidate_rows[position].clone();
                pool.retain(|r| r.index != chosen.index);
                confirmed.push(ConfirmedMatch {
                    truth: row.clone(),
                    other: chosen,
                });
                summary.confirmed += 1;
            }
            None => summary.skipped += 1,
        }
    }

    let rows = merge(&exact.matched, &confirmed);
    Ok(ReconOutcome::Completed(MergeOutput { rows, summary }))
}
