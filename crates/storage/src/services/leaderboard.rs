use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::dto::scoring::AggregateScore;
use crate::models::{Criterion, Evaluation, Submission};

use super::scoring::aggregate_submission;

/// Rank submissions by their aggregated score.
///
/// Submissions without a submitted evaluation are left out. Order is average
/// score descending, then evaluation count descending, then earliest
/// submission, then the order submissions were passed in. Ranks are
/// sequential with no shared positions.
///
/// Lifecycle gating is left to callers; this works on any state.
pub fn build_leaderboard(
    submissions: &[Submission],
    criteria: &[Criterion],
    evaluations: &[Evaluation],
) -> Vec<LeaderboardEntry> {
    let mut by_submission: HashMap<Uuid, Vec<&Evaluation>> = HashMap::new();
    for evaluation in evaluations {
        by_submission
            .entry(evaluation.submission_id)
            .or_default()
            .push(evaluation);
    }

    let mut ranked: Vec<(usize, &Submission, AggregateScore)> = submissions
        .iter()
        .enumerate()
        .map(|(position, submission)| {
            let evaluations = by_submission
                .get(&submission.submission_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let aggregate = aggregate_submission(
                submission.submission_id,
                criteria,
                evaluations.iter().copied(),
            );
            (position, submission, aggregate)
        })
        .filter(|(_, _, aggregate)| aggregate.evaluation_count > 0)
        .collect();

    ranked.sort_by(|(pos_a, sub_a, agg_a), (pos_b, sub_b, agg_b)| {
        agg_b
            .avg_score
            .cmp(&agg_a.avg_score)
            .then_with(|| agg_b.evaluation_count.cmp(&agg_a.evaluation_count))
            .then_with(|| sub_a.created_at.cmp(&sub_b.created_at))
            .then_with(|| pos_a.cmp(pos_b))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (_, submission, aggregate))| LeaderboardEntry {
            rank: idx as i64 + 1,
            submission_id: submission.submission_id,
            team_id: submission.team_id,
            avg_score: aggregate.rounded().avg_score,
            evaluation_count: aggregate.evaluation_count,
        })
        .collect()
}
