use std::collections::{HashMap, HashSet};

use crate::dto::evaluation::{EvaluationProgress, EvaluationStatusView};
use crate::models::{Criterion, CriterionScore, Evaluation, EvaluationStatus};

use super::scoring::clamp_score;

/// Normalize incoming scores against the hackathon's current criteria.
///
/// Keys that no criterion knows are dropped, repeated keys keep their first
/// occurrence and raw scores are clamped to `[0, max_score]`. Nothing here
/// rejects a save.
pub fn prepare_scores(criteria: &[Criterion], scores: Vec<CriterionScore>) -> Vec<CriterionScore> {
    let max_scores: HashMap<&str, _> = criteria
        .iter()
        .map(|c| (c.key.as_str(), c.max_score))
        .collect();
    let mut seen = HashSet::new();
    let mut prepared = Vec::with_capacity(scores.len());

    for mut score in scores {
        let Some(&max_score) = max_scores.get(score.criterion_key.as_str()) else {
            tracing::debug!(
                criterion_key = %score.criterion_key,
                "Dropping score for unknown criterion"
            );
            continue;
        };

        if !seen.insert(score.criterion_key.clone()) {
            continue;
        }

        let clamped = clamp_score(score.raw_score, max_score);
        if clamped != score.raw_score {
            tracing::debug!(
                criterion_key = %score.criterion_key,
                raw_score = %score.raw_score,
                clamped = %clamped,
                "Clamping out-of-range score"
            );
            score.raw_score = clamped;
        }

        prepared.push(score);
    }

    prepared
}

/// Presentation state of a (judge, submission) pair.
pub fn evaluation_status(evaluation: Option<&Evaluation>) -> EvaluationStatusView {
    let progress = match evaluation.map(|e| e.status) {
        None => EvaluationProgress::None,
        Some(EvaluationStatus::Draft) => EvaluationProgress::Draft,
        Some(EvaluationStatus::Submitted) => EvaluationProgress::Submitted,
    };

    let (label, visual_weight) = match progress {
        EvaluationProgress::None => ("Not started", 0),
        EvaluationProgress::Draft => ("Draft", 1),
        EvaluationProgress::Submitted => ("Submitted", 2),
    };

    EvaluationStatusView {
        status: progress,
        label: label.to_string(),
        visual_weight,
    }
}
