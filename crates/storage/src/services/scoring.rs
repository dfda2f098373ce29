use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::scoring::{AggregateScore, CriterionContribution, ScoreBreakdown};
use crate::models::{Criterion, CriterionScore, Evaluation};

/// Clamp a raw score into `[0, max_score]`.
pub fn clamp_score(raw_score: Decimal, max_score: Decimal) -> Decimal {
    raw_score.max(Decimal::ZERO).min(max_score.max(Decimal::ZERO))
}

/// Weighted per-criterion contributions of one set of raw scores.
///
/// Each criterion contributes `score / max_score * weight`. Criteria without
/// a matching score contribute nothing and scores for unknown keys are
/// ignored, so partially filled drafts still produce a running total. The
/// weight sum is not normalized.
pub fn score_breakdown(criteria: &[Criterion], scores: &[CriterionScore]) -> ScoreBreakdown {
    let mut total = Decimal::ZERO;
    let mut contributions = Vec::new();

    for criterion in criteria {
        if criterion.max_score <= Decimal::ZERO {
            continue;
        }

        let Some(score) = scores
            .iter()
            .find(|s| s.criterion_key == criterion.key)
        else {
            continue;
        };

        let raw_score = clamp_score(score.raw_score, criterion.max_score);
        // multiply first so full marks yield exactly the weight
        let points = raw_score * criterion.weight / criterion.max_score;
        total += points;

        contributions.push(CriterionContribution {
            criterion_key: criterion.key.clone(),
            raw_score,
            max_score: criterion.max_score,
            weight: criterion.weight,
            points,
        });
    }

    ScoreBreakdown {
        total,
        contributions,
    }
}

pub fn score_submission(criteria: &[Criterion], scores: &[CriterionScore]) -> Decimal {
    score_breakdown(criteria, scores).total
}

/// Mean total over the submitted evaluations of `submission_id`.
///
/// Drafts and evaluations of other submissions are skipped. With nothing
/// submitted the result is `{ avg_score: 0, evaluation_count: 0 }`.
pub fn aggregate_submission<'a>(
    submission_id: Uuid,
    criteria: &[Criterion],
    evaluations: impl IntoIterator<Item = &'a Evaluation>,
) -> AggregateScore {
    let (sum, count) = evaluations
        .into_iter()
        .filter(|e| e.submission_id == submission_id && e.is_submitted())
        .fold((Decimal::ZERO, 0i64), |(sum, count), e| {
            (sum + score_submission(criteria, &e.scores), count + 1)
        });

    let avg_score = if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    };

    AggregateScore {
        submission_id,
        avg_score,
        evaluation_count: count,
    }
}

impl AggregateScore {
    /// Two decimal places, for responses
    pub fn rounded(mut self) -> Self {
        self.avg_score = self.avg_score.round_dp(2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluationStatus;
    use chrono::Utc;

    fn criterion(key: &str, max_score: Decimal, weight: Decimal) -> Criterion {
        Criterion {
            key: key.to_string(),
            display_name: key.to_string(),
            description: None,
            max_score,
            weight,
        }
    }

    fn score(key: &str, raw_score: Decimal) -> CriterionScore {
        CriterionScore {
            criterion_key: key.to_string(),
            raw_score,
            comment: None,
        }
    }

    fn hackathon_criteria() -> Vec<Criterion> {
        vec![
            criterion("innovation", Decimal::from(10), Decimal::from(60)),
            criterion("impact", Decimal::from(10), Decimal::from(40)),
        ]
    }

    fn evaluation(
        submission_id: Uuid,
        status: EvaluationStatus,
        scores: Vec<CriterionScore>,
    ) -> Evaluation {
        let now = Utc::now().naive_utc();
        Evaluation {
            evaluation_id: Uuid::new_v4(),
            judge_id: Uuid::new_v4(),
            submission_id,
            scores,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn weighted_scores_match_worked_example() {
        let scores = vec![
            score("innovation", Decimal::from(8)),
            score("impact", Decimal::from(5)),
        ];
        assert_eq!(
            score_submission(&hackathon_criteria(), &scores),
            Decimal::from(68)
        );
    }

    #[test]
    fn full_marks_give_exactly_one_hundred() {
        let lists = vec![
            hackathon_criteria(),
            vec![
                criterion("a", Decimal::from(7), Decimal::new(3333, 2)),
                criterion("b", Decimal::from(3), Decimal::new(3333, 2)),
                criterion("c", Decimal::from(9), Decimal::new(3334, 2)),
            ],
            vec![
                criterion("only", Decimal::new(25, 1), Decimal::from(100)),
                criterion("zero", Decimal::from(4), Decimal::ZERO),
            ],
        ];

        for criteria in lists {
            let scores: Vec<_> = criteria.iter().map(|c| score(&c.key, c.max_score)).collect();
            assert_eq!(
                score_submission(&criteria, &scores),
                Decimal::ONE_HUNDRED,
                "criteria {:?}",
                criteria
            );
        }
    }

    #[test]
    fn no_scores_give_zero() {
        assert_eq!(score_submission(&hackathon_criteria(), &[]), Decimal::ZERO);
        assert_eq!(score_submission(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn missing_criteria_contribute_nothing() {
        let scores = vec![score("innovation", Decimal::from(5))];
        let breakdown = score_breakdown(&hackathon_criteria(), &scores);
        assert_eq!(breakdown.total, Decimal::from(30));
        assert_eq!(breakdown.contributions.len(), 1);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let scores = vec![
            score("innovation", Decimal::from(14)),
            score("impact", Decimal::from(-3)),
        ];
        let breakdown = score_breakdown(&hackathon_criteria(), &scores);
        assert_eq!(breakdown.total, Decimal::from(60));
        assert_eq!(breakdown.contributions[0].raw_score, Decimal::from(10));
        assert_eq!(breakdown.contributions[1].raw_score, Decimal::ZERO);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let scores = vec![
            score("presentation", Decimal::from(10)),
            score("impact", Decimal::from(10)),
        ];
        assert_eq!(
            score_submission(&hackathon_criteria(), &scores),
            Decimal::from(40)
        );
    }

    #[test]
    fn aggregate_averages_only_submitted_evaluations() {
        let submission_id = Uuid::new_v4();
        let evaluations = vec![
            evaluation(
                submission_id,
                EvaluationStatus::Submitted,
                vec![
                    score("innovation", Decimal::from(8)),
                    score("impact", Decimal::from(5)),
                ],
            ),
            evaluation(
                submission_id,
                EvaluationStatus::Submitted,
                vec![
                    score("innovation", Decimal::from(10)),
                    score("impact", Decimal::from(8)),
                ],
            ),
            evaluation(
                submission_id,
                EvaluationStatus::Draft,
                vec![score("innovation", Decimal::from(1))],
            ),
            evaluation(
                Uuid::new_v4(),
                EvaluationStatus::Submitted,
                vec![score("innovation", Decimal::from(1))],
            ),
        ];

        let aggregate = aggregate_submission(submission_id, &hackathon_criteria(), &evaluations);

        // (68 + 92) / 2
        assert_eq!(aggregate.avg_score, Decimal::from(80));
        assert_eq!(aggregate.evaluation_count, 2);
    }

    #[test]
    fn aggregate_without_submissions_is_zero() {
        let submission_id = Uuid::new_v4();
        let evaluations = vec![evaluation(
            submission_id,
            EvaluationStatus::Draft,
            vec![score("impact", Decimal::from(10))],
        )];

        let aggregate = aggregate_submission(submission_id, &hackathon_criteria(), &evaluations);

        assert_eq!(
            aggregate,
            AggregateScore {
                submission_id,
                avg_score: Decimal::ZERO,
                evaluation_count: 0,
            }
        );
    }

    #[test]
    fn rounded_keeps_two_decimals() {
        let aggregate = AggregateScore {
            submission_id: Uuid::new_v4(),
            avg_score: Decimal::from(209) / Decimal::from(3),
            evaluation_count: 3,
        };
        assert_eq!(aggregate.rounded().avg_score, Decimal::new(6967, 2));
    }
}
