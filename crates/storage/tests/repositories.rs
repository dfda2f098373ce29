use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    error::{Result, StorageError},
    models::{Criterion, CriterionScore, EvaluationStatus},
    repository::{
        assignment::AssignmentRepository, criteria::CriteriaRepository,
        evaluation::EvaluationRepository, leaderboard::LeaderboardRepository,
    },
    services::{allocation::auto_assign, criteria::weights_balanced},
};
use uuid::Uuid;

async fn seed_hackathon(pool: &PgPool, status: &str) -> Result<Uuid> {
    let hackathon_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO hackathons (name, slug, status) VALUES ($1, $2, $3) RETURNING hackathon_id",
    )
    .bind("Spring Jam")
    .bind(format!("spring-jam-{}", Uuid::new_v4()))
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(hackathon_id)
}

async fn seed_judges(pool: &PgPool, hackathon_id: Uuid, count: usize) -> Result<Vec<Uuid>> {
    let mut judges = Vec::with_capacity(count);
    for position in 0..count {
        let judge_id = Uuid::new_v4();
        sqlx::query("INSERT INTO hackathon_judges (hackathon_id, judge_id, position) VALUES ($1, $2, $3)")
            .bind(hackathon_id)
            .bind(judge_id)
            .bind(position as i32)
            .execute(pool)
            .await?;
        judges.push(judge_id);
    }
    Ok(judges)
}

async fn seed_team(pool: &PgPool, hackathon_id: Uuid) -> Result<Uuid> {
    let team_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO teams (hackathon_id, name) VALUES ($1, $2) RETURNING team_id",
    )
    .bind(hackathon_id)
    .bind("Team")
    .fetch_one(pool)
    .await?;

    Ok(team_id)
}

async fn seed_submission(pool: &PgPool, team_id: Uuid) -> Result<Uuid> {
    let submission_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO submissions (team_id, is_final) VALUES ($1, TRUE) RETURNING submission_id",
    )
    .bind(team_id)
    .fetch_one(pool)
    .await?;

    Ok(submission_id)
}

fn criterion(key: &str, max_score: Decimal, weight: Decimal) -> Criterion {
    Criterion {
        key: key.to_string(),
        display_name: key.to_uppercase(),
        description: None,
        max_score,
        weight,
    }
}

fn score(key: &str, raw: i64) -> CriterionScore {
    CriterionScore {
        criterion_key: key.to_string(),
        raw_score: Decimal::from(raw),
        comment: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn criteria_round_trip_keeps_order_and_precision(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "open").await?;
    let repo = CriteriaRepository::new(&pool);
    let items = vec![
        criterion("innovation", Decimal::new(1, 3), Decimal::new(33335, 3)),
        criterion("impact", Decimal::from(10), Decimal::new(66665, 3)),
    ];

    repo.replace(hackathon_id, &items).await?;
    let stored = repo.get(hackathon_id).await?;

    assert_eq!(stored, items);
    assert!(weights_balanced(&stored));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn large_max_score_is_stored_as_given(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "open").await?;
    let repo = CriteriaRepository::new(&pool);
    let items = vec![criterion("scale", Decimal::from(1_000_000_000), Decimal::ONE_HUNDRED)];

    repo.replace(hackathon_id, &items).await?;

    assert_eq!(repo.get(hackathon_id).await?, items);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn unset_criteria_differ_from_explicit_empty_list(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "draft").await?;
    let repo = CriteriaRepository::new(&pool);

    assert!(matches!(repo.get(hackathon_id).await, Err(StorageError::NotFound)));
    assert!(repo.get_or_empty(hackathon_id).await?.is_empty());

    repo.replace(hackathon_id, &[]).await?;
    assert!(repo.get(hackathon_id).await?.is_empty());
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn referenced_keys_survive_replacement(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "running").await?;
    let team_id = seed_team(&pool, hackathon_id).await?;
    let submission_id = seed_submission(&pool, team_id).await?;
    let repo = CriteriaRepository::new(&pool);
    repo.replace(
        hackathon_id,
        &[
            criterion("innovation", Decimal::from(10), Decimal::from(60)),
            criterion("impact", Decimal::from(10), Decimal::from(40)),
        ],
    )
    .await?;

    EvaluationRepository::new(&pool)
        .upsert(
            Uuid::new_v4(),
            submission_id,
            &[score("innovation", 8)],
            EvaluationStatus::Draft,
        )
        .await?;

    let dropped = repo
        .replace(
            hackathon_id,
            &[criterion("impact", Decimal::from(10), Decimal::ONE_HUNDRED)],
        )
        .await;
    assert!(matches!(dropped, Err(StorageError::Validation(_))));

    repo.replace(
        hackathon_id,
        &[criterion("innovation", Decimal::from(5), Decimal::ONE_HUNDRED)],
    )
    .await?;
    assert_eq!(repo.get(hackathon_id).await?.len(), 1);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn closed_hackathon_rejects_criteria_changes(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "closed").await?;

    let result = CriteriaRepository::new(&pool)
        .replace(
            hackathon_id,
            &[criterion("innovation", Decimal::from(10), Decimal::ONE_HUNDRED)],
        )
        .await;

    assert!(matches!(result, Err(StorageError::InvalidState(_))));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_auto_assign_keeps_previous_mapping(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "open").await?;
    seed_judges(&pool, hackathon_id, 2).await?;
    for _ in 0..3 {
        seed_team(&pool, hackathon_id).await?;
    }
    let repo = AssignmentRepository::new(&pool);

    let planned = repo
        .replace_all(hackathon_id, |judges, teams| auto_assign(judges, teams, 1))
        .await?;
    assert_eq!(planned.rows().len(), 3);

    let failed = repo
        .replace_all(hackathon_id, |judges, teams| auto_assign(judges, teams, 3))
        .await;
    assert!(matches!(
        failed,
        Err(StorageError::InsufficientJudges {
            required: 3,
            available: 2
        })
    ));

    let stored = repo.get_map(hackathon_id).await?;
    assert_eq!(stored.rows(), planned.rows());
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn resaved_draft_keeps_submitted_status(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "running").await?;
    let team_id = seed_team(&pool, hackathon_id).await?;
    let submission_id = seed_submission(&pool, team_id).await?;
    let judge_id = Uuid::new_v4();
    let repo = EvaluationRepository::new(&pool);

    repo.upsert(
        judge_id,
        submission_id,
        &[score("innovation", 8)],
        EvaluationStatus::Submitted,
    )
    .await?;
    let resaved = repo
        .upsert(
            judge_id,
            submission_id,
            &[score("innovation", 9)],
            EvaluationStatus::Draft,
        )
        .await?;

    assert_eq!(resaved.status, EvaluationStatus::Submitted);
    assert_eq!(resaved.scores, vec![score("innovation", 9)]);
    assert_eq!(repo.list_for_submission(submission_id).await?.len(), 1);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn leaderboard_snapshot_reads_only_submitted_evaluations(pool: PgPool) -> Result<()> {
    let hackathon_id = seed_hackathon(&pool, "closed").await?;
    let team_id = seed_team(&pool, hackathon_id).await?;
    let submission_id = seed_submission(&pool, team_id).await?;
    let evaluations = EvaluationRepository::new(&pool);
    evaluations
        .upsert(
            Uuid::new_v4(),
            submission_id,
            &[score("innovation", 7)],
            EvaluationStatus::Submitted,
        )
        .await?;
    evaluations
        .upsert(
            Uuid::new_v4(),
            submission_id,
            &[score("innovation", 2)],
            EvaluationStatus::Draft,
        )
        .await?;

    let snapshot = LeaderboardRepository::new(&pool).snapshot(hackathon_id).await?;

    assert_eq!(snapshot.submissions.len(), 1);
    assert_eq!(snapshot.evaluations.len(), 1);
    assert!(snapshot.evaluations[0].is_submitted());
    Ok(())
}
