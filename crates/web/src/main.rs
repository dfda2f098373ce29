use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::{assignments, criteria, evaluations, leaderboard};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        criteria::handlers::get_criteria,
        criteria::handlers::set_criteria,
        assignments::handlers::list_assignments,
        assignments::handlers::auto_assign,
        assignments::handlers::get_workload,
        assignments::handlers::get_stats,
        assignments::handlers::get_judge_teams,
        assignments::handlers::assign_teams,
        assignments::handlers::remove_judge,
        evaluations::handlers::save_evaluation,
        evaluations::handlers::get_evaluation,
        evaluations::handlers::get_judge_statuses,
        evaluations::handlers::get_submission_score,
        leaderboard::handlers::get_leaderboard,
    ),
    components(
        schemas(
            storage::dto::criteria::CriterionInput,
            storage::dto::criteria::SetCriteriaRequest,
            storage::dto::criteria::CriteriaResponse,
            storage::dto::assignment::AutoAssignRequest,
            storage::dto::assignment::AssignTeamsRequest,
            storage::dto::assignment::JudgeAssignment,
            storage::dto::assignment::AssignmentsResponse,
            storage::dto::assignment::JudgeWorkload,
            storage::dto::assignment::TeamCoverage,
            storage::dto::assignment::WorkloadSummary,
            storage::dto::assignment::AssignmentStats,
            storage::dto::evaluation::SaveEvaluationRequest,
            storage::dto::evaluation::EvaluationProgress,
            storage::dto::evaluation::EvaluationStatusView,
            storage::dto::evaluation::EvaluationResponse,
            storage::dto::evaluation::JudgeSubmissionStatus,
            storage::dto::scoring::AggregateScore,
            storage::dto::scoring::CriterionContribution,
            storage::dto::scoring::ScoreBreakdown,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Criterion,
            storage::models::CriterionScore,
            storage::models::Evaluation,
            storage::models::EvaluationStatus,
            storage::models::HackathonStatus,
            storage::models::AssignmentMode,
        )
    ),
    tags(
        (name = "criteria", description = "Scoring rubric per hackathon"),
        (name = "assignments", description = "Judge to team allocation"),
        (name = "evaluations", description = "Judge evaluations and submission scores"),
        (name = "leaderboard", description = "Published rankings"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn app(db: Database, api_keys: ApiKeys) -> Router {
    let hackathon_routes = Router::new()
        .merge(criteria::routes::routes(api_keys.clone()))
        .merge(assignments::routes::routes(api_keys.clone()))
        .merge(leaderboard::routes::routes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/hackathons", hackathon_routes)
        .nest("/api/evaluations", evaluations::routes::routes(api_keys))
        .nest("/api/judges", evaluations::routes::judge_routes())
        .nest("/api/submissions", evaluations::routes::submission_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting hackathon judging API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every protected route will answer 401");
    }

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db, api_keys)).await?;

    Ok(())
}
