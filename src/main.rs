use axum::{
    Router,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ConditionDetailRes, ConditionSummary, HealthRes, HealthService, ListConditionsRes,
    MatchEntryRes, MatchReq, MatchRes, PlanRes,
};
use sra_catalog::Catalog;
use sra_core::{PersonalFactorAnnotator, TriageService};

/// Application state shared across REST API handlers.
///
/// Holds the triage service, which itself shares the immutable catalog
/// loaded once at startup.
#[derive(Clone)]
struct AppState {
    service: TriageService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_conditions, get_condition, get_recovery_plan, match_symptoms),
    components(schemas(
        HealthRes,
        ListConditionsRes,
        ConditionSummary,
        ConditionDetailRes,
        api_shared::StageRes,
        api_shared::TaskRes,
        api_shared::DosAndDontsRes,
        PlanRes,
        MatchReq,
        MatchRes,
        MatchEntryRes,
    ))
)]
struct ApiDoc;

/// Main entry point for the SRA REST server
///
/// Loads the condition/symptom catalog once, then serves the matching and
/// recovery-plan API over HTTP.
///
/// # Environment Variables
/// - `SRA_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `SRA_CATALOG_DIR`: directory containing `comprehensive.json` and
///   `conditions.json`; when unset the data sets compiled into the catalog
///   crate are used
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If catalog loading or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sra_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SRA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let catalog = match std::env::var("SRA_CATALOG_DIR").ok().map(PathBuf::from) {
        Some(dir) => {
            tracing::info!("++ Loading catalog from {}", dir.display());
            Catalog::from_dir(&dir)?
        }
        None => Catalog::embedded()?,
    };
    tracing::info!(
        conditions = catalog.conditions().len(),
        symptoms = catalog.symptoms().len(),
        "++ Catalog ready"
    );
    tracing::info!("++ Starting SRA REST on {}", addr);

    let service = TriageService::with_annotator(Arc::new(catalog), PersonalFactorAnnotator);

    let app = Router::new()
        .route("/health", get(health))
        .route("/conditions", get(list_conditions))
        .route("/conditions/:id", get(get_condition))
        .route("/conditions/:id/plan", get(get_recovery_plan))
        .route("/match", post(match_symptoms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the SRA service.
/// This endpoint is used for monitoring and load balancer health checks.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "All catalogued conditions", body = ListConditionsRes)
    )
)]
/// List all conditions in the catalog
///
/// Returns compact summaries in catalog scan order (primary source first).
async fn list_conditions(State(state): State<AppState>) -> Json<ListConditionsRes> {
    let conditions = state
        .service
        .catalog()
        .conditions()
        .iter()
        .map(|condition| ConditionSummary::from(condition.as_ref()))
        .collect();
    Json(ListConditionsRes { conditions })
}

#[utoipa::path(
    get,
    path = "/conditions/{id}",
    responses(
        (status = 200, description = "Condition detail", body = ConditionDetailRes),
        (status = 404, description = "Unknown condition identifier")
    )
)]
/// Fetch one condition by id or name slug
///
/// The identifier may be an authored id, a stringified legacy numeric id, or
/// the name-derived slug used in links.
async fn get_condition(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ConditionDetailRes>, StatusCode> {
    match state.service.find_condition(id.as_str()) {
        Some(condition) => Ok(Json(ConditionDetailRes::from(condition.as_ref()))),
        None => {
            tracing::info!(identifier = %id, "condition not found");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

#[utoipa::path(
    get,
    path = "/conditions/{id}/plan",
    responses(
        (status = 200, description = "Staged recovery plan", body = PlanRes),
        (status = 404, description = "Unknown condition identifier")
    )
)]
/// Fetch the staged recovery plan for a condition
///
/// Authored stage content is returned as-is; stages without tasks receive a
/// standard synthesized task set with deterministic task ids.
async fn get_recovery_plan(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<PlanRes>, StatusCode> {
    match state.service.recovery_plan(id.as_str()) {
        Some(plan) => Ok(Json(PlanRes::from(&plan))),
        None => {
            tracing::info!(identifier = %id, "no recovery plan: condition not found");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

#[utoipa::path(
    post,
    path = "/match",
    request_body = MatchReq,
    responses(
        (status = 200, description = "Ranked condition matches", body = MatchRes)
    )
)]
/// Rank conditions against reported symptoms
///
/// An empty symptom list yields an empty result set rather than an error, so
/// callers can distinguish "no input" from "no match" by the request they
/// sent.
async fn match_symptoms(
    State(state): State<AppState>,
    Json(req): Json<MatchReq>,
) -> Json<MatchRes> {
    let results = state
        .service
        .match_symptoms(&req.symptoms, req.personal_factors.as_ref());
    Json(MatchRes {
        generated_at: chrono::Utc::now().to_rfc3339(),
        results: results.iter().map(MatchEntryRes::from).collect(),
    })
}
