use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

pub mod error;
pub mod types;

use crate::db::models::{MatchRecord, Player, PredictionRecord, Team, TeamStats};
use crate::db::{Database, PlayerFilter};
use crate::predictor::{MatchContext, NoiseProvider, PredictionStrategy};
use error::ApiError;
use types::{
    LimitQuery, LiveMatch, PlayerQuery, PredictRequest, ScoreResponse, WinResponse,
};

const MATCH_LIST_LIMIT: i64 = 50;
const DEFAULT_PREDICTION_LIMIT: i64 = 50;
const MAX_PREDICTION_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub strategy: Arc<PredictionStrategy>,
    pub noise: NoiseProvider,
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/teams", get(teams_handler))
        .route("/api/teams/:id", get(team_handler))
        .route("/api/team-stats/:id", get(team_stats_handler))
        .route("/api/players", get(players_handler))
        .route("/api/players/:id", get(player_handler))
        .route("/api/matches", get(matches_handler))
        .route("/api/live-scores", get(live_scores_handler))
        .route("/api/predict_score", post(predict_score_handler))
        .route("/api/predict_win", post(predict_win_handler))
        .route("/api/predictions", get(predictions_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /health
///
/// 503 with `"status": "degraded"` when the database does not answer.
async fn health_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (code, status, database) = match state.db.ping() {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            warn!("Health check could not reach database: {:#}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "disconnected")
        }
    };
    let body = json!({
        "status": status,
        "timestamp": Utc::now(),
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
        "strategy": state.strategy.name(),
    });
    (code, Json(body))
}

/// GET /api/teams
async fn teams_handler(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Team>> {
    Ok(Json(state.db.list_teams()?))
}

/// GET /api/teams/:id
async fn team_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Team> {
    state
        .db
        .get_team(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("team"))
}

/// GET /api/team-stats/:id
async fn team_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<TeamStats> {
    state
        .db
        .team_stats(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("team"))
}

/// GET /api/players?team_id=1&role=Batsman
async fn players_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PlayerQuery>,
) -> ApiResult<Vec<Player>> {
    let filter = PlayerFilter {
        team_id: q.team_id,
        role: q.role.filter(|r| !r.trim().is_empty()),
    };
    Ok(Json(state.db.list_players(&filter)?))
}

/// GET /api/players/:id
async fn player_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Player> {
    state
        .db
        .get_player(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("player"))
}

/// GET /api/matches
async fn matches_handler(State(state): State<Arc<AppState>>) -> ApiResult<Vec<MatchRecord>> {
    Ok(Json(state.db.list_matches(MATCH_LIST_LIMIT)?))
}

/// GET /api/live-scores
///
/// Canned feed; there is no live data source behind it.
async fn live_scores_handler() -> Json<Vec<LiveMatch>> {
    Json(vec![LiveMatch {
        match_id: 1,
        team1: "Mumbai Indians".into(),
        team2: "Chennai Super Kings".into(),
        status: "Live".into(),
        current_score: "145/4 (16.2 overs)".into(),
        target: "186".into(),
        required: "41 runs from 22 balls".into(),
        current_rr: "8.75".into(),
        required_rr: "11.18".into(),
        last_updated: Utc::now(),
    }])
}

/// POST /api/predict_score
async fn predict_score_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<ScoreResponse> {
    let Json(req) = body?;
    let ctx = req.score_context()?;
    let prediction = state
        .noise
        .with(|noise| state.strategy.predict_score(&ctx, noise));
    let response = ScoreResponse::new(&prediction, state.strategy.name());
    debug!(
        "Score prediction {} v {} at {}: {} ({:.1}%)",
        ctx.team1, ctx.team2, ctx.venue, response.predicted_score, response.confidence
    );

    let mut record = new_record("score", &state, &ctx);
    record.predicted_score = Some(response.predicted_score);
    record.confidence = Some(response.confidence);
    persist(&state.db, &record);

    Ok(Json(response))
}

/// POST /api/predict_win
async fn predict_win_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<WinResponse> {
    let Json(req) = body?;
    let ctx = req.win_context()?;
    let prediction = state.strategy.predict_win(&ctx);
    let response = WinResponse::new(&prediction, state.strategy.name());
    debug!(
        "Win prediction {} v {} at {}: {:.1}% / {:.1}%",
        ctx.team1,
        ctx.team2,
        ctx.venue,
        response.team1_win_probability,
        response.team2_win_probability
    );

    let mut record = new_record("win", &state, &ctx);
    record.team1_win_probability = Some(response.team1_win_probability);
    record.team2_win_probability = Some(response.team2_win_probability);
    persist(&state.db, &record);

    Ok(Json(response))
}

/// GET /api/predictions?limit=50
async fn predictions_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LimitQuery>,
) -> ApiResult<Vec<PredictionRecord>> {
    let limit = q
        .limit
        .unwrap_or(DEFAULT_PREDICTION_LIMIT)
        .clamp(1, MAX_PREDICTION_LIMIT);
    Ok(Json(state.db.list_predictions(limit)?))
}

fn new_record(kind: &str, state: &AppState, ctx: &MatchContext) -> PredictionRecord {
    PredictionRecord {
        id: None,
        kind: kind.to_string(),
        strategy: state.strategy.name().to_string(),
        team1: ctx.team1.to_string(),
        team2: ctx.team2.to_string(),
        venue: ctx.venue.to_string(),
        predicted_score: None,
        confidence: None,
        team1_win_probability: None,
        team2_win_probability: None,
        created_at: Utc::now(),
    }
}

/// Store a served prediction. Failures are logged, not returned.
fn persist(db: &Database, record: &PredictionRecord) {
    if let Err(e) = db.insert_prediction(record) {
        warn!("Failed to store {} prediction: {:#}", record.kind, e);
    }
}
