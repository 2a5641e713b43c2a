//! HTTP route definitions

use axum::{
    extract::{Extension, Path, State},
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::app::AppState;
use crate::game::{
    AttackError, AttackOutcome, Coordinate, GameSummary, GameView, ServiceError, TeamId,
};
use crate::game::setup::SetupError;
use crate::http::middleware::{require_auth, AuthenticatedPlayer};
use crate::util::time::uptime_secs;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - support multiple origins (comma-separated in CLIENT_ORIGIN)
    let allowed_origins: Vec<header::HeaderValue> = state
        .config
        .client_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<header::HeaderValue>().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/games", get(list_games_handler).post(create_game_handler))
        .route("/games/:game_id", get(game_handler))
        .route("/games/:game_id/attack", post(attack_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    active_games: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        active_games: state.games.active_games(),
    })
}

// ============================================================================
// Game endpoints
// ============================================================================

#[derive(Deserialize)]
struct CreateGameRequest {
    opponents: Vec<Uuid>,
}

#[derive(Serialize)]
struct CreateGameResponse {
    game_id: Uuid,
}

async fn create_game_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), AppError> {
    let game_id = state.games.create(auth.player_id, &req.opponents)?;
    Ok((StatusCode::CREATED, Json(CreateGameResponse { game_id })))
}

#[derive(Serialize)]
struct GameListResponse {
    games: Vec<GameSummary>,
}

async fn list_games_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
) -> Json<GameListResponse> {
    Json(GameListResponse {
        games: state.games.list_for_player(auth.player_id),
    })
}

async fn game_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameView>, AppError> {
    let view = state.games.view(game_id, auth.player_id)?;
    Ok(Json(view))
}

#[derive(Deserialize)]
struct AttackRequest {
    target_team: TeamId,
    x: i32,
    y: i32,
}

async fn attack_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
    Json(req): Json<AttackRequest>,
) -> Result<Json<AttackOutcome>, AppError> {
    if !state.attack_limiters.check_attack(auth.player_id) {
        return Err(AppError::RateLimited);
    }

    let outcome = state.games.attack(
        game_id,
        auth.player_id,
        req.target_team,
        Coordinate::new(req.x, req.y),
    )?;
    Ok(Json(outcome))
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::NotFound(_) => AppError::NotFound(message),
            ServiceError::NotParticipant => AppError::Forbidden(message),
            ServiceError::Attack(AttackError::DeadTarget | AttackError::NotYourTurn) => {
                AppError::Conflict(message)
            }
            ServiceError::Attack(AttackError::InvalidTarget | AttackError::OutOfBounds) => {
                AppError::BadRequest(message)
            }
            ServiceError::Setup(SetupError::PlacementFailed(_)) | ServiceError::Store(_) => {
                AppError::Internal(message)
            }
            ServiceError::Setup(_) => AppError::BadRequest(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
