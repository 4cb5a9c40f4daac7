use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info};

use crate::api::{
    ApiControls, ApiCurveRequest, ApiEvaluateRequest, ApiHeatmapResponse, ApiPreset,
    ApiPresetsResponse, ApiRandomRequest, ApiTableQuery, ApiTableResponse,
};
use curve_blend::curve::{self, random_curve, DEFAULT_PRESET};
use curve_blend::scoring::{axis_labels, validate_inputs, ScoreSettings};
use curve_blend::{evaluate, BlendError, BlendSession, Evaluation, SessionSnapshot};

type ApiError = (StatusCode, String);

#[derive(Clone)]
struct AppState {
    defaults: ScoreSettings,
    default_views: i32,
    default_earnings: i32,
    session: Arc<Mutex<BlendSession>>,
}

pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub web_root: String,
    pub session: BlendSession,
}

pub async fn serve(options: ServeOptions) -> Result<(), String> {
    let state = AppState {
        defaults: options.session.settings(),
        default_views: options.session.views(),
        default_earnings: options.session.earnings(),
        session: Arc::new(Mutex::new(options.session)),
    };

    let web_root = options.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/presets", get(presets_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/session", get(session_handler))
        .route("/api/session/curve", put(curve_handler))
        .route("/api/session/controls", put(controls_handler))
        .route("/api/session/random", post(random_handler))
        .route("/api/session/heatmap", get(heatmap_handler))
        .route("/api/session/table", get(table_handler))
        .nest_service("/", static_service)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", options.host, options.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "serving curve blend api");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn presets_handler() -> Result<Json<ApiPresetsResponse>, ApiError> {
    let mut presets = Vec::new();
    for &name in curve::preset_names() {
        let curve = curve::preset(name).map_err(internal)?;
        presets.push(ApiPreset {
            name,
            points: curve.points().to_vec(),
        });
    }
    Ok(Json(ApiPresetsResponse {
        default: DEFAULT_PRESET,
        presets,
    }))
}

async fn evaluate_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiEvaluateRequest>,
) -> Result<Json<Evaluation>, ApiError> {
    let mut settings = state.defaults;
    request.controls.apply(&mut settings).map_err(bad_request)?;
    let views = request.controls.views.unwrap_or(state.default_views);
    let earnings = request.controls.earnings.unwrap_or(state.default_earnings);
    let curve = request.curve.into_curve().map_err(bad_request)?;

    let evaluation = evaluate(&curve, settings, views, earnings).map_err(blend_error)?;
    debug!(curve_id = %evaluation.curve_id, score = evaluation.score, "evaluated request");
    Ok(Json(evaluation))
}

async fn session_handler(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let guard = state.session.lock().await;
    Json(guard.snapshot())
}

async fn curve_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiCurveRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let curve = request.into_curve().map_err(bad_request)?;
    let mut guard = state.session.lock().await;
    guard.set_curve(curve);
    debug!(revision = guard.revision(), "session curve replaced");
    Ok(Json(guard.snapshot()))
}

async fn controls_handler(
    State(state): State<AppState>,
    Json(controls): Json<ApiControls>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let mut guard = state.session.lock().await;
    let mut settings = guard.settings();
    controls.apply(&mut settings).map_err(bad_request)?;

    validate_inputs(controls.views, controls.earnings, &settings).map_err(blend_error)?;

    if settings != guard.settings() {
        guard.set_settings(settings);
    }
    if let Some(views) = controls.views {
        guard.set_views(views);
    }
    if let Some(earnings) = controls.earnings {
        guard.set_earnings(earnings);
    }
    Ok(Json(guard.snapshot()))
}

async fn random_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRandomRequest>,
) -> Json<SessionSnapshot> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let curve = random_curve(&mut rng);
    let mut guard = state.session.lock().await;
    guard.set_curve(curve);
    Json(guard.snapshot())
}

async fn heatmap_handler(State(state): State<AppState>) -> Json<ApiHeatmapResponse> {
    let guard = state.session.lock().await;
    Json(ApiHeatmapResponse {
        revision: guard.revision(),
        curve_id: guard.curve().fingerprint(),
        heatmap: guard.heatmap().clone(),
        labels: axis_labels(),
    })
}

async fn table_handler(
    State(state): State<AppState>,
    Query(query): Query<ApiTableQuery>,
) -> Result<Json<ApiTableResponse>, ApiError> {
    let kind = query.kind().map_err(bad_request)?;
    let guard = state.session.lock().await;
    Ok(Json(ApiTableResponse {
        revision: guard.revision(),
        kind,
        rows: guard.pipeline().table(kind),
    }))
}

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, message)
}

fn blend_error(err: BlendError) -> ApiError {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn internal(err: BlendError) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
