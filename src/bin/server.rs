//! structview HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use structview::prelude::*;
use structview::selection::{PickThresholds, RecordingNotifier};

const DEFAULT_ADDR: &str = "0.0.0.0:8087";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct SceneRequest {
    structure: Structure,
    #[serde(default)]
    config: Option<ViewConfig>,
}

#[derive(Debug, Serialize)]
struct SceneResponse {
    success: bool,
    error: Option<String>,
    report: Option<SceneReport>,
}

#[derive(Debug, Deserialize)]
struct SelectRequest {
    structure: Structure,
    #[serde(default)]
    config: Option<ViewConfig>,
    ray: Ray,
    #[serde(default)]
    state: SelectionState,
}

#[derive(Debug, Serialize)]
struct SelectResponse {
    success: bool,
    error: Option<String>,
    state: Option<SelectionState>,
    alerts: Vec<String>,
    panel: Option<PanelReport>,
    panel_text: Option<String>,
}

impl SelectResponse {
    fn failed(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            state: None,
            alerts: Vec::new(),
            panel: None,
            panel_text: None,
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn scene(Json(request): Json<SceneRequest>) -> impl IntoResponse {
    match request.structure.validate() {
        Ok(()) => {
            let config = request.config.unwrap_or_default();
            let report = SceneBuilder::new(config).build(&request.structure);
            (
                StatusCode::OK,
                Json(SceneResponse {
                    success: true,
                    error: None,
                    report: Some(report),
                }),
            )
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(SceneResponse {
                success: false,
                error: Some(e.to_string()),
                report: None,
            }),
        ),
    }
}

async fn select(Json(request): Json<SelectRequest>) -> impl IntoResponse {
    match run_select(request) {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => (StatusCode::BAD_REQUEST, Json(SelectResponse::failed(e.to_string()))),
    }
}

fn run_select(request: SelectRequest) -> Result<SelectResponse, ViewError> {
    request.structure.validate()?;
    if request.ray.direction.norm() < f64::EPSILON {
        return Err(ViewError::InvalidInput("ray direction is zero".to_string()));
    }

    let config = request.config.unwrap_or_default();
    let report = SceneBuilder::new(config.clone()).build(&request.structure);
    let ray = Ray::new(request.ray.origin, request.ray.direction);
    let mut state = request.state;
    let mut notifier = RecordingNotifier::default();
    state.handle_pointer_down(
        PointerButton::Primary,
        &ray,
        &report.scene,
        &request.structure,
        &PickThresholds::from(&config),
        &mut notifier,
    );

    let panel = ResultsPanel::from(&config).report(&request.structure, &state);
    Ok(SelectResponse {
        success: true,
        error: None,
        state: Some(state),
        alerts: notifier.alerts,
        panel_text: Some(panel.to_string()),
        panel: Some(panel),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/scene", post(scene))
        .route("/api/v1/select", post(select))
        .layer(cors);

    let addr_text = std::env::var("STRUCTVIEW_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_text
        .parse()
        .with_context(|| format!("invalid STRUCTVIEW_ADDR '{}'", addr_text))?;
    println!("structview server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Scene:        POST /api/v1/scene");
    println!("  Select:       POST /api/v1/select");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
