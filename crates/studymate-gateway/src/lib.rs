//! HTTP gateway for Studymate.
//!
//! A thin request adapter: it turns an inbound prompt (plus optional
//! document references) into one agent run and returns the final answer
//! together with the list of tools the run invoked.
//!
//! Built on Axum.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use studymate_agent::{AgentLoop, Attachment};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: Arc<AgentLoop>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/respond", post(respond_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn serve(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "gateway listening");
    axum::serve(listener, build_router(state)).await
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Inbound request: a prompt plus up to two document references.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RespondRequest {
    prompt: String,
    #[serde(default)]
    chapter_file: Option<String>,
    #[serde(default)]
    questions_file: Option<String>,
}

#[derive(Serialize)]
struct RespondResponse {
    text: String,
    tools: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn respond_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut attachments = Vec::new();
    if let Some(chapter) = payload.chapter_file {
        attachments.push(Attachment::new("chapter file", chapter));
    }
    if let Some(questions) = payload.questions_file {
        attachments.push(Attachment::new("questions file", questions));
    }

    info!(
        prompt_len = payload.prompt.len(),
        attachments = attachments.len(),
        "respond request received"
    );

    match state.agent.run(&payload.prompt, &attachments).await {
        Ok(run) => Ok(Json(RespondResponse {
            text: run.text,
            tools: run.tools_invoked,
        })),
        Err(e) => {
            error!(error = %e, "agent run failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
