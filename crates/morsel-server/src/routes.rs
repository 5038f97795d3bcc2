//! HTTP and WebSocket routes for the dashboard server.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{Html, IntoResponse, Json},
    routing::get,
};
use futures::{SinkExt, StreamExt};
use morsel_core::RegionFilter;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::dashboard::Dashboard;
use crate::error::{ServerError, ServerResult};
use crate::protocol::{ClientMessage, ServerMessage};

/// Application state shared across handlers.
pub struct AppState {
    /// Read-only dashboard over the loaded records.
    pub dashboard: Dashboard,
}

/// Query string accepted by the page and view endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    /// Filter slug. The page form submits it under the control's id.
    #[serde(alias = "region-filter")]
    pub region: Option<String>,
}

impl RegionQuery {
    fn filter(&self) -> RegionFilter {
        self.region
            .as_deref()
            .map(RegionFilter::parse_or_all)
            .unwrap_or_default()
    }
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/view", get(view_handler))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Dashboard page.
async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionQuery>,
) -> ServerResult<Html<String>> {
    Ok(Html(state.dashboard.page(query.filter())?))
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// View model for a region as JSON.
async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionQuery>,
) -> impl IntoResponse {
    Json(state.dashboard.view(query.filter()))
}

/// WebSocket upgrade handler.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

fn encode(msg: &ServerMessage) -> ServerResult<Message> {
    let json = serde_json::to_string(msg)?;
    Ok(Message::Text(json.into()))
}

/// Answer one raw text frame.
pub fn handle_text(dashboard: &Dashboard, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => dashboard.handle(msg),
        Err(e) => {
            tracing::warn!("Invalid client message: {}", e);
            ServerMessage::Error {
                message: format!("invalid message: {e}"),
            }
        }
    }
}

/// Handle WebSocket connection.
///
/// Messages are answered strictly in arrival order, so the last filter
/// selection a client sends is the last view it receives.
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(result) = receiver.next().await {
        let reply = match result {
            Ok(Message::Text(text)) => handle_text(&state.dashboard, text.as_str()),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("WebSocket receive error: {}", e);
                break;
            }
        };

        let sent = match encode(&reply) {
            Ok(frame) => sender
                .send(frame)
                .await
                .map_err(|e| ServerError::WebSocket(e.to_string())),
            Err(e) => Err(e),
        };
        if let Err(e) = sent {
            tracing::debug!("Dropping WebSocket client: {}", e);
            break;
        }
    }

    tracing::debug!("WebSocket connection closed");
}
