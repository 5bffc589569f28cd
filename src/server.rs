//! HTTP surface: chat relay, health, runtime config and static pages

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::config::RelayConfig;
use crate::error::Error;
use crate::request::{ChatReply, ErrorReply, HealthReply, PromptRequest};
use crate::resolver::ReplyResolver;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState
{   pub resolver: Arc<ReplyResolver>
  , pub config: Arc<RelayConfig>
}

impl AppState
{   pub fn new(config: RelayConfig) -> Result<Self, Error>
    {   let resolver = ReplyResolver::new(&config)?;
        Ok(AppState
        {   resolver: Arc::new(resolver)
          , config: Arc::new(config)
        })
    }
}

/// Router with api routes, static pages and permissive CORS
pub fn create_router(state: AppState) -> Router
{   let static_dir = PathBuf::from(&state.config.static_dir);
    debug!("Static pages from: {}", static_dir.display());

    let cors = CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any);

    Router::new()
      .route("/health", get(health))
      .route("/chat", post(chat))
      .route("/config.js", get(config_js))
      .route_service("/", ServeFile::new(static_dir.join("index.html")))
      .fallback_service(ServeDir::new(static_dir))
      .with_state(state)
      .layer(cors)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: RelayConfig) -> Result<(), Error>
{   let listener = tokio::net::TcpListener::bind(
      (config.host.as_str(), config.port)
    ).await?;
    let app = create_router(AppState::new(config)?);

    info!("Relay listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /health
async fn health() -> Json<HealthReply>
{   Json(HealthReply { ok: true })
}

/// POST /chat
async fn chat(
  State(state): State<AppState>
, body: Bytes
) -> Result<Json<ChatReply>, AppError>
{   let request = PromptRequest::from_slice(&body).map_err(|e| {
      error!("Unreadable chat body: {}", e);
      AppError::from(e)
    })?;
    let prompt = request.prompt()?.to_string();
    debug!("Chat request ({} chars)", prompt.len());

    // a panic while resolving becomes a 500, not a dropped connection
    let resolver = state.resolver.clone();
    let reply = tokio::spawn(async move {
      resolver.resolve(&prompt).await
    })
    .await
    .map_err(|e| {
      error!("Resolution task failed: {}", e);
      AppError::Internal(e.to_string())
    })?;

    Ok(Json(ChatReply { reply }))
}

/// GET /config.js: runtime settings for the pages; never the key
async fn config_js(State(state): State<AppState>) -> Response
{   let settings = serde_json::json!({
      "chatEndpoint": "/chat",
      "healthEndpoint": "/health",
      "model": state.config.model,
      "apiVersion": state.config.api_version,
      "apiKeyConfigured": state.resolver.is_configured(),
    });
    let script = format!("window.APP_CONFIG = {};\n", settings);
    (
      [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
      script,
    ).into_response()
}

/// Errors that reach the HTTP caller
#[derive(Debug)]
pub enum AppError
{   BadRequest(String)
  , Internal(String)
}

impl From<Error> for AppError
{   fn from(err: Error) -> Self
    {   match err
        {   Error::MissingMessage => AppError::BadRequest(err.to_string())
          , other => AppError::Internal(other.to_string())
        }
    }
}

impl IntoResponse for AppError
{   fn into_response(self) -> Response
    {   let (status, message) = match self
        {   AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg)
          , AppError::Internal(msg) => {
              (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ErrorReply { error: message })).into_response()
    }
}
