use crate::config::{MapConfig, ServerConfig};
use crate::constants::{SESSION_HEADER, SESSION_IDLE_SECS};
use crate::directory::Directory;
use crate::error::{AppError, Result};
use crate::events::{UiEvent, Update};
use crate::map::{CommandBuffer, MapCommand};
use crate::templates;
use crate::types::Club;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The collection loaded at startup, shared by every browser session.
#[derive(Clone)]
pub struct Catalog {
    pub clubs: Arc<[Club]>,
    pub settings: MapConfig,
    /// Load-failure alert, queued once in each new session
    pub alert: Option<String>,
}

impl Catalog {
    pub fn new(clubs: Arc<[Club]>, settings: MapConfig) -> Self {
        Self { clubs, settings, alert: None }
    }

    pub fn with_alert(mut self, alert: Option<String>) -> Self {
        self.alert = alert;
        self
    }

    /// Take over the collection and pending alert of a loaded directory.
    pub fn from_directory(directory: &mut Directory<CommandBuffer>) -> Self {
        Self::new(directory.shared_clubs(), directory.settings().clone()).with_alert(directory.take_alert())
    }

    fn open_session(&self) -> Directory<CommandBuffer> {
        let mut directory = Directory::shared(CommandBuffer::new(), self.settings.clone(), Arc::clone(&self.clubs));
        if let Some(alert) = &self.alert {
            directory.queue_alert(alert.clone());
        }
        directory
    }
}

struct Session {
    directory: Directory<CommandBuffer>,
    last_seen: Instant,
}

impl Session {
    fn new(directory: Directory<CommandBuffer>) -> Self {
        Self { directory, last_seen: Instant::now() }
    }
}

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

/// What the glue script applies after each event. Absent fragments leave the
/// corresponding element untouched.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub panel_html: Option<String>,
    pub search_html: Option<String>,
    pub province_list_html: Option<String>,
    pub clear_search_input: bool,
    pub sidebar_open: bool,
    pub alert: Option<String>,
    pub map: Vec<MapCommand>,
}

impl EventResponse {
    fn render(update: Update, map: Vec<MapCommand>) -> Result<Self> {
        Ok(Self {
            panel_html: update.panel.as_ref().map(templates::render_panel).transpose()?,
            search_html: update.search.as_ref().map(templates::render_search).transpose()?,
            province_list_html: update.province_list.as_ref().map(templates::render_province_list).transpose()?,
            clear_search_input: update.clear_search_input,
            sidebar_open: update.sidebar_open,
            alert: update.alert,
            map,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Session(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

fn session_id(headers: &HeaderMap) -> Result<Uuid> {
    let raw = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| AppError::Session(format!("missing {} header", SESSION_HEADER)))?;
    let raw = raw.to_str().map_err(|e| AppError::Session(e.to_string()))?;
    Uuid::parse_str(raw).map_err(|e| AppError::Session(e.to_string()))
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let sessions = state.sessions.lock().await.len();
    Json(serde_json::json!({
        "status": "healthy",
        "service": "club_map",
        "version": env!("CARGO_PKG_VERSION"),
        "clubs": state.catalog.clubs.len(),
        "sessions": sessions
    }))
}

/// Every page load starts its own session.
async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let directory = state.catalog.open_session();
    let id = Uuid::new_v4();
    let html = templates::render_index(
        &directory.province_list(),
        directory.settings(),
        directory.sidebar_open(),
        &id.to_string(),
    )?;

    let mut sessions = state.sessions.lock().await;
    let idle = Duration::from_secs(SESSION_IDLE_SECS);
    let before = sessions.len();
    sessions.retain(|_, s| s.last_seen.elapsed() < idle);
    if sessions.len() < before {
        debug!("Dropped {} idle sessions", before - sessions.len());
    }
    sessions.insert(id, Session::new(directory));
    debug!("Opened session {} ({} live)", id, sessions.len());

    Ok(Html(html))
}

/// Unknown ids (e.g. after a restart) get a fresh session under that id.
async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<UiEvent>,
) -> Result<Json<EventResponse>> {
    let id = session_id(&headers)?;
    let mut sessions = state.sessions.lock().await;
    let session = sessions.entry(id).or_insert_with(|| {
        info!("Reopening unknown session {}", id);
        Session::new(state.catalog.open_session())
    });
    session.last_seen = Instant::now();

    let update = session.directory.dispatch(event);
    let map = session.directory.map_mut().drain();
    Ok(Json(EventResponse::render(update, map)?))
}

pub fn create_router(catalog: Catalog, assets_dir: &str) -> Router {
    let state = AppState {
        catalog: Arc::new(catalog),
        sessions: Arc::new(Mutex::new(HashMap::new())),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/events", post(events))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(catalog: Catalog, config: &ServerConfig) -> Result<()> {
    let app = create_router(catalog, &config.assets_dir);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("Club map listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
