// Dashboard HTTP server module
//
// Purpose: serve the posture dashboard page (askama + htmx) and its JSON API
// over the survey table loaded once at startup.

#[cfg(feature = "api")]
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use axum_htmx::HxRequest;

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::config::DashboardConfig;

#[cfg(feature = "api")]
use crate::dashboard::DashboardView;

#[cfg(feature = "api")]
use crate::data::{LoadError, SurveyData};

#[cfg(feature = "api")]
use crate::filter::{grade_options, FilterSelection, LevelFilter};

#[cfg(feature = "api")]
use crate::web::handlers::pages::{self, PageStatus};

// ============================================================================
// Application State
// ============================================================================

/// Outcome of the startup load
#[cfg(feature = "api")]
#[derive(Debug)]
pub enum Dataset {
    Ready(Arc<SurveyData>),
    Unavailable(LoadError),
}

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// Rendered views per resolved selection
    pub cache: Cache<FilterSelection, Arc<DashboardView>>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Load the survey files named by `config`
    ///
    /// A load failure does not stop the server; the page reports it instead.
    pub async fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading survey data from {}", config.data_dir.display());

        let load_config = config.clone();
        let loaded = tokio::task::spawn_blocking(move || SurveyData::load(&load_config)).await?;

        let dataset = match loaded {
            Ok(data) => {
                tracing::info!("Survey data ready ({} rows)", data.height());
                Dataset::Ready(Arc::new(data))
            }
            Err(e) if e.is_missing_files() => {
                tracing::warn!("{}", e);
                Dataset::Unavailable(e)
            }
            Err(e) => {
                tracing::error!("Failed to load survey data: {}", e);
                Dataset::Unavailable(e)
            }
        };

        Ok(Self::from_dataset(dataset))
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            dataset: Arc::new(dataset),
            cache,
        }
    }

    pub fn from_survey(data: SurveyData) -> Self {
        Self::from_dataset(Dataset::Ready(Arc::new(data)))
    }

    /// Survey table when it loaded and is non-empty
    fn survey(&self) -> Result<&Arc<SurveyData>, AppError> {
        match self.dataset.as_ref() {
            Dataset::Ready(data) if !data.is_empty() => Ok(data),
            Dataset::Ready(_) => Err(AppError::Unavailable("survey data is empty".to_string())),
            Dataset::Unavailable(e) => Err(AppError::Unavailable(e.to_string())),
        }
    }

    /// Page banner for an unusable dataset
    fn page_status(&self) -> PageStatus {
        match self.dataset.as_ref() {
            Dataset::Ready(data) if !data.is_empty() => PageStatus::default(),
            Dataset::Ready(_) => PageStatus::missing_data(),
            Dataset::Unavailable(e) if e.is_missing_files() => PageStatus::missing_data(),
            Dataset::Unavailable(e) => PageStatus::load_failed(e),
        }
    }

    async fn view_for(&self, query: &FilterQuery) -> Result<Arc<DashboardView>, AppError> {
        let data = self.survey()?;
        let selection = FilterSelection::resolve_change(
            data.frame(),
            query.level.as_deref(),
            query.grade.as_deref(),
            query.prev_level.as_deref(),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

        if let Some(cached) = self.cache.get(&selection).await {
            tracing::debug!("Cache hit for {:?}", selection);
            return Ok(cached);
        }

        let view = DashboardView::build(data, &selection)
            .map(Arc::new)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache.insert(selection, view.clone()).await;

        Ok(view)
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Dashboard page (full page, or the body partial for htmx swaps)
        .route("/", get(dashboard_page))

        // JSON API
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/grades", get(get_grade_options))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, rows) = match state.dataset.as_ref() {
        Dataset::Ready(data) if !data.is_empty() => ("healthy", data.height()),
        Dataset::Ready(_) | Dataset::Unavailable(_) => ("degraded", 0),
    };

    Json(serde_json::json!({
        "status": status,
        "rows": rows,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn dashboard_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(query): Query<FilterQuery>,
) -> Response {
    let status = state.page_status();

    let view = if status.is_ok() {
        match state.view_for(&query).await {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::error!("Dashboard render failed: {:?}", e);
                return pages::render_body(None, PageStatus::render_failed(&e.to_string()), is_htmx);
            }
        }
    } else {
        None
    };

    pages::render_body(view.as_deref(), status, is_htmx)
}

#[cfg(feature = "api")]
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let view = state.view_for(&query).await?;
    Ok(Json(view.as_ref().clone()))
}

#[cfg(feature = "api")]
async fn get_grade_options(
    State(state): State<AppState>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let data = state.survey()?;
    let level = LevelFilter::parse(query.level.as_deref());
    let options = grade_options(data.frame(), level)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(options))
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug, Default)]
pub struct FilterQuery {
    pub level: Option<String>,
    pub grade: Option<String>,
    /// Level the submitting form was rendered with
    pub prev_level: Option<String>,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct LevelQuery {
    level: Option<String>,
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    Unavailable(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unavailable(msg) | AppError::Internal(msg) => f.write_str(msg),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
