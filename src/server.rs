// Launch Records Dashboard - Web Server
// Axum router: dashboard page + JSON API for the two charts

use crate::aggregation::{
    PayloadRange, PayloadScatterFilter, RangeBounds, SiteSelector, SiteSuccessAggregator,
};
use crate::chart::{error_chart, pie_chart, scatter_chart, Figure};
use crate::config::SliderConfig;
use crate::dataset::Dataset;
use crate::layout::{build_layout, DashboardLayout};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state.
/// Everything is read-only after startup, so no locking.
#[derive(Clone)]
pub struct AppState {
    dataset: Dataset,
    pie: SiteSuccessAggregator,
    scatter: PayloadScatterFilter,
    slider: SliderConfig,
    layout: Arc<DashboardLayout>,
}

impl AppState {
    pub fn new(dataset: Dataset, bounds: RangeBounds, slider: SliderConfig) -> Self {
        let layout = Arc::new(build_layout(&dataset, &slider));
        AppState {
            pie: SiteSuccessAggregator::new(dataset.clone()),
            scatter: PayloadScatterFilter::new(dataset.clone(), bounds),
            dataset,
            slider,
            layout,
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    /// Handled failure: `data` still carries something renderable
    pub fn failed(data: T, error: String) -> Self {
        Self {
            success: false,
            data,
            error: Some(error),
        }
    }
}

/// Health response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    records: usize,
    sites: usize,
    source: String,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PieQuery {
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: crate::VERSION,
        records: state.dataset.len(),
        sites: state.dataset.site_names().len(),
        source: state.dataset.source().to_string(),
        loaded_at: state.dataset.loaded_at(),
    }))
}

/// GET /api/layout - Widget description for the page
async fn get_layout(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.layout.as_ref().clone()))
}

/// GET /api/charts/pie?site= - Success counts
async fn get_pie_chart(
    State(state): State<AppState>,
    Query(query): Query<PieQuery>,
) -> impl IntoResponse {
    let selector = SiteSelector::parse(query.site.as_deref().unwrap_or_default());
    debug!("pie chart requested for {}", selector);

    let response = match state.pie.aggregate(&selector) {
        Ok(breakdown) => ApiResponse::ok(pie_chart(&breakdown)),
        Err(e) => {
            warn!("pie chart for {}: {}", selector, e);
            ApiResponse::failed(error_chart("Total success launches", &e), e.to_string())
        }
    };

    Json(response)
}

/// GET /api/charts/scatter?site=&low=&high= - Payload vs. outcome
async fn get_scatter_chart(
    State(state): State<AppState>,
    Query(query): Query<ScatterQuery>,
) -> impl IntoResponse {
    let selector = SiteSelector::parse(query.site.as_deref().unwrap_or_default());
    let low = query.low.unwrap_or(state.slider.min);
    let high = query.high.unwrap_or(state.slider.max);

    let result = PayloadRange::new(low, high).and_then(|range| {
        debug!(
            "scatter chart requested for {} in [{}, {}] ({:?} bounds)",
            selector,
            range.low(),
            range.high(),
            state.scatter.bounds()
        );
        state.scatter.filter(&selector, &range)
    });

    let response: ApiResponse<Figure> = match result {
        Ok(selection) => ApiResponse::ok(scatter_chart(&selection)),
        Err(e) => {
            warn!("scatter chart for {}: {}", selector, e);
            ApiResponse::failed(
                error_chart("Correlation between payload and success", &e),
                e.to_string(),
            )
        }
    };

    Json(response)
}

/// GET / - Serve the dashboard page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /static/dashboard.js - Page script, compiled in like the page
async fn serve_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_str!("../web/dashboard.js"),
    )
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/layout", get(get_layout))
        .route("/charts/pie", get(get_pie_chart))
        .route("/charts/scatter", get(get_scatter_chart))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .route("/static/dashboard.js", get(serve_script))
        .layer(CorsLayer::permissive())
}
