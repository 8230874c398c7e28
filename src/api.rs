// 🌐 JSON API - axum router over the in-memory catalogs
//
// Catalogs are immutable after start-up, so handlers share them through an
// Arc without locking. Every request rebuilds a FilterState from the query
// string and runs apply_filters; nothing is cached except the ETag.

use crate::entities::{
    Catalogs, PricingTier, Regulation, RegulationCategory, TimelineCategory, TimelineEvent,
    Tool, ToolCategory,
};
use crate::error::CatalogError;
use crate::filter::{apply_filters, parse_selection, FilterState, FilteredView};
use crate::pagination::PageCursor;
use crate::year::Era;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    catalogs: Arc<Catalogs>,
    cursor: PageCursor,
    etag: Arc<String>,
}

impl AppState {
    pub fn new(catalogs: Catalogs, cursor: PageCursor) -> Self {
        let etag = format!("\"{}\"", catalogs.fingerprint());
        AppState {
            catalogs: Arc::new(catalogs),
            cursor,
            etag: Arc::new(etag),
        }
    }

    /// Fresh filter state carrying the configured page sizes
    fn filter_state<C>(&self, visible: Option<usize>) -> FilterState<C> {
        let cursor = match visible {
            Some(visible) => self.cursor.expanded_to(visible),
            None => self.cursor,
        };
        FilterState::with_cursor(cursor)
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// A filtered, paginated catalog listing
#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
    pub generated_at: DateTime<Utc>,
}

impl<'a, T> From<FilteredView<'a, T>> for ListResponse<&'a T> {
    fn from(view: FilteredView<'a, T>) -> Self {
        ListResponse {
            items: view.records,
            total_matches: view.total_matches,
            visible_count: view.visible_count,
            has_more: view.has_more,
            generated_at: Utc::now(),
        }
    }
}

impl<T> ListResponse<T> {
    fn map_items<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            items: self.items.into_iter().map(f).collect(),
            total_matches: self.total_matches,
            visible_count: self.visible_count,
            has_more: self.has_more,
            generated_at: self.generated_at,
        }
    }
}

/// Regulation plus the lookup URL for its citation number
#[derive(Serialize)]
pub struct RegulationResponse<'a> {
    #[serde(flatten)]
    pub regulation: &'a Regulation,
    pub href: String,
}

impl<'a> From<&'a Regulation> for RegulationResponse<'a> {
    fn from(regulation: &'a Regulation) -> Self {
        RegulationResponse {
            regulation,
            href: format!("/api/regulations/{}", urlencoding::encode(&regulation.number)),
        }
    }
}

/// Timeline event plus its derived year and era
#[derive(Serialize)]
pub struct TimelineEventResponse<'a> {
    #[serde(flatten)]
    pub event: &'a TimelineEvent,
    pub sort_year: Option<i32>,
    pub era: Option<Era>,
}

impl<'a> From<&'a TimelineEvent> for TimelineEventResponse<'a> {
    fn from(event: &'a TimelineEvent) -> Self {
        TimelineEventResponse {
            event,
            sort_year: event.sort_year().value(),
            era: event.era(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub regulations: usize,
    pub regulations_by_category: BTreeMap<&'static str, usize>,
    pub tools: usize,
    pub tools_by_pricing: BTreeMap<&'static str, usize>,
    pub average_tool_rating: Option<f64>,
    pub timeline_events: usize,
    pub future_events: usize,
    pub events_by_era: BTreeMap<&'static str, usize>,
}

fn bad_request(err: CatalogError) -> Response {
    warn!(error = %err, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(err.to_string()))).into_response()
}

fn with_etag<T: Serialize>(state: &AppState, body: T) -> Response {
    (
        [(header::ETAG, state.etag.as_str().to_string())],
        Json(ApiResponse::ok(body)),
    )
        .into_response()
}

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RegulationParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub visible: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<String>,
    pub min_rating: Option<f64>,
    pub visible: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub era: Option<String>,
    pub show_future: Option<bool>,
    pub visible: Option<usize>,
}

fn selection<T>(raw: &Option<String>) -> Result<Option<T>, CatalogError>
where
    T: std::str::FromStr<Err = CatalogError>,
{
    match raw {
        Some(raw) => parse_selection(raw),
        None => Ok(None),
    }
}

fn regulation_state(
    app: &AppState,
    params: &RegulationParams,
) -> Result<FilterState<RegulationCategory>, CatalogError> {
    let mut state = app.filter_state(params.visible);
    state.query = params.q.clone().unwrap_or_default();
    state.category = selection(&params.category)?;
    Ok(state)
}

fn tool_state(app: &AppState, params: &ToolParams) -> Result<FilterState<ToolCategory>, CatalogError> {
    let mut state = app.filter_state(params.visible);
    state.query = params.q.clone().unwrap_or_default();
    state.category = selection(&params.category)?;
    state.pricing = selection::<PricingTier>(&params.pricing)?;
    state.min_rating = params.min_rating.filter(|r| *r > 0.0);
    Ok(state)
}

fn timeline_state(
    app: &AppState,
    params: &TimelineParams,
) -> Result<FilterState<TimelineCategory>, CatalogError> {
    let mut state = app.filter_state(params.visible);
    state.query = params.q.clone().unwrap_or_default();
    state.category = selection(&params.category)?;
    state.era = selection::<Era>(&params.era)?;
    state.show_future = params.show_future.unwrap_or(true);
    Ok(state)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/regulations - Search the regulations directory
async fn list_regulations(
    State(app): State<AppState>,
    Query(params): Query<RegulationParams>,
) -> Response {
    let state = match regulation_state(&app, &params) {
        Ok(state) => state,
        Err(e) => return bad_request(e),
    };
    let view = apply_filters(&state, app.catalogs.regulations.records());
    debug!(query = %state.query, matches = view.total_matches, "regulations");
    let response = ListResponse::<&Regulation>::from(view).map_items(RegulationResponse::from);
    with_etag(&app, response)
}

/// GET /api/regulations/:number - One regulation by citation number
async fn get_regulation(State(app): State<AppState>, Path(number): Path<String>) -> Response {
    // Path has already percent-decoded the segment exactly once
    match app.catalogs.regulations.find_by_number(&number) {
        Some(regulation) => with_etag(&app, RegulationResponse::from(regulation)),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!("no regulation numbered '{}'", number))),
        )
            .into_response(),
    }
}

/// GET /api/tools - AI tools directory with pricing and rating filters
async fn list_tools(State(app): State<AppState>, Query(params): Query<ToolParams>) -> Response {
    let state = match tool_state(&app, &params) {
        Ok(state) => state,
        Err(e) => return bad_request(e),
    };
    let view = apply_filters(&state, app.catalogs.tools.records());
    debug!(query = %state.query, matches = view.total_matches, "tools");
    with_etag(&app, ListResponse::<&Tool>::from(view))
}

/// GET /api/timeline - Chronological timeline with era filter
async fn list_timeline(
    State(app): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Response {
    let state = match timeline_state(&app, &params) {
        Ok(state) => state,
        Err(e) => return bad_request(e),
    };
    let view = apply_filters(&state, app.catalogs.timeline.records());
    debug!(era = ?state.era, matches = view.total_matches, "timeline");

    let response = ListResponse::<&TimelineEvent>::from(view).map_items(TimelineEventResponse::from);
    with_etag(&app, response)
}

/// GET /api/stats - Catalog statistics
async fn get_stats(State(app): State<AppState>) -> impl IntoResponse {
    let catalogs = &app.catalogs;

    let regulations_by_category = RegulationCategory::ALL
        .iter()
        .map(|c| (c.id(), catalogs.regulations.count_by_category(*c)))
        .collect();

    let mut tools_by_pricing = BTreeMap::new();
    for tool in catalogs.tools.records() {
        *tools_by_pricing.entry(tool.pricing.symbol()).or_insert(0) += 1;
    }

    let mut events_by_era = BTreeMap::new();
    for event in catalogs.timeline.records() {
        let key = event.era().map(|e| e.id()).unwrap_or("unknown");
        *events_by_era.entry(key).or_insert(0) += 1;
    }

    Json(ApiResponse::ok(StatsResponse {
        regulations: catalogs.regulations.len(),
        regulations_by_category,
        tools: catalogs.tools.len(),
        tools_by_pricing,
        average_tool_rating: catalogs.tools.average_rating(),
        timeline_events: catalogs.timeline.len(),
        future_events: catalogs.timeline.future_count(),
        events_by_era,
    }))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/regulations", get(list_regulations))
        .route("/regulations/:number", get(get_regulation))
        .route("/tools", get(list_tools))
        .route("/timeline", get(list_timeline))
        .route("/stats", get(get_stats))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RegulationCatalog, RegulationStatus};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(AppState::new(Catalogs::with_defaults(), PageCursor::default()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        get_json_from(test_router(), uri).await
    }

    async fn get_json_from(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn item_field(body: &Value, field: &str) -> Vec<String> {
        body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item[field].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_regulations_udi_search() {
        let (status, body) = get_json("/api/regulations?q=udi&category=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_matches"], 1);
        assert_eq!(item_field(&body, "number"), vec!["21 CFR Part 830"]);
    }

    #[tokio::test]
    async fn test_regulation_lookup_by_number() {
        let (status, body) = get_json("/api/regulations/21%20CFR%20Part%20830").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "cfr-830");

        let (status, body) = get_json("/api/regulations/nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_regulation_href_round_trips_literal_percent() {
        let mut catalogs = Catalogs::with_defaults();
        catalogs.regulations = RegulationCatalog::from_records(vec![Regulation::new(
            "pct",
            "Rule 50%20 Draft",
            "Percent in citation",
            "",
            RegulationCategory::Guidance,
            RegulationStatus::Draft,
        )]);
        let app = router(AppState::new(catalogs, PageCursor::default()));

        let (_, list) = get_json_from(app.clone(), "/api/regulations").await;
        let href = list["data"]["items"][0]["href"].as_str().unwrap().to_string();
        assert_eq!(href, "/api/regulations/Rule%2050%2520%20Draft");

        let (status, body) = get_json_from(app, &href).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["number"], "Rule 50%20 Draft");
        assert_eq!(body["data"]["href"], href);
    }

    #[tokio::test]
    async fn test_tools_free_pricing() {
        let (status, body) = get_json("/api/tools?pricing=Free").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            item_field(&body, "id"),
            vec!["scikit-learn", "tensorflow", "pytorch", "codeium", "v0"]
        );
        assert_eq!(body["data"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_tools_unknown_pricing_is_bad_request() {
        let (status, body) = get_json("/api/tools?pricing=cheap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("pricing tier"));
    }

    #[tokio::test]
    async fn test_timeline_ancient_era() {
        let (status, body) = get_json("/api/timeline?era=ancient").await;
        assert_eq!(status, StatusCode::OK);
        let years = item_field(&body, "year");
        assert!(years.contains(&"7000 BCE".to_string()));
        assert!(years.contains(&"1280s".to_string()));
        assert!(!years.contains(&"1895".to_string()));
        for item in body["data"]["items"].as_array().unwrap() {
            assert!(item["sort_year"].as_i64().unwrap() < 1800);
            assert_eq!(item["era"], "ancient");
        }
    }

    #[tokio::test]
    async fn test_timeline_pagination_and_future_toggle() {
        let (_, first) = get_json("/api/timeline").await;
        assert_eq!(first["data"]["visible_count"], 10);
        assert_eq!(first["data"]["has_more"], true);

        let (_, all) = get_json("/api/timeline?visible=100").await;
        assert_eq!(all["data"]["has_more"], false);

        let (_, past) = get_json("/api/timeline?show_future=false&visible=100").await;
        for item in past["data"]["items"].as_array().unwrap() {
            assert_eq!(item["is_future"], false);
        }
    }

    #[tokio::test]
    async fn test_etag_header_present() {
        let response = test_router()
            .oneshot(Request::builder().uri("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let etag = response.headers().get(header::ETAG).unwrap().to_str().unwrap();
        assert_eq!(etag.len(), 66);
    }

    #[tokio::test]
    async fn test_stats() {
        let (status, body) = get_json("/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["tools_by_pricing"]["Free"], 5);
        assert!(body["data"]["future_events"].as_u64().unwrap() >= 4);
    }
}
