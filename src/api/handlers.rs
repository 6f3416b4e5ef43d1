//! API Handlers
//!
//! HTTP request handlers for each archive endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::archive::Archive;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ArchiveError, Result};
use crate::models::{
    HealthResponse, Last24Response, SearchQuery, SearchResponse, StatsResponse, WalkQuery,
    WindowQuery, WindowResponse,
};
use crate::upstream::SearchClient;
use crate::window::{calendar, labels, Direction, TimeWindow, ViewType, WindowResolver};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared record store, also swept by the cleanup task
    pub cache: Arc<RwLock<CacheStore>>,
    pub archive: Archive,
    pub resolver: WindowResolver,
    pub share_base_url: Arc<str>,
}

impl AppState {
    /// Wires a store and search client together using `config`'s settings.
    pub fn new(cache: CacheStore, client: SearchClient, config: &Config) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let archive = Archive::new(
            cache.clone(),
            client,
            config.freshness_secs,
            Some(config.default_ttl),
        );
        Self {
            cache,
            archive,
            resolver: WindowResolver::new(config.utc_offset()),
            share_base_url: Arc::from(config.share_base_url.as_str()),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.max_entries, config.default_ttl);
        let client = SearchClient::new(
            config.search_url.clone(),
            config.hits_per_page,
            Duration::from_secs(config.upstream_timeout_secs),
        )?;
        Ok(Self::new(cache, client, config))
    }

    /// Instant a view is resolved around: the chosen date for calendar
    /// views, otherwise `now`.
    fn reference(
        &self,
        view: ViewType,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        match (view.unit(), date) {
            (Some(_), Some(date)) => self.resolver.anchor(date),
            _ => Ok(now),
        }
    }

    fn window_response(
        &self,
        view: ViewType,
        date: NaiveDate,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> WindowResponse {
        WindowResponse {
            view_type: view,
            date,
            start: window.start,
            end: window.end,
            labels: labels(view, date),
            can_walk_back: self.resolver.can_walk_back(view),
            can_walk_forward: self.resolver.can_walk_forward(view, &window, now),
        }
    }
}

/// Handler for GET /api/last24
pub async fn last24_handler(State(state): State<AppState>) -> Result<Json<Last24Response>> {
    let snapshot = state.archive.last24(Utc::now().timestamp()).await?;

    Ok(Json(Last24Response::new(
        snapshot.hits,
        snapshot.window,
        snapshot.cached,
        &state.share_base_url,
    )))
}

/// Handler for GET /api/search
///
/// Uses the explicit `startTimeStamp`/`endTimeStamp` range when present,
/// otherwise resolves `viewType` (and `date`) against the current time.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(ArchiveError::InvalidRequest(error_msg));
    }

    let now = Utc::now();
    let window = match query.range()? {
        Some(range) => range,
        None => {
            let reference = state.reference(query.view_type, query.date, now)?;
            state.resolver.resolve(query.view_type, reference, None)?
        }
    };

    debug!(view = %query.view_type, start = window.start, end = window.end, page = query.page, "Search");

    let page = state.archive.search(window, query.page, now.timestamp()).await?;

    Ok(Json(SearchResponse::new(
        page.hits.unwrap_or_default(),
        page.page,
        page.nb_pages,
        page.nb_hits,
        window,
        query.view_type,
    )))
}

/// Handler for GET /api/window
pub async fn window_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<WindowResponse>> {
    let now = Utc::now();
    let reference = state.reference(query.view_type, query.date, now)?;
    let window = state
        .resolver
        .resolve(query.view_type, reference, query.range()?)?;
    let date = state.resolver.date_of(reference);

    Ok(Json(state.window_response(query.view_type, date, window, now)))
}

/// Handler for GET /api/walk
///
/// Moves a day/month/year view one unit back or forward. Walking past the
/// unit that contains today is rejected.
pub async fn walk_handler(
    State(state): State<AppState>,
    Query(query): Query<WalkQuery>,
) -> Result<Json<WindowResponse>> {
    let unit = query.view_type.unit().ok_or_else(|| {
        ArchiveError::InvalidRequest(format!("cannot walk a {} view", query.view_type))
    })?;

    let now = Utc::now();
    let date = query.date.unwrap_or_else(|| state.resolver.date_of(now));
    let current = state.resolver.calendar_window(date, unit)?;

    if query.direction == Direction::Forward
        && !state.resolver.can_walk_forward(query.view_type, &current, now)
    {
        return Err(ArchiveError::InvalidRequest(
            "cannot walk past the current period".to_string(),
        ));
    }

    let walked = calendar::walk(date, unit, query.direction)?;
    let window = state.resolver.calendar_window(walked, unit)?;

    Ok(Json(state.window_response(query.view_type, walked, window, now)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
