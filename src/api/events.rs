//! Events API endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::common::{page_request, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{EventsPage, FilterSection};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(get_events_page))
        .route("/events/filters", get(get_events_filters))
}

async fn get_events_page(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<EventsPage>, ApiError> {
    let request = page_request(query, "getEventsPage")?;
    Ok(Json(state.event_service.get_events(request).await?))
}

async fn get_events_filters(
    State(state): State<AppState>,
) -> Result<Json<FilterSection>, ApiError> {
    Ok(Json(state.event_service.get_events_filters().await?))
}
