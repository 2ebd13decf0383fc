//! CMS page API endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::common::{page_request, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{
    AboutUsPage, CodeOfConductPage, CollaboratorPage, FooterPage, LandingPage, TeamPage,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/landingPage", get(get_landing_page))
        .route("/team", get(get_team))
        .route("/aboutUs", get(get_about_us))
        .route("/footer", get(get_footer))
        .route("/code-of-conduct", get(get_code_of_conduct))
        .route("/collaborators", get(get_collaborator))
}

async fn get_landing_page(State(state): State<AppState>) -> Result<Json<LandingPage>, ApiError> {
    Ok(Json(state.content_service.get_landing_page().await?))
}

async fn get_team(State(state): State<AppState>) -> Result<Json<TeamPage>, ApiError> {
    Ok(Json(state.content_service.get_team().await?))
}

async fn get_about_us(State(state): State<AppState>) -> Result<Json<AboutUsPage>, ApiError> {
    Ok(Json(state.content_service.get_about_us().await?))
}

async fn get_footer(State(state): State<AppState>) -> Result<Json<FooterPage>, ApiError> {
    Ok(Json(state.content_service.get_footer().await?))
}

async fn get_code_of_conduct(
    State(state): State<AppState>,
) -> Result<Json<CodeOfConductPage>, ApiError> {
    Ok(Json(state.content_service.get_code_of_conduct().await?))
}

async fn get_collaborator(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<CollaboratorPage>, ApiError> {
    let request = page_request(query, "getCollaborator")?;
    Ok(Json(state.content_service.get_collaborator(request).await?))
}
