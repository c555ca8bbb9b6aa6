use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicantId, ApplicationId, ApplicationStatus, CompetitionId, FullApplication,
};
use super::repository::{ApplicationRepository, CompetitionDirectory, RepositoryError};
use super::service::{ScreeningService, ScreeningServiceError, StatusOverride};

/// Inbound submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub applicant_id: ApplicantId,
    pub application: FullApplication,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityQuery {
    pub(crate) applicant_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingQuery {
    #[serde(default)]
    pub(crate) status: Option<ApplicationStatus>,
}

/// Router builder exposing HTTP endpoints for intake, ranking, listings, and overrides.
pub fn application_router<R, C>(service: Arc<ScreeningService<R, C>>) -> Router
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    Router::new()
        .route("/api/v1/cfo/applications", post(submit_handler::<R, C>))
        .route(
            "/api/v1/cfo/applications/:application_id",
            get(status_handler::<R, C>),
        )
        .route(
            "/api/v1/cfo/competitions/:competition_id/applications",
            get(listing_handler::<R, C>),
        )
        .route(
            "/api/v1/cfo/competitions/:competition_id/applications/:application_id/status",
            put(override_handler::<R, C>),
        )
        .route(
            "/api/v1/cfo/competitions/:competition_id/eligibility",
            get(eligibility_handler::<R, C>),
        )
        .route(
            "/api/v1/cfo/competitions/:competition_id/ranking",
            post(ranking_handler::<R, C>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    match service.submit(request.applicant_id, request.application) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn override_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    Path((competition_id, application_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<StatusOverride>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    match service.override_status(
        &CompetitionId(competition_id),
        &ApplicationId(application_id),
        request,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn listing_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    Path(competition_id): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    match service.list_competition(&CompetitionId(competition_id), query.status) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligibility_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    Path(competition_id): Path<String>,
    Query(query): Query<EligibilityQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    let applicant_id = ApplicantId(query.applicant_id);
    match service.check_eligibility(&applicant_id, &CompetitionId(competition_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranking_handler<R, C>(
    State(service): State<Arc<ScreeningService<R, C>>>,
    Path(competition_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    match service.rank_competition(&CompetitionId(competition_id)) {
        Ok(ranking) => (StatusCode::OK, axum::Json(ranking)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScreeningServiceError) -> Response {
    let status = match &error {
        ScreeningServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScreeningServiceError::DuplicateSubmission { .. }
        | ScreeningServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ScreeningServiceError::CompetitionNotFound(_)
        | ScreeningServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScreeningServiceError::CompetitionClosed(_) => StatusCode::FORBIDDEN,
        ScreeningServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
