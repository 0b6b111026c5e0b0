use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Actor, IdeaDraft, IdeaId, IdeaStatus, Role};
use super::ledger::RatingError;
use super::service::{IdeaReviewService, IdeaServiceError};
use super::store::{IdeaStore, StoreError, TemplateStore};

/// Router builder exposing the idea lifecycle, rating, and query endpoints.
pub fn idea_router<S, T>(service: Arc<IdeaReviewService<S, T>>) -> Router
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    Router::new()
        .route("/api/v1/ideas", post(submit_handler::<S, T>))
        .route("/api/v1/ideas/top", get(top_handler::<S, T>))
        .route("/api/v1/ideas/search", get(search_handler::<S, T>))
        .route(
            "/api/v1/ideas/collaboration",
            get(collaboration_handler::<S, T>),
        )
        .route(
            "/api/v1/ideas/:id",
            get(get_handler::<S, T>)
                .put(edit_handler::<S, T>)
                .delete(delete_handler::<S, T>),
        )
        .route("/api/v1/ideas/:id/status", post(transition_handler::<S, T>))
        .route("/api/v1/ideas/:id/ratings", post(rating_handler::<S, T>))
        .route(
            "/api/v1/ideas/:id/rating-suggestion",
            get(suggestion_handler::<S, T>),
        )
        .route("/api/v1/ideas/:id/comments", post(comment_handler::<S, T>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitIdeaRequest {
    pub(crate) actor: Actor,
    pub(crate) idea: IdeaDraft,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransitionRequest {
    pub(crate) actor: Actor,
    pub(crate) to: IdeaStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RatingRequest {
    pub(crate) actor: Actor,
    pub(crate) scores: BTreeMap<String, u8>,
    #[serde(default)]
    pub(crate) comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentRequest {
    pub(crate) actor: Actor,
    pub(crate) body: String,
}

/// Viewer identity carried on read requests. The gateway authenticates;
/// these parameters only assert who is asking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ViewerParams {
    pub(crate) viewer_id: String,
    #[serde(default)]
    pub(crate) viewer_name: Option<String>,
    pub(crate) role: Role,
}

impl ViewerParams {
    fn into_actor(self) -> Actor {
        Actor {
            id: self.viewer_id,
            name: self.viewer_name.unwrap_or_default(),
            role: self.role,
            department: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) q: String,
    pub(crate) viewer_id: String,
    #[serde(default)]
    pub(crate) viewer_name: Option<String>,
    pub(crate) role: Role,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopParams {
    pub(crate) limit: Option<usize>,
}

fn error_response(error: IdeaServiceError) -> Response {
    let status = match &error {
        IdeaServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IdeaServiceError::Workflow(_) => StatusCode::FORBIDDEN,
        IdeaServiceError::Rating(RatingError::NotManager) => StatusCode::FORBIDDEN,
        IdeaServiceError::Rating(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IdeaServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        IdeaServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        IdeaServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        IdeaServiceError::NotVisible(_)
        | IdeaServiceError::CommentNotPermitted
        | IdeaServiceError::DeleteNotPermitted { .. } => StatusCode::FORBIDDEN,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    axum::Json(request): axum::Json<SubmitIdeaRequest>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.submit_idea(request.idea, &request.actor) {
        Ok(idea) => (StatusCode::ACCEPTED, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<SubmitIdeaRequest>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.edit_idea(&IdeaId(id), request.idea, &request.actor) {
        Ok(idea) => (StatusCode::OK, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    Query(viewer): Query<ViewerParams>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.get_idea(&IdeaId(id), &viewer.into_actor()) {
        Ok(idea) => (StatusCode::OK, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    Query(viewer): Query<ViewerParams>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.delete_idea(&IdeaId(id), &viewer.into_actor()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transition_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.transition(&IdeaId(id), request.to, &request.actor) {
        Ok(idea) => (StatusCode::OK, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rating_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<RatingRequest>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.submit_rating(&IdeaId(id), &request.actor, &request.scores, request.comment) {
        Ok(idea) => (StatusCode::OK, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn suggestion_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    Query(viewer): Query<ViewerParams>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.suggest_rating(&IdeaId(id), &viewer.into_actor()) {
        Ok(suggestion) => (
            StatusCode::OK,
            axum::Json(json!({ "suggestion": suggestion })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn comment_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<CommentRequest>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.add_comment(&IdeaId(id), &request.actor, request.body) {
        Ok(idea) => (StatusCode::OK, axum::Json(idea)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn top_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Query(params): Query<TopParams>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    let limit = params
        .limit
        .unwrap_or(super::queries::DEFAULT_LEADERBOARD_SIZE);
    match service.leaderboard(limit) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn search_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    let viewer = Actor {
        id: params.viewer_id,
        name: params.viewer_name.unwrap_or_default(),
        role: params.role,
        department: None,
    };

    match service.search(&params.q, &viewer) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn collaboration_handler<S, T>(
    State(service): State<Arc<IdeaReviewService<S, T>>>,
) -> Response
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
{
    match service.collaboration_feed() {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}
