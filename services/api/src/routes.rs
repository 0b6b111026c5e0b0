use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use ideahub::workflows::ideas::{
    idea_router, Actor, IdeaReviewService, IdeaStore, Role, TemplateStore, UserDirectory,
    UserDirectoryError, UserRegistration, UserStatus, UserStore,
};

pub(crate) fn with_platform_routes<S, T, U>(
    service: Arc<IdeaReviewService<S, T>>,
    directory: Arc<UserDirectory<U>>,
) -> axum::Router
where
    S: IdeaStore + 'static,
    T: TemplateStore + 'static,
    U: UserStore + 'static,
{
    idea_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/users", post(register_user_endpoint::<U>))
        .route(
            "/api/v1/users/:id/status",
            post(update_user_status_endpoint::<U>),
        )
        .layer(Extension(directory))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserStatusRequest {
    pub(crate) actor: Actor,
    pub(crate) status: UserStatus,
    #[serde(default)]
    pub(crate) role: Option<Role>,
}

fn directory_error_response(error: UserDirectoryError) -> Response {
    let status = match &error {
        UserDirectoryError::NotAdmin => StatusCode::FORBIDDEN,
        UserDirectoryError::Store(ideahub::workflows::ideas::StoreError::Conflict) => {
            StatusCode::CONFLICT
        }
        UserDirectoryError::Store(ideahub::workflows::ideas::StoreError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        UserDirectoryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn register_user_endpoint<U>(
    Extension(directory): Extension<Arc<UserDirectory<U>>>,
    Json(registration): Json<UserRegistration>,
) -> Response
where
    U: UserStore + 'static,
{
    match directory.register(registration) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(error) => directory_error_response(error),
    }
}

pub(crate) async fn update_user_status_endpoint<U>(
    Extension(directory): Extension<Arc<UserDirectory<U>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(request): Json<UpdateUserStatusRequest>,
) -> Response
where
    U: UserStore + 'static,
{
    match directory.update_status(&request.actor, &id, request.status, request.role) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => directory_error_response(error),
    }
}
