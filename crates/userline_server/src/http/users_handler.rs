//! `/api/v1/users` handlers.
//!
//! Service calls do blocking file I/O, so each one runs on the blocking
//! thread pool.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use userline_core::{core_version, ServiceResult, User};

use crate::http::response::{ApiError, ApiResult, Envelope, MSG_BODY_MALFORMED, MSG_INTERNAL};
use crate::state::{AppState, FileUserRepository};

type Service = userline_core::UserService<FileUserRepository>;

/// Create/update request body. Missing fields read as blank so they fail
/// validation rather than parsing; a client-supplied `id` is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl From<UserPayload> for User {
    fn from(value: UserPayload) -> Self {
        User::new(value.first_name, value.last_name, value.biography)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn healthcheck() -> Json<Envelope<HealthResponse>> {
    Json(Envelope::data(HealthResponse {
        status: "ok",
        version: core_version(),
    }))
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<User>>>> {
    const FAILURE: &str = "The users information could not be retrieved";

    let users = run_service(&state, "http_list_users", FAILURE, |service| {
        service.list_users()
    })
    .await?;

    info!("event=http_list_users module=http status=ok count={}", users.len());
    Ok(Json(Envelope::data(users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<User>>> {
    const FAILURE: &str = "The user information could not be retrieved";

    let user = run_service(&state, "http_get_user", FAILURE, move |service| {
        service.get_user(&id)
    })
    .await?;

    info!("event=http_get_user module=http status=ok id={}", user.id);
    Ok(Json(Envelope::data(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<User>>)> {
    const FAILURE: &str = "There was an error while saving the user to the database";

    let user = parse_payload("http_create_user", payload)?;
    let created = run_service(&state, "http_create_user", FAILURE, move |service| {
        service.create_user(user)
    })
    .await?;

    info!("event=http_create_user module=http status=ok id={}", created.id);
    Ok((StatusCode::CREATED, Json(Envelope::data(created))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<Envelope<User>>> {
    const FAILURE: &str = "The user information could not be modified";

    let user = parse_payload("http_update_user", payload)?;
    let updated = run_service(&state, "http_update_user", FAILURE, move |service| {
        service.update_user(&id, user)
    })
    .await?;

    info!("event=http_update_user module=http status=ok id={}", updated.id);
    Ok(Json(Envelope::data(updated)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    const FAILURE: &str = "The user could not be removed";

    let deleted_id = id.clone();
    run_service(&state, "http_delete_user", FAILURE, move |service| {
        service.delete_user(&id)
    })
    .await?;

    info!("event=http_delete_user module=http status=ok id={deleted_id}");
    Ok(StatusCode::OK)
}

fn parse_payload(
    event: &str,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<User> {
    match payload {
        Ok(Json(payload)) => Ok(payload.into()),
        Err(rejection) => {
            warn!("event={event} module=http status=malformed error={rejection}");
            Err(ApiError::bad_request(MSG_BODY_MALFORMED))
        }
    }
}

async fn run_service<T, F>(
    state: &AppState,
    event: &'static str,
    failure_message: &'static str,
    op: F,
) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Service) -> ServiceResult<T> + Send + 'static,
{
    let service = state.user_service.clone();
    match tokio::task::spawn_blocking(move || op(&*service)).await {
        Ok(result) => result.map_err(|err| ApiError::from_service(event, err, failure_message)),
        Err(join_error) => {
            error!("event={event} module=http status=error error={join_error}");
            Err(ApiError::internal(MSG_INTERNAL))
        }
    }
}
