use axum::{routing::get, Router};

use crate::{
    http::users_handler::{
        create_user, delete_user, get_user, healthcheck, list_users, update_user,
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let users = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        );

    Router::new()
        .route("/health", get(healthcheck))
        .nest("/api/v1", users)
        .with_state(state)
}
