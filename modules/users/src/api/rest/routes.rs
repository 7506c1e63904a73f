use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/users` resource on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let users = Router::new()
        // GET /users - list all users, POST /users - create a user
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        // GET/PUT/DELETE /users/{id}
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(service));

    tracing::debug!("Registered /users routes");
    Ok(router.merge(users))
}
