use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{AppState, gate, resource::resource};

pub mod photo;
pub mod web;

// Server-side rendered pages.
pub fn get_web_router() -> Router<Arc<AppState>> {
    Router::new()
        // Front Page
        .route("/", get(web::view_welcome))
        .route("/welcome", get(web::view_welcome))
        .route("/foo", get(web::hello_world))
        // Age check
        .route("/home", get(web::view_home))
        .route(
            "/agecheck",
            post(web::view_agecheck).layer(middleware::from_fn(gate::age_gate)),
        )
        // Users
        .route("/user", get(web::users_index))
        .route("/user/profile", get(web::users_show_profile))
        .route("/user/{id}", get(web::users_show))
        // Registration
        .route(
            "/register",
            get(web::registration_create).post(web::registration_store),
        )
        // Posts
        .route("/post/create", get(web::view_post_form))
        .route("/post", post(web::new_post))
        .route("/posts", get(web::view_posts))
        // Templates
        .route("/blade", get(web::view_blade))
        .merge(resource::<photo::PhotoController, _>())
        // Notes, resolved against the catalog
        .route("/{section}/{slug}", get(web::view_note))
}

pub fn app(app_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(get_web_router())
        // STATIC CONTENT
        .nest_service("/static", ServeDir::new(&app_state.config.static_dir))
        .fallback(web::not_found)
        .layer(TraceLayer::new_for_http())
        // STATE
        .with_state(app_state)
}
