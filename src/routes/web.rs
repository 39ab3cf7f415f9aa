use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use tracing::debug;

use crate::AppState;
use crate::error::WebError;
use crate::gate::{self, CheckedAge};
use crate::notes;
use crate::response::found;

pub const PROFILE_NAME: &str = "Joey";
pub const PROFILE_AGE: u32 = 37;

async fn render(
    app_state: &AppState,
    view: &str,
    data: serde_json::Value,
) -> Result<Html<String>, WebError> {
    Ok(Html(app_state.views.render(view, data).await?))
}

#[axum::debug_handler]
pub async fn view_welcome(app_state: State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    render(&app_state, "welcome", json!({"sections": notes::sections()})).await
}

#[axum::debug_handler]
pub async fn view_home(app_state: State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    render(&app_state, "home", json!({})).await
}

pub async fn hello_world() -> &'static str {
    "Hello World!"
}

#[axum::debug_handler]
pub async fn view_agecheck(
    app_state: State<Arc<AppState>>,
    Extension(CheckedAge(age)): Extension<CheckedAge>,
) -> Result<impl IntoResponse, WebError> {
    render(&app_state, "agecheck", json!({"age": age})).await
}

#[axum::debug_handler]
pub async fn view_note(
    app_state: State<Arc<AppState>>,
    Path((section, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, WebError> {
    let note = notes::find(&section, &slug).ok_or(WebError::NotFound)?;

    render(
        &app_state,
        &note.template(),
        json!({"note": note, "sections": notes::sections()}),
    )
    .await
}

#[axum::debug_handler]
pub async fn view_blade(app_state: State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    render(
        &app_state,
        "child",
        json!({
            "name": PROFILE_NAME,
            "timestamp": OffsetDateTime::now_utc().unix_timestamp(),
        }),
    )
    .await
}

pub async fn not_found() -> WebError {
    WebError::NotFound
}

// Registration

#[axum::debug_handler]
pub async fn registration_create(
    app_state: State<Arc<AppState>>,
) -> Result<impl IntoResponse, WebError> {
    render(&app_state, "registration/create", json!({})).await
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, rename = "toys[]")]
    toys: Vec<String>,
}

/// Accepts the submission and sends the user home. Nothing is validated or stored.
#[axum::debug_handler]
pub async fn registration_store(Form(form): Form<RegistrationForm>) -> Response {
    debug!(
        name = form.name.is_some(),
        email = form.email.is_some(),
        password = form.password.is_some(),
        toys = form.toys.len(),
        "registration submitted"
    );

    gate::redirect_home()
}

// Posts

#[axum::debug_handler]
pub async fn view_posts(app_state: State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    let posts = app_state.posts.all().await?;

    render(&app_state, "post/index", json!({"posts": posts})).await
}

#[axum::debug_handler]
pub async fn view_post_form(app_state: State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    render(&app_state, "post/create", json!({})).await
}

#[derive(Debug, Default, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

/// Accepts the submission and returns to the post list. Nothing is validated or stored.
#[axum::debug_handler]
pub async fn new_post(Form(form): Form<NewPostForm>) -> Response {
    debug!(
        title = form.title.as_deref().unwrap_or_default(),
        body_len = form.body.as_deref().map_or(0, str::len),
        "post submitted"
    );

    found("/posts")
}

// Users

pub async fn users_index() -> &'static str {
    PROFILE_NAME
}

pub async fn users_show_profile() -> String {
    PROFILE_AGE.to_string()
}

#[axum::debug_handler]
pub async fn users_show(
    app_state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WebError> {
    let id: i64 = id.parse().map_err(|_| WebError::NotFound)?;
    let user = app_state.users.find(id).await?.ok_or(WebError::NotFound)?;

    render(&app_state, "user/profile", json!({"user": user})).await
}
