//! Resourceful route sets: the seven conventional CRUD actions for one resource name.
//!
//! | Method      | Path               | Action  |
//! |-------------|--------------------|---------|
//! | GET         | `/{name}`          | index   |
//! | GET         | `/{name}/create`   | create  |
//! | POST        | `/{name}`          | store   |
//! | GET         | `/{name}/{id}`     | show    |
//! | GET         | `/{name}/{id}/edit`| edit    |
//! | PUT / PATCH | `/{name}/{id}`     | update  |
//! | DELETE      | `/{name}/{id}`     | destroy |
//!
//! Every action has a scaffold default that answers `200` with an empty body.

use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::debug;

pub trait Resource: Send + Sync + 'static {
    const NAME: &'static str;

    fn index() -> Response {
        scaffold(Self::NAME, "index", None)
    }

    fn create() -> Response {
        scaffold(Self::NAME, "create", None)
    }

    fn store() -> Response {
        scaffold(Self::NAME, "store", None)
    }

    fn show(id: String) -> Response {
        scaffold(Self::NAME, "show", Some(&id))
    }

    fn edit(id: String) -> Response {
        scaffold(Self::NAME, "edit", Some(&id))
    }

    fn update(id: String) -> Response {
        scaffold(Self::NAME, "update", Some(&id))
    }

    fn destroy(id: String) -> Response {
        scaffold(Self::NAME, "destroy", Some(&id))
    }
}

fn scaffold(name: &str, action: &str, id: Option<&str>) -> Response {
    debug!(id, "{name}.{action} is scaffolded only");
    StatusCode::OK.into_response()
}

pub fn resource<R, S>() -> Router<S>
where
    R: Resource,
    S: Clone + Send + Sync + 'static,
{
    let base = format!("/{}", R::NAME);
    let item = format!("{base}/{{id}}");

    Router::new()
        .route(
            &base,
            get(|| async { R::index() }).post(|| async { R::store() }),
        )
        .route(&format!("{base}/create"), get(|| async { R::create() }))
        .route(
            &item,
            get(|Path(id): Path<String>| async move { R::show(id) })
                .put(|Path(id): Path<String>| async move { R::update(id) })
                .patch(|Path(id): Path<String>| async move { R::update(id) })
                .delete(|Path(id): Path<String>| async move { R::destroy(id) }),
        )
        .route(
            &format!("{item}/edit"),
            get(|Path(id): Path<String>| async move { R::edit(id) }),
        )
}
