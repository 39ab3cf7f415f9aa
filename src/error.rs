use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors raised while handling a request.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Not Found")]
    NotFound,

    #[error("Database Error")]
    Database(#[from] sqlx::Error),

    #[error("Error rendering page")]
    Render(#[from] handlebars::RenderError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::Database(e) => {
                error!("database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WebError::Render(e) => {
                error!("render error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Errors raised while building the application state.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to load templates: {0}")]
    Templates(#[from] handlebars::TemplateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = WebError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500() {
        let response = WebError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
