//! Service error type.
//!
//! User-facing failures become a `302 Found` onto the oops page, carrying the
//! display message percent-encoded as the whole query string; the error page
//! decodes and shows it. Admin failures answer JSON with a proper status.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("You already have a request pending.")]
    RequestPending,

    #[error("Your submission could not be read. Please try again.")]
    InvalidForm,

    #[error("unauthorized")]
    Unauthorized,

    #[error("Something went wrong on our end.")]
    Internal(#[source] anyhow::Error),
}

/// Build the redirect that hands a message to the error page.
pub fn oops_redirect(message: &str) -> Response {
    let location = format!("/oops?{}", urlencoding::encode(message));
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": "unauthorized" })),
            )
                .into_response(),
            Self::Internal(ref source) => {
                error!("Internal error: {source:#}");
                oops_redirect(&self.to_string())
            }
            user_facing => oops_redirect(&user_facing.to_string()),
        }
    }
}

impl From<anyhow::Error> for SiteError {
    fn from(source: anyhow::Error) -> Self {
        Self::Internal(source)
    }
}
