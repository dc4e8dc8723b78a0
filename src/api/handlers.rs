use axum::{
    extract::{OriginalUri, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::access::AccessRegistry;
use crate::error_page::PageLocation;
use crate::errors::SiteError;
use crate::notify::WebhookNotifier;
use crate::pages;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub registry: AccessRegistry,
    pub notifier: WebhookNotifier,
    pub admin_token: Option<String>,
    pub instance_id: String,
}

/// Access request form, field names as submitted by the index page.
#[derive(Debug, Deserialize)]
pub struct AccessRequestForm {
    pub userid: String,
    #[serde(rename = "github-link")]
    pub github_link: String,
}

/// Body for the admin approve/deny endpoints.
#[derive(Debug, Deserialize)]
pub struct AdminAction {
    pub userid: u64,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "access-gate",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "pending_requests": state.registry.pending_count(),
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

pub async fn index_page() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

/// Render the oops page. The error display is driven by the request's
/// original URI, so the path suffix check and query decoding behave the same
/// whether the route is mounted at `/oops` or nested deeper.
pub async fn oops_page(OriginalUri(uri): OriginalUri) -> Html<String> {
    let location = PageLocation::new(uri.path(), uri.query());
    Html(pages::render_oops(&location))
}

pub async fn access_request(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<AccessRequestForm>,
) -> Result<Html<&'static str>, SiteError> {
    let userid: u64 = form
        .userid
        .trim()
        .parse()
        .map_err(|_| SiteError::InvalidForm)?;

    state
        .registry
        .submit(userid)
        .map_err(|_| SiteError::RequestPending)?;

    info!(userid, github_link = %form.github_link, "New access request");

    // Best effort: the applicant already got their pending slot.
    if let Err(e) = state
        .notifier
        .notify_new_request(userid, &form.github_link)
        .await
    {
        warn!(userid, "Failed to notify moderators: {e:#}");
    }

    Ok(Html(pages::THANKS_HTML))
}

pub async fn admin_approve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(action): Json<AdminAction>,
) -> Result<Json<serde_json::Value>, SiteError> {
    authorize_admin(&state, &headers)?;

    let was_pending = state.registry.approve(action.userid);
    if was_pending {
        info!(userid = action.userid, "Application approved");
    }

    Ok(Json(serde_json::json!({
        "success": was_pending,
        "userid": action.userid,
        "status": if was_pending { "approved" } else { "not-pending" },
    })))
}

pub async fn admin_deny(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(action): Json<AdminAction>,
) -> Result<Json<serde_json::Value>, SiteError> {
    authorize_admin(&state, &headers)?;

    let was_pending = state.registry.deny(action.userid);
    if was_pending {
        info!(userid = action.userid, "Application denied");
    }

    Ok(Json(serde_json::json!({
        "success": was_pending,
        "userid": action.userid,
        "status": if was_pending { "denied" } else { "not-pending" },
    })))
}

/// Admin endpoints require `Authorization: Bearer <ADMIN_TOKEN>`. With no
/// token configured they are effectively disabled.
fn authorize_admin(state: &AppStateInner, headers: &HeaderMap) -> Result<(), SiteError> {
    let Some(expected) = &state.admin_token else {
        return Err(SiteError::Unauthorized);
    };

    let presented = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => Ok(()),
        _ => Err(SiteError::Unauthorized),
    }
}
