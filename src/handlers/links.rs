//! Short link management: home page, list, create, update, enable/disable

use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use super::auth::{expire_session, require_session};
use super::{ActionResult, AppState, Outcome, Page, PageData};
use crate::api::constants::API_LINKS;
use crate::backend::{ApiRequest, ApiResponse, CreatedLink, Link};
use crate::session::RequestContext;

const MISSING_FIELDS: &str = "Missing required fields";

/// Last `/`-delimited component of a short URL, percent-encoded so it is
/// safe to use as a single path segment.
///
/// `localhost:8080/abc123` -> `abc123`
pub fn short_code(short_url: &str) -> String {
    let code = short_url.rsplit('/').next().unwrap_or(short_url);
    urlencoding::encode(code).into_owned()
}

/// GET /
pub fn home_page(state: &AppState, ctx: &impl RequestContext) -> Outcome {
    match require_session(state, ctx) {
        Ok(_) => Outcome::Rendered(PageData::authenticated(Page::Home)),
        Err(redirect) => redirect,
    }
}

/// GET /links
///
/// Newest first: the backend returns links oldest first, so the order is
/// reversed before rendering.
pub async fn list_links(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let token = match require_session(state, ctx) {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let response = match state
        .backend
        .call(ApiRequest::get(API_LINKS).with_token(token))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to load links: {}", e);
            return Outcome::failure(500, format!("Error loading links: {}", e));
        }
    };

    if response.is_unauthorized() {
        return expire_session(state, ctx);
    }

    if !response.is_query_success() {
        warn!("Link list request returned status {}", response.status);
        return Outcome::Rendered(PageData::authenticated(Page::Links { links: Vec::new() }));
    }

    match decode_links(response.body) {
        Ok(mut links) => {
            links.reverse();
            debug!("Loaded {} links", links.len());
            Outcome::Rendered(PageData::authenticated(Page::Links { links }))
        }
        Err(e) => {
            error!("Malformed link list from backend: {}", e);
            Outcome::failure(502, format!("Error loading links: {}", e))
        }
    }
}

// 空响应体视为空列表
fn decode_links(body: Value) -> Result<Vec<Link>, serde_json::Error> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(body)
}

/// POST / (create)
///
/// `longurl` is required; the URL itself is not validated here, the
/// backend decides whether it is acceptable.
pub async fn create_link(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let token = match require_session(state, ctx) {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let Some(long_url) = ctx.required_field("longurl") else {
        debug!("Create link submitted without longurl");
        return Outcome::failure(400, MISSING_FIELDS);
    };

    let request = ApiRequest::post(API_LINKS)
        .with_token(token)
        .with_body(json!({ "long_url": long_url }));

    let response = match state.backend.call(request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Create link request failed: {}", e);
            return Outcome::failure(500, format!("Error creating link: {}", e));
        }
    };

    if response.is_unauthorized() {
        return expire_session(state, ctx);
    }

    if !response.is_mutation_success() {
        warn!("Create link rejected with status {}", response.status);
        return Outcome::Action(ActionResult::failure(
            response.status,
            response.message_or("Failed to create link"),
        ));
    }

    match serde_json::from_value::<CreatedLink>(response.body) {
        Ok(created) => {
            info!("Created short link {}", created.short_url);
            Outcome::Action(ActionResult::Created {
                long_url: created.long_url.unwrap_or(long_url),
                short_url: created.short_url,
            })
        }
        Err(e) => {
            error!("Malformed create link response: {}", e);
            Outcome::failure(502, format!("Error creating link: {}", e))
        }
    }
}

/// POST /links/update
pub async fn update_link(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let token = match require_session(state, ctx) {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let (Some(short_url), Some(original_url)) = (
        ctx.required_field("short_url"),
        ctx.required_field("original_url"),
    ) else {
        return Outcome::failure(400, MISSING_FIELDS);
    };
    let code = short_code(&short_url);
    if code.is_empty() {
        return Outcome::failure(400, MISSING_FIELDS);
    }

    let request = ApiRequest::post(format!("/{}", code))
        .with_token(token)
        .with_body(json!({ "long_url": original_url }));

    let result = state.backend.call(request).await;
    link_mutation_outcome(
        state,
        ctx,
        result,
        "Link updated successfully",
        "Failed to update link",
        "Error updating link",
    )
}

/// POST /links/toggle
///
/// The desired state travels in the path: `/{code}/{isEnabled}`.
pub async fn toggle_link(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let token = match require_session(state, ctx) {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let (Some(short_url), Some(is_enabled)) = (
        ctx.required_field("short_url"),
        ctx.required_field("isEnabled"),
    ) else {
        return Outcome::failure(400, MISSING_FIELDS);
    };
    let code = short_code(&short_url);
    if code.is_empty() {
        return Outcome::failure(400, MISSING_FIELDS);
    }

    let path = format!("/{}/{}", code, urlencoding::encode(&is_enabled));
    let result = state
        .backend
        .call(ApiRequest::post(path).with_token(token))
        .await;
    link_mutation_outcome(
        state,
        ctx,
        result,
        "Link status updated successfully",
        "Failed to update link status",
        "Error updating link status",
    )
}

fn link_mutation_outcome<E: std::fmt::Display>(
    state: &AppState,
    ctx: &mut impl RequestContext,
    result: Result<ApiResponse, E>,
    success: &str,
    rejected: &str,
    transport: &str,
) -> Outcome {
    match result {
        Ok(response) if response.is_mutation_success() => {
            info!("{}", success);
            Outcome::Action(ActionResult::success(success))
        }
        Ok(response) if response.is_unauthorized() => expire_session(state, ctx),
        Ok(response) => {
            warn!("{} (status {})", rejected, response.status);
            Outcome::failure(response.status, rejected)
        }
        Err(e) => {
            error!("{}: {}", transport, e);
            Outcome::failure(500, format!("{}: {}", transport, e))
        }
    }
}
