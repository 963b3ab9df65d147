//! Sign-up, sign-in, sign-out and the session guards

use serde_json::json;
use tracing::{debug, error, info, warn};

use super::{ActionResult, AppState, Outcome, Page, PageData, RedirectStatus};
use crate::api::constants::{API_SIGNIN, API_SIGNOUT, API_SIGNUP, HOME_PATH, LOGIN_PATH};
use crate::backend::ApiRequest;
use crate::session::RequestContext;

/// Session token for a page that needs one, or the 302 to `/login`.
pub fn require_session(state: &AppState, ctx: &impl RequestContext) -> Result<String, Outcome> {
    state.session.get(ctx).ok_or_else(|| {
        debug!("No session cookie, redirecting to login");
        Outcome::redirect(LOGIN_PATH, RedirectStatus::Found)
    })
}

/// Login and signup pages send signed-in users home without asking the backend.
pub fn redirect_if_authenticated(state: &AppState, ctx: &impl RequestContext) -> Option<Outcome> {
    state
        .session
        .get(ctx)
        .map(|_| Outcome::redirect(HOME_PATH, RedirectStatus::MovedPermanently))
}

/// Backend said 401: drop the local cookie so client and server agree.
pub fn expire_session(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    info!("Backend rejected session token, clearing session cookie");
    state.session.clear(ctx);
    Outcome::redirect(LOGIN_PATH, RedirectStatus::Found)
}

pub fn login_page(state: &AppState, ctx: &impl RequestContext) -> Outcome {
    redirect_if_authenticated(state, ctx)
        .unwrap_or_else(|| Outcome::Rendered(PageData::anonymous(Page::Login)))
}

pub fn signup_page(state: &AppState, ctx: &impl RequestContext) -> Outcome {
    redirect_if_authenticated(state, ctx)
        .unwrap_or_else(|| Outcome::Rendered(PageData::anonymous(Page::Signup)))
}

/// POST /login
pub async fn sign_in(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let body = json!({
        "email": ctx.field("email"),
        "password": ctx.field("password"),
    });

    let response = match state
        .backend
        .call(ApiRequest::post(API_SIGNIN).with_body(body))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Sign-in request failed: {}", e);
            return Outcome::failure(500, format!("Error signing in: {}", e));
        }
    };

    if !response.is_query_success() {
        warn!("Sign-in rejected by backend with status {}", response.status);
        return Outcome::Action(ActionResult::failure(
            response.status,
            response.message_or("Sign in failed"),
        ));
    }

    match response.bearer_token() {
        Some(token) => {
            state.session.set(ctx, token);
            info!("Sign-in successful, session cookie issued");
            Outcome::redirect(HOME_PATH, RedirectStatus::MovedPermanently)
        }
        None => {
            error!("Sign-in succeeded but the backend sent no Authorization header");
            Outcome::failure(502, "Sign-in response did not include a session token")
        }
    }
}

/// POST /signup
///
/// A new account is not signed in; success sends the user to `/login`.
pub async fn sign_up(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let body = json!({
        "user_name": ctx.field("username"),
        "email": ctx.field("email"),
        "password": ctx.field("password"),
    });

    let response = match state
        .backend
        .call(ApiRequest::post(API_SIGNUP).with_body(body))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Sign-up request failed: {}", e);
            return Outcome::failure(500, format!("Error signing up: {}", e));
        }
    };

    if response.is_mutation_success() {
        info!("Sign-up successful");
        return Outcome::redirect(LOGIN_PATH, RedirectStatus::MovedPermanently);
    }

    warn!("Sign-up rejected by backend with status {}", response.status);
    Outcome::Action(ActionResult::failure(
        response.status,
        response.message_or("Sign up failed"),
    ))
}

/// POST /logout
///
/// The cookie is only cleared once the backend has invalidated the token.
/// If that call fails the cookie stays, so the browser keeps a session the
/// backend may still consider live.
pub async fn sign_out(state: &AppState, ctx: &mut impl RequestContext) -> Outcome {
    let token = match require_session(state, ctx) {
        Ok(token) => token,
        Err(redirect) => return redirect,
    };

    let response = match state
        .backend
        .call(ApiRequest::post(API_SIGNOUT).with_token(token))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Sign-out request failed, keeping session cookie: {}", e);
            return Outcome::failure(500, format!("Error signing out: {}", e));
        }
    };

    if response.is_mutation_success() {
        state.session.clear(ctx);
        info!("Sign-out successful, session cookie cleared");
        return Outcome::redirect(LOGIN_PATH, RedirectStatus::Found);
    }

    if response.is_unauthorized() {
        return expire_session(state, ctx);
    }

    warn!(
        "Sign-out rejected by backend with status {}, keeping session cookie",
        response.status
    );
    Outcome::Action(ActionResult::failure(
        response.status,
        response.message_or("Sign out failed"),
    ))
}
