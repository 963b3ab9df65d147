//! Auth flow and link management handlers
//!
//! Each handler takes the shared [`AppState`] plus a [`RequestContext`] and
//! returns an [`Outcome`]. Handlers never fail: backend rejections and
//! transport errors come back as `ActionResult::Failure`, and the auth gate
//! comes back as `Outcome::Redirect`.
//!
//! [`RequestContext`]: crate::session::RequestContext

pub mod auth;
pub mod links;
mod outcome;

pub use outcome::{ActionResult, Outcome, Page, PageData, RedirectStatus};

use std::sync::Arc;

use crate::backend::BackendApi;
use crate::session::SessionStore;

/// Process-wide, immutable handler dependencies
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendApi>,
    pub session: SessionStore,
}

impl AppState {
    pub fn new(backend: Arc<dyn BackendApi>, session: SessionStore) -> Self {
        Self { backend, session }
    }
}
