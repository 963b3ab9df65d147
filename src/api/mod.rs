//! Page composition layer
//!
//! actix-web routes that build an [`context::ActixContext`] per request, run
//! a handler and turn its outcome into an HTTP response.

pub mod constants;
pub mod context;
pub mod middleware;
pub mod services;
