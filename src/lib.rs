//! teenyurl-web - session-aware web front end for the teenyurl API
//!
//! Browser form submissions come in, exactly one call per action goes out
//! to the upstream teenyurl API, and the session token travels in a single
//! cookie in between.
//!
//! # Architecture
//! - `session`: session cookie adapter and the per-request context trait
//! - `backend`: HTTP client for the upstream API
//! - `handlers`: auth flow and link management, returning `Outcome`s
//! - `api`: actix-web routes, middleware and response mapping
//! - `config`: TOML + environment configuration
//! - `runtime`: server startup and shutdown
//! - `system`: logging setup

pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod runtime;
pub mod session;
pub mod system;
