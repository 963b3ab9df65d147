//! Execution modes. The HTTP server is the only one.

pub mod server;

pub use server::{build_state, configure_app, run_server};
