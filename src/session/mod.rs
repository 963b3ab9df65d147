//! Session Store Adapter
//!
//! The session is a single opaque token kept in a browser cookie. Handlers
//! reach form fields and cookies only through [`RequestContext`], so the
//! same handler code runs against actix requests and [`MemoryContext`].

mod context;
mod store;

pub use context::{FormFields, MemoryContext, RequestContext};
pub use store::{CookieBuilder, SessionStore};
