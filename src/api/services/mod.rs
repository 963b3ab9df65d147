pub mod health;
pub mod pages;

pub use health::{AppStartTime, HealthService, health_routes};
pub use pages::{PageService, page_routes};
