mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{DEFAULT_CONFIG_PATH, get_config, init_config};
pub use structs::*;
