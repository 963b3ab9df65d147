//! Application lifecycle

pub mod lifetime;
pub mod modes;
