//! API Handlers

pub mod health;
pub mod products;

pub use health::*;
pub use products::*;
