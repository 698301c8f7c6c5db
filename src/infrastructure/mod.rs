//! Infrastructure layer - external concerns

pub mod storage;

pub use storage::{InMemoryStorage, Storage};
