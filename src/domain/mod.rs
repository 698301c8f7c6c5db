pub mod error;
pub mod product;

pub use error::{DomainError, DomainResult};
pub use product::Product;
