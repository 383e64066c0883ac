//! permapress domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `render`: Pure HTML page rendering (article pages and listing pages)
//! - `usecases`: Application use cases / business logic

pub mod model;
pub mod ports;
pub mod render;
pub mod usecases;

#[cfg(test)]
pub(crate) mod fakes;

pub use model::*;
pub use ports::*;
