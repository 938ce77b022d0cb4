//! Domain entities and value objects for the marketplace catalog core.

pub mod catalog;
pub mod category;
pub mod feedback;
pub mod offer;
pub mod types;
