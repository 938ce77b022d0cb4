pub mod feedback;
pub mod products;
