//! Diesel row models and their conversions to and from domain entities.

pub mod catalog;
pub mod category;
pub mod config;
pub mod feedback;
pub mod offer;
