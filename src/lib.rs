//! Core library exports for the Agora marketplace service.
//!
//! The heart of the crate is the catalog matching pipeline: keyword
//! extraction, candidate retrieval over an inverted index, confidence scoring
//! and a dual-threshold decision policy, used both by the interactive
//! suggestion endpoint and by unattended submission resolution.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod matching;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
