pub use crate::services::errors::{ServiceError, ServiceResult};

pub mod catalog;
pub mod errors;
pub mod feedback;
pub mod offers;
