//! REST API presentation layer

pub mod dto;
mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use router::{AppState, create_router};
