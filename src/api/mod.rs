mod dto;
mod error;
mod handlers;
pub mod middleware;
mod routes;
mod validation;

pub use error::ApiError;
pub use middleware::CorrelationId;
pub use routes::{create_router, AppState};
