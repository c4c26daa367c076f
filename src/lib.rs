pub mod api;
pub mod config;
pub mod metrics;
pub mod models;
pub mod storage;

pub use api::{create_router, ApiError, AppState, CorrelationId};
pub use config::AppConfig;
pub use metrics::init_metrics;
pub use models::{Dog, DogPatch, NewDog};
pub use storage::{DogRepository, PoolStatus, StorageError};
