pub mod error;
pub mod repository;

pub use error::StorageError;
pub use repository::{DogRepository, PoolStatus};
