use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `dogs` table. `id` is assigned by the store on insert
/// and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dog {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub breed: Option<String>,
    pub age: Option<f64>,
}

/// Payload for creating a dog. Produced by request validation, so the
/// type invariants (name and description present, age numeric) already hold.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub description: String,
    pub breed: Option<String>,
    pub age: Option<f64>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
}
