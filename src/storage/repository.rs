use std::time::Duration as StdDuration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::models::{Dog, DogPatch, NewDog};

use super::error::StorageError;

pub struct PoolStatus {
    pub active_connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

pub struct DogRepository {
    pool: PgPool,
}

impl DogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(StdDuration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            active_connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Lists all dogs, optionally filtered to names containing `name_has`
    /// as a case-sensitive substring.
    pub async fn list_dogs(&self, name_has: Option<&str>) -> Result<Vec<Dog>, StorageError> {
        let dogs = sqlx::query_as::<_, Dog>(
            r#"
            SELECT id, name, description, breed, age
            FROM dogs
            WHERE $1::text IS NULL OR strpos(name, $1) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(name_has)
        .fetch_all(&self.pool)
        .await?;

        Ok(dogs)
    }

    pub async fn create_dog(&self, new_dog: &NewDog) -> Result<Dog, StorageError> {
        let dog = sqlx::query_as::<_, Dog>(
            r#"
            INSERT INTO dogs (name, description, breed, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, breed, age
            "#,
        )
        .bind(&new_dog.name)
        .bind(&new_dog.description)
        .bind(&new_dog.breed)
        .bind(new_dog.age)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from_write_error)?;

        Ok(dog)
    }

    pub async fn get_dog(&self, id: i64) -> Result<Option<Dog>, StorageError> {
        let dog = sqlx::query_as::<_, Dog>(
            r#"
            SELECT id, name, description, breed, age
            FROM dogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dog)
    }

    /// Applies a partial update; fields left `None` in the patch keep their
    /// stored value. `id` is immutable and not part of the patch.
    pub async fn update_dog(&self, id: i64, patch: &DogPatch) -> Result<Dog, StorageError> {
        sqlx::query_as::<_, Dog>(
            r#"
            UPDATE dogs
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                breed = COALESCE($4, breed),
                age = COALESCE($5, age)
            WHERE id = $1
            RETURNING id, name, description, breed, age
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.breed)
        .bind(patch.age)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Dog not found: {}", id)))
    }

    /// Deletes a dog and returns its last stored state, or `None` when no
    /// row with that id existed.
    pub async fn delete_dog(&self, id: i64) -> Result<Option<Dog>, StorageError> {
        let dog = sqlx::query_as::<_, Dog>(
            r#"
            DELETE FROM dogs
            WHERE id = $1
            RETURNING id, name, description, breed, age
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dog)
    }
}
