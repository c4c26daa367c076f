use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorageError {
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::DatabaseError(e) => {
                matches!(
                    e,
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True when the store rejected the data itself rather than failing
    /// operationally.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Classifies a write failure. PostgreSQL class 22 (data exception) and
    /// class 23 (integrity constraint violation) codes become `InvalidInput`;
    /// everything else stays a plain database error.
    pub fn from_write_error(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let is_data_error = db
                .code()
                .map(|c| c.starts_with("22") || c.starts_with("23"))
                .unwrap_or(false);
            if is_data_error {
                return Self::InvalidInput(db.message().to_string());
            }
        }
        Self::DatabaseError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_variant_is_invalid_input() {
        let err = StorageError::InvalidInput("age should be a number".to_string());
        assert!(err.is_invalid_input());
        assert!(!err.is_not_found());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_not_found_is_not_invalid_input() {
        let err = StorageError::NotFound("Dog not found: 7".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let err = StorageError::DatabaseError(sqlx::Error::PoolTimedOut);
        assert!(err.is_connection_error());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_operational_write_error_stays_database_error() {
        let err = StorageError::from_write_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, StorageError::DatabaseError(_)));
        assert!(!err.is_invalid_input());
    }
}
