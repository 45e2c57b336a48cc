use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type that represents all possible errors in the system.
///
/// HTTP-facing code wraps this in `ApiError`, which decides the status code
/// and the envelope message for the failing operation.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input that could not be parsed (malformed JSON, bad query string)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Path id that is not an integer
    #[error("Invalid id '{value}': {reason}")]
    InvalidId { value: String, reason: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Wraps a store error with the operation that produced it.
    pub fn database(operation: &str, error: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.to_string(),
            source: error.into(),
        }
    }

    /// Message suitable for the `error` field of a failure envelope.
    ///
    /// Store failures expose the raw store message; everything else uses
    /// the error's own description.
    pub fn detail(&self) -> String {
        match self {
            AppError::Database { source, .. } => source.to_string(),
            AppError::ConnectionPool { source } => source.to_string(),
            AppError::BadRequest { message } => message.clone(),
            AppError::InvalidId { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        AppError::database("database operation", error)
    }
}

impl From<diesel_async::pooled_connection::PoolError> for AppError {
    fn from(error: diesel_async::pooled_connection::PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        match error {
            bb8::RunError::User(inner) => inner.into(),
            bb8::RunError::TimedOut => AppError::ConnectionPool {
                source: anyhow::anyhow!("timed out waiting for a database connection"),
            },
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_detail_is_raw_store_message() {
        let err = AppError::database("insert user", anyhow::anyhow!("no such table: users"));
        assert_eq!(err.detail(), "no such table: users");
        assert_eq!(err.to_string(), "Database operation failed: insert user");
    }

    #[test]
    fn test_diesel_error_converts_to_database() {
        let err = AppError::from(diesel::result::Error::NotFound);
        match err {
            AppError::Database { operation, .. } => assert_eq!(operation, "database operation"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_pool_timeout_converts_to_connection_pool() {
        let err = AppError::from(bb8::RunError::<diesel_async::pooled_connection::PoolError>::TimedOut);
        assert!(matches!(err, AppError::ConnectionPool { .. }));
        assert!(err.detail().contains("timed out"));
    }

    #[test]
    fn test_config_validation_error_keeps_field() {
        let err = AppError::from(ConfigError::validation("server.port", "Port must be non-zero"));
        match err {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration error, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_id_display() {
        let err = AppError::InvalidId {
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid id 'abc': invalid digit found in string");
        assert_eq!(err.detail(), "invalid digit found in string");
    }
}
