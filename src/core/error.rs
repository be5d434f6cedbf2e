//! Error types for the square-sum pool

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, SumsqError>;

/// Errors that can occur while configuring, running or driving the pool
///
/// Job processing itself cannot fail; every variant here is either a startup
/// rejection, a thread lifecycle failure, or a problem with the driving input.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SumsqError {
    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// Failed to spawn a worker thread with details
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    SpawnError {
        /// Ordinal of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    JoinError {
        /// Ordinal of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// Malformed command in a job script
    #[error("Script error at line {line}: {message}")]
    Script {
        /// 1-based line number of the offending record
        line: usize,
        /// Error message
        message: String,
    },

    /// Reading the job script failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a run report failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SumsqError {
    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        SumsqError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        SumsqError::SpawnError {
            worker_id,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        SumsqError::JoinError {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a script error
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        SumsqError::Script {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SumsqError::invalid_config("num_workers", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'num_workers': must be greater than 0"
        );

        let err = SumsqError::script(7, "unrecognized action 'x'");
        assert_eq!(
            err.to_string(),
            "Script error at line 7: unrecognized action 'x'"
        );

        let err = SumsqError::join(3, "worker panicked");
        assert_eq!(
            err.to_string(),
            "Failed to join worker thread #3: worker panicked"
        );
    }

    #[test]
    fn test_spawn_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WouldBlock, "no threads left");
        let err = SumsqError::spawn_with_source(5, "Cannot create thread", io_err);

        assert!(matches!(err, SumsqError::SpawnError { worker_id: 5, .. }));
        assert!(err.to_string().contains("worker thread #5"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: SumsqError = io_err.into();
        assert!(matches!(err, SumsqError::Io(_)));
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<u64>("not json").unwrap_err();
        let err: SumsqError = json_err.into();
        assert!(matches!(err, SumsqError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
