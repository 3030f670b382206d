use thiserror::Error;

/// Errors surfaced to the host framework.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A failure reported by Impala while running a statement.
    #[error("Database Error\n  {message}")]
    Database { message: String },

    /// Anything else that went wrong while running a statement.
    #[error("Runtime Error\n  {message}")]
    Runtime { message: String },

    #[error("Failed to connect to {host}:{port}: {message}")]
    FailedToConnect {
        host: String,
        port: u16,
        message: String,
    },

    #[error("Connection '{name}' is not open")]
    ConnectionNotOpen { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Database,
    Connection,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AdapterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdapterError::Database { .. } | AdapterError::Runtime { .. } => ErrorCategory::Database,
            AdapterError::FailedToConnect { .. } | AdapterError::ConnectionNotOpen { .. } => {
                ErrorCategory::Connection
            }
            AdapterError::IoError(_) => ErrorCategory::System,
            AdapterError::ConfigError { .. }
            | AdapterError::ConfigValidationError { .. }
            | AdapterError::InvalidConfigValueError { .. }
            | AdapterError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Connection => ErrorSeverity::Medium,
            ErrorCategory::Database | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdapterError::Database { .. } => "Check the compiled SQL against the Impala query log",
            AdapterError::Runtime { .. } => "Re-run with --verbose to see the failing statement",
            AdapterError::FailedToConnect { .. } => {
                "Verify host and port, and that the Impala daemon accepts HiveServer2 clients"
            }
            AdapterError::ConnectionNotOpen { .. } => "Open the connection before issuing queries",
            AdapterError::IoError(_) => "Check file permissions and that the path exists",
            AdapterError::ConfigError { .. } | AdapterError::ConfigValidationError { .. } => {
                "Fix the profile file and try again"
            }
            AdapterError::InvalidConfigValueError { .. } => "Correct the value in the profile",
            AdapterError::MissingConfigError { .. } => "Add the missing key to the profile",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdapterError::Database { message } => format!("Impala rejected the query: {}", message),
            AdapterError::Runtime { message } => format!("Query failed: {}", message),
            AdapterError::FailedToConnect { host, port, .. } => {
                format!("Could not connect to Impala at {}:{}", host, port)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

/// Failures raised by the Impala client library, following the DB-API exception tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("{0}")]
    Interface(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Operational(String),

    #[error("{0}")]
    Programming(String),

    #[error("{0}")]
    Integrity(String),

    #[error("{0}")]
    Data(String),

    #[error("{0}")]
    NotSupported(String),

    #[error("{0}")]
    Internal(String),

    /// Transport or client-side failures outside the DB-API hierarchy.
    #[error("{0}")]
    Other(String),
}

impl DriverError {
    /// True for every kind that derives from `DatabaseError`.
    pub fn is_database_error(&self) -> bool {
        !matches!(self, DriverError::Interface(_) | DriverError::Other(_))
    }
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

impl From<DriverError> for AdapterError {
    fn from(err: DriverError) -> Self {
        if err.is_database_error() {
            AdapterError::Database {
                message: err.to_string(),
            }
        } else {
            AdapterError::Runtime {
                message: err.to_string(),
            }
        }
    }
}
