use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Malformed event: {message}")]
    MalformedEventError { message: String },

    #[error("Object not found: {key}")]
    ObjectNotFoundError { key: String },

    #[error("Access denied for {key}: {message}")]
    AccessDeniedError { key: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Empty CSV data: {message}")]
    EmptyDataError { message: String },

    #[error("Cannot coerce \"{column}\" value \"{value}\" at row {row}: {reason}")]
    CoercionError {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    #[error("Column \"{column}\" not found in input")]
    MissingColumnError { column: String },

    #[error("Failed to read {key} from storage: {message}")]
    StorageReadError { key: String, message: String },

    #[error("Failed to write {key} to storage: {message}")]
    StorageWriteError { key: String, message: String },

    #[error("{operation} timed out after {seconds}s")]
    TimeoutError { operation: String, seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: \"{value}\" ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CleanerError>;
