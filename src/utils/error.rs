use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A publication titled '{title}' already exists")]
    DuplicatePublication { title: String },

    #[error("A user with national id '{national_id}' already exists")]
    DuplicateUser { national_id: String },

    #[error("Unknown publication type '{tag}'")]
    UnknownType { tag: String },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        source: std::io::Error,
    },

    #[error("No menu option with id {value}")]
    InvalidSelection { value: i64 },

    #[error("Input was not a number")]
    NonNumericInput,

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
