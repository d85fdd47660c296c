use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridOverrideError {
    #[error("grid override {override_name} requires index headers {missing:?}")]
    MissingKeys {
        override_name: String,
        missing: Vec<String>,
    },
    #[error("grid override {override_name} requires parameters {missing:?}")]
    MissingParameter {
        override_name: String,
        missing: Vec<String>,
    },
    #[error("grid override {override_name} cannot be combined with {conflicts_with}")]
    IncompatibleOverrides {
        override_name: String,
        conflicts_with: String,
    },
    #[error("unknown grid override: {0}")]
    UnknownOverride(String),
    #[error("header {name} has {actual} values but the index holds {expected} traces")]
    MismatchedHeaderLength {
        name: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridOverrideError>;
