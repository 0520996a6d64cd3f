use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomatorError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch for `{selector}`: expected {expected}, found {found}")]
    TypeMismatch {
        selector: String,
        expected: String,
        found: String,
    },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Model lookup failed: {0}")]
    ConfigLookup(String),

    #[error("Script execution failed: {0}")]
    ScriptFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AutomatorError>;

impl AutomatorError {
    /// Standard failure for a selector that never satisfied a wait condition.
    pub fn timed_out(selector: &str, condition: &str) -> Self {
        AutomatorError::NotFound(format!(
            "`{selector}` did not satisfy `{condition}` within the timeout"
        ))
    }
}
