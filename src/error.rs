//! Error types for website_stack

use thiserror::Error;

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors raised while building or writing a stack declaration.
/// Every variant is a synthesis-time failure; nothing here maps to a
/// provider-side (runtime) error.
#[derive(Error, Debug)]
pub enum StackError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Group name does not satisfy naming rules
    #[error("Invalid group name '{name}': {message}")]
    InvalidGroupName { name: String, message: String },

    /// Stack name does not satisfy CloudFormation naming rules
    #[error("Invalid stack name '{name}': {message}")]
    InvalidStackName { name: String, message: String },

    /// Resource failed its own validation
    #[error("Validation failed on resource '{name}': {message}")]
    InvalidResource { name: String, message: String },

    /// Two resources were declared under the same logical id
    #[error("Duplicate logical resource id '{0}'")]
    DuplicateResource(String),

    /// Record name sits outside the hosted zone it was declared in
    #[error("Record name '{record}' does not belong to hosted zone '{zone}'")]
    RecordOutsideZone { record: String, zone: String },

    /// Region code has no known S3 website endpoint
    #[error("Unknown region code '{0}'")]
    UnknownRegion(String),

    /// Source IP is not valid IPv4 CIDR notation
    #[error("Invalid source IP '{0}': expected an IPv4 address in CIDR notation")]
    InvalidSourceIp(String),

    /// Geo restriction entry is not an ISO 3166 alpha-2 code
    #[error("Invalid country code '{0}': expected two uppercase letters")]
    InvalidCountryCode(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_the_path() {
        let err = StackError::ConfigNotFound { path: "/tmp/absent.toml".into() };
        let text = err.to_string();
        assert!(text.contains("not found"));
        assert!(text.contains("/tmp/absent.toml"));
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here")?)
        }
        assert!(matches!(read().unwrap_err(), StackError::Io(_)));
    }
}
