use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListViewError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("List view settings already registered for '{doctype}'")]
    RegistrationError { doctype: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
    Registration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ListViewError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ListViewError::ConfigError { .. }
            | ListViewError::InvalidConfigValueError { .. }
            | ListViewError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ListViewError::IoError(_) => ErrorCategory::Io,
            ListViewError::CsvError(_)
            | ListViewError::SerializationError(_)
            | ListViewError::ProcessingError { .. }
            | ListViewError::ValidationError { .. } => ErrorCategory::Data,
            ListViewError::RegistrationError { .. } => ErrorCategory::Registration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::High,
            // 重複註冊代表程式本身的組裝錯誤
            ErrorCategory::Registration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ListViewError::CsvError(_) => {
                "Check that the input CSV has a header row and consistent columns"
            }
            ListViewError::IoError(_) => "Check that the input file exists and the output path is writable",
            ListViewError::SerializationError(_) => "Check that the input JSON is an array of objects",
            ListViewError::ConfigError { .. } => "Check the TOML syntax of the configuration file",
            ListViewError::InvalidConfigValueError { .. } => {
                "Correct the highlighted configuration value and run again"
            }
            ListViewError::MissingConfigError { .. } => "Add the missing setting to the CLI flags or TOML file",
            ListViewError::RegistrationError { .. } => "Register each document type only once at startup",
            ListViewError::ProcessingError { .. } | ListViewError::ValidationError { .. } => {
                "Inspect the offending rows with --verbose"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ListViewError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ListViewError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ListViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_category() {
        let err = ListViewError::MissingConfigError {
            field: "input".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = ListViewError::RegistrationError {
            doctype: "Process Order".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_friendly_message() {
        let err = ListViewError::InvalidConfigValueError {
            field: "output.formats".to_string(),
            value: "xml".to_string(),
            reason: "Unsupported format".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Setting 'output.formats' is invalid: Unsupported format"
        );
    }
}
