use thiserror::Error;

/// 單行紀錄解析失敗的原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatErrorKind {
    #[error("unknown record tag '{0}' (expected REALESTATE or PANEL)")]
    UnknownTag(String),

    #[error("expected at least {expected} fields, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown genre '{0}'")]
    UnknownGenre(String),
}

/// A rejected input line. `line` is 1-based; 0 means the line was parsed
/// without file context.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    pub line: usize,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind) -> Self {
        Self { line: 0, kind }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

#[derive(Error, Debug)]
pub enum RealtyError {
    #[error("Source '{path}' could not be read: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No listings loaded, report cannot be built")]
    EmptyStore,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
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
    Data,
    Source,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RealtyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RealtyError::EmptyStore => ErrorCategory::Data,
            RealtyError::SourceUnavailable { .. } => ErrorCategory::Source,
            RealtyError::IoError(_)
            | RealtyError::CsvError(_)
            | RealtyError::SerializationError(_) => ErrorCategory::Output,
            RealtyError::ConfigValidationError { .. }
            | RealtyError::InvalidConfigValueError { .. }
            | RealtyError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 空資料只是警告
            RealtyError::EmptyStore => ErrorSeverity::Low,
            RealtyError::SourceUnavailable { .. } => ErrorSeverity::Medium,
            RealtyError::CsvError(_) | RealtyError::SerializationError(_) => ErrorSeverity::High,
            RealtyError::ConfigValidationError { .. }
            | RealtyError::InvalidConfigValueError { .. }
            | RealtyError::MissingConfigError { .. } => ErrorSeverity::High,
            RealtyError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RealtyError::SourceUnavailable { .. } => {
                "Make sure the input file exists and is readable"
            }
            RealtyError::EmptyStore => "Provide at least one valid listing in the input file",
            RealtyError::IoError(_) => "Check that the output directory is writable",
            RealtyError::CsvError(_) | RealtyError::SerializationError(_) => {
                "Try a different output format or report the listing that failed"
            }
            RealtyError::ConfigValidationError { .. }
            | RealtyError::InvalidConfigValueError { .. }
            | RealtyError::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RealtyError::SourceUnavailable { path, .. } => {
                format!("Error reading file: {}", path)
            }
            RealtyError::EmptyStore => "No data loaded!".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RealtyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_carries_line_number() {
        let err = FormatError::new(FormatErrorKind::UnknownGenre("CASTLE".to_string())).at_line(7);
        assert_eq!(err.line, 7);
        assert_eq!(err.to_string(), "line 7: unknown genre 'CASTLE'");
    }

    #[test]
    fn test_empty_store_is_low_severity() {
        let err = RealtyError::EmptyStore;
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "No data loaded!");
    }

    #[test]
    fn test_source_unavailable_message_names_path() {
        let err = RealtyError::SourceUnavailable {
            path: "data.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("data.txt"));
    }

    #[test]
    fn test_every_variant_maps_to_a_category() {
        let cases = [
            (RealtyError::EmptyStore, ErrorCategory::Data),
            (
                RealtyError::IoError(std::io::Error::other("disk full")),
                ErrorCategory::Output,
            ),
            (
                RealtyError::MissingConfigError {
                    field: "input".to_string(),
                },
                ErrorCategory::Configuration,
            ),
        ];

        for (err, category) in cases {
            assert_eq!(err.category(), category);
            assert!(!err.recovery_suggestion().is_empty());
        }
    }
}
