use thiserror::Error;
use tracing::warn;

/// Error severity for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // expected, nothing to report
    Warning,  // recoverable, request dropped
    Error,    // operation failed
}

/// Domain-specific errors for the overlay
#[derive(Error, Debug)]
pub enum NuiError {
    #[error("Invalid input config: missing or malformed fields ({0})")]
    MalformedSchema(String),

    #[error("unsupported field type '{kind}' for field '{name}'")]
    UnsupportedFieldKind { name: String, kind: String },

    #[error("Invalid definition for field '{name}': {reason}")]
    InvalidField { name: String, reason: String },

    #[error("Duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("No field named '{0}' in the open popup")]
    UnknownField(String),

    #[error("Invalid color value '{0}'")]
    InvalidColor(String),

    #[error("Required field '{0}' is empty")]
    RequiredFieldMissing(String),

    #[error("Cannot open {requested}: {active} is active")]
    SurfaceBusy {
        requested: &'static str,
        active: &'static str,
    },

    #[error("No {0} is open")]
    NotOpen(&'static str),

    #[error("Failed to parse protocol message: {0}")]
    ProtocolParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Callback post failed: {0}")]
    Transport(String),
}

impl NuiError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedSchema(_) => ErrorSeverity::Error,
            Self::UnsupportedFieldKind { .. } => ErrorSeverity::Error,
            Self::InvalidField { .. } => ErrorSeverity::Error,
            Self::DuplicateField(_) => ErrorSeverity::Error,
            Self::UnknownField(_) => ErrorSeverity::Warning,
            Self::InvalidColor(_) => ErrorSeverity::Warning,
            Self::RequiredFieldMissing(_) => ErrorSeverity::Info,
            Self::SurfaceBusy { .. } => ErrorSeverity::Warning,
            Self::NotOpen(_) => ErrorSeverity::Info,
            Self::ProtocolParse(_) => ErrorSeverity::Warning,
            Self::Config(_) => ErrorSeverity::Warning,
            Self::Transport(_) => ErrorSeverity::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedSchema(_) => "The input form could not be built".to_string(),
            Self::UnsupportedFieldKind { kind, .. } => {
                format!("Field type '{}' is not supported", kind)
            }
            Self::InvalidField { name, reason } => format!("Field '{}': {}", name, reason),
            Self::DuplicateField(name) => format!("Field '{}' is defined twice", name),
            Self::UnknownField(name) => format!("Unknown field '{}'", name),
            Self::InvalidColor(value) => format!("'{}' is not a color", value),
            Self::RequiredFieldMissing(name) => format!("Please fill out '{}'", name),
            Self::SurfaceBusy { active, .. } => format!("The {} is still open", active),
            Self::NotOpen(surface) => format!("No {} is open", surface),
            Self::ProtocolParse(e) => format!("Invalid message format: {}", e),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
            Self::Transport(msg) => format!("Could not reach host: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, NuiError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the host doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use nui_menu::error::ResultExt;
///
/// let config = load_file(path).warn_on_err().unwrap_or_default();
/// ```
pub trait ResultExt<T> {
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
