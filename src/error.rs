use miette::Diagnostic;
use thiserror::Error;

/// Main error type for imgmap operations
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error("IO error: {0}")]
    #[diagnostic(code(imgmap::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(imgmap::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(imgmap::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(imgmap::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unsupported image format: {format}")]
    #[diagnostic(
        code(imgmap::format),
        help("Run `imgmap formats` to list the available formats")
    )]
    UnsupportedFormat { format: String },

    #[error("Image error: {message}")]
    #[diagnostic(code(imgmap::image))]
    Image { message: String },

    #[error("Apply error: {message}")]
    #[diagnostic(code(imgmap::apply))]
    Apply { message: String },
}

impl MapError {
    /// Diagnostic code used when reporting this error against a program line.
    pub fn code(&self) -> &'static str {
        match self {
            MapError::IoError(_) | MapError::Io { .. } => "imgmap::io",
            MapError::Parse { .. } => "imgmap::parse",
            MapError::Validation { .. } => "imgmap::validate",
            MapError::UnsupportedFormat { .. } => "imgmap::format",
            MapError::Image { .. } => "imgmap::image",
            MapError::Apply { .. } => "imgmap::apply",
        }
    }

    /// Help text attached to this error, if any.
    pub fn help_text(&self) -> Option<&str> {
        match self {
            MapError::Parse { help, .. } | MapError::Validation { help, .. } => help.as_deref(),
            _ => None,
        }
    }

    /// Prefix the message of a parse or validation error with some context.
    pub fn context(self, what: &str) -> Self {
        match self {
            MapError::Parse { message, help } => MapError::Parse {
                message: format!("{}: {}", what, message),
                help,
            },
            MapError::Validation { message, help } => MapError::Validation {
                message: format!("{}: {}", what, message),
                help,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
