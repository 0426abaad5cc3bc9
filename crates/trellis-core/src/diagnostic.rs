//! Diagnostics raised against a diagram description.
//!
//! A [`Diagnostic`] is a single error or warning with an optional
//! [`ErrorCode`] and help text. Validation gathers every diagnostic it finds
//! and returns the errors together as a [`ValidationError`].
//!
//! # Example
//!
//! ```
//! # use trellis_core::diagnostic::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("edge target `db` is not a declared node")
//!     .with_code(ErrorCode::E200)
//!     .with_help("declare `db` inside a cluster before connecting it");
//!
//! assert_eq!(diag.to_string(), "error[E200]: edge target `db` is not a declared node");
//! ```

mod collector;
mod error_code;
mod severity;
mod validation_error;

use std::fmt;

pub use collector::DiagnosticCollector;
pub use error_code::ErrorCode;
pub use severity::Severity;
pub use validation_error::ValidationError;

/// A coded error or warning message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
