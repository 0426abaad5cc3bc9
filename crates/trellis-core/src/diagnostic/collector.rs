//! Collector for accumulating diagnostics during validation.
//!
//! The [`DiagnosticCollector`] lets a check report every problem it finds
//! instead of failing on the first one.

use crate::diagnostic::{Diagnostic, ValidationError};

/// A collector for accumulating diagnostics.
///
/// # Example
///
/// ```
/// # use trellis_core::diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode};
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::warning("cluster `spare` has no nodes").with_code(ErrorCode::W100));
///
/// let warnings = collector.finish().expect("warnings alone do not fail");
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// - If any error was emitted, returns `Err(ValidationError)` with all
    ///   diagnostics, warnings included.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ValidationError> {
        if self.has_errors {
            Err(ValidationError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
