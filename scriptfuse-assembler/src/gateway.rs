//! Boundary to the external compiler toolchain.
//!
//! The engine emits a finished compilation unit and hands it across this
//! trait; everything past that point (process invocation, reference
//! resolution, artifact layout) belongs to the gateway implementation.

use std::path::PathBuf;

use crate::diagnostics::{Diagnostic, ReportSeverity, SourceLocation};

/// Location of a precompiled library the external compiler links against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub path: PathBuf,
}

impl Reference {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

/// Kind of artifact requested from the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A loadable dynamic library.
    Library,
}

/// External compiler boundary.
///
/// On success the gateway returns the raw artifact bytes. On failure it
/// returns a non-empty list of diagnostics, at least one of which carries
/// [`ReportSeverity::Error`]; the engine forwards the list verbatim and
/// never retries.
pub trait CompileGateway {
    fn compile(
        &self,
        units: &[String],
        references: &[Reference],
        kind: ArtifactKind,
    ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>>;
}

/// A diagnostic as it comes back over the gateway boundary: a severity and a
/// message, nothing more. The engine never constructs these itself.
#[derive(Debug, Clone)]
pub struct GatewayDiagnostic {
    pub severity: ReportSeverity,
    pub message: String,
}

impl GatewayDiagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: ReportSeverity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: ReportSeverity::Warning,
            message: message.into(),
        }
    }
}

impl Diagnostic for GatewayDiagnostic {
    fn severity(&self) -> ReportSeverity {
        self.severity
    }

    fn title(&self) -> String {
        match self.severity {
            ReportSeverity::Error => "Compile Error".to_string(),
            ReportSeverity::Warning => "Compile Warning".to_string(),
            ReportSeverity::Info => "Compile Note".to_string(),
        }
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn location(&self) -> Option<SourceLocation> {
        None
    }

    fn help(&self) -> Option<String> {
        None
    }

    fn copy(&self) -> Box<dyn Diagnostic> {
        Box::new(self.clone())
    }
}
