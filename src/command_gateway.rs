//! Compile gateway backed by an external compiler command.
//!
//! The assembled unit is written to a scratch directory and the configured
//! compiler is invoked on it:
//!
//! ```text
//! <compiler> --target library --out <artifact> [--reference <lib>]... <unit>...
//! ```
//!
//! A zero exit status means the artifact file holds the result; anything
//! else is mapped line-by-line from stderr into gateway diagnostics.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use log::debug;
use scriptfuse_assembler::diagnostics::Diagnostic;
use scriptfuse_assembler::gateway::{ArtifactKind, CompileGateway, GatewayDiagnostic, Reference};

pub struct CommandGateway {
    program: String,
    scratch_dir: PathBuf,
}

impl CommandGateway {
    pub fn new(program: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    fn run(
        &self,
        units: &[String],
        references: &[Reference],
        kind: ArtifactKind,
    ) -> io::Result<Result<Vec<u8>, Vec<Box<dyn Diagnostic>>>> {
        std::fs::create_dir_all(&self.scratch_dir).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "failed to create scratch directory '{}': {}",
                    self.scratch_dir.display(),
                    e
                ),
            )
        })?;

        let mut unit_paths = Vec::new();
        for (index, unit) in units.iter().enumerate() {
            let path = self.scratch_dir.join(format!("unit{index}.src"));
            std::fs::write(&path, unit)?;
            unit_paths.push(path);
        }

        let artifact_path = self.scratch_dir.join("artifact.lib");
        let mut command = Command::new(&self.program);
        match kind {
            ArtifactKind::Library => command.arg("--target").arg("library"),
        };
        command.arg("--out").arg(&artifact_path);
        for reference in references {
            command.arg("--reference").arg(&reference.path);
        }
        command.args(&unit_paths);

        debug!("invoking compiler: {:?}", command);
        let output = command.output().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to run compiler '{}': {}", self.program, e),
            )
        })?;

        if !output.status.success() {
            return Ok(Err(diagnostics_from_stderr(&output.stderr)));
        }

        Ok(Ok(std::fs::read(&artifact_path)?))
    }
}

impl CompileGateway for CommandGateway {
    fn compile(
        &self,
        units: &[String],
        references: &[Reference],
        kind: ArtifactKind,
    ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
        match self.run(units, references, kind) {
            Ok(result) => result,
            Err(e) => Err(vec![Box::new(GatewayDiagnostic::error(e.to_string()))]),
        }
    }
}

/// One diagnostic per non-empty stderr line; lines announcing themselves as
/// warnings keep that severity, everything else is an error. The returned
/// list always contains at least one error.
fn diagnostics_from_stderr(stderr: &[u8]) -> Vec<Box<dyn Diagnostic>> {
    let text = String::from_utf8_lossy(stderr);
    let mut diagnostics: Vec<Box<dyn Diagnostic>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let diagnostic = if line.trim_start().to_ascii_lowercase().starts_with("warning") {
                GatewayDiagnostic::warning(line.trim())
            } else {
                GatewayDiagnostic::error(line.trim())
            };
            Box::new(diagnostic) as Box<dyn Diagnostic>
        })
        .collect();

    if !diagnostics
        .iter()
        .any(|d| d.severity() == scriptfuse_assembler::diagnostics::ReportSeverity::Error)
    {
        diagnostics.push(Box::new(GatewayDiagnostic::error(
            "compiler exited with a failure status",
        )));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptfuse_assembler::diagnostics::ReportSeverity;

    #[test]
    fn stderr_lines_become_diagnostics() {
        let diagnostics = diagnostics_from_stderr(b"warning: shadowed name\nerror: bad token\n");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].severity(), ReportSeverity::Warning);
        assert_eq!(diagnostics[1].severity(), ReportSeverity::Error);
    }

    #[test]
    fn failure_always_carries_an_error() {
        let diagnostics = diagnostics_from_stderr(b"warning: only warnings here\n");
        assert!(diagnostics
            .iter()
            .any(|d| d.severity() == ReportSeverity::Error));
    }

    #[test]
    fn missing_compiler_surfaces_as_error_diagnostic() {
        let scratch = tempfile::tempdir().unwrap();
        let gateway = CommandGateway::new("scriptfuse-no-such-compiler", scratch.path());
        let result = gateway.compile(
            &["namespace Game { }".to_string()],
            &[],
            ArtifactKind::Library,
        );
        let diagnostics = result.unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), ReportSeverity::Error);
    }
}
