//! One build invocation per asset kind.
//!
//! Scripts, systems and scenes each get their own assembler instance and
//! their own artifact, so nothing is shared between invocations and they
//! may run back to back (or from independent processes) without
//! interference.

use std::io;
use std::path::PathBuf;

use log::{debug, info};
use scriptfuse_assembler::assembler::Assembler;
use scriptfuse_assembler::config::AssemblerConfig;
use scriptfuse_assembler::diagnostics::collector::DiagnosticCollector;
use scriptfuse_assembler::embed::embed;
use scriptfuse_assembler::gateway::CompileGateway;
use scriptfuse_assembler::source::Source;

use crate::scene::{owner_name, SceneGraph};
use crate::walk::{collect_files, namespace_hint};

pub const SCRIPT_SUFFIX: &str = ".src";
pub const SCENE_SUFFIX: &str = ".scene.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Scripts,
    Systems,
    Scenes,
}

impl AssetKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Scripts => "scripts",
            AssetKind::Systems => "systems",
            AssetKind::Scenes => "scenes",
        }
    }
}

pub struct BuildRequest {
    pub kind: AssetKind,
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub recurse: bool,
    pub emit_source: bool,
}

/// Run one build invocation end to end.
///
/// Returns `Ok(true)` when the artifact was written, `Ok(false)` when the
/// gateway rejected the unit (its diagnostics are in the collector), and
/// `Err` only for filesystem problems on our side of the boundary.
pub fn run_build(
    request: &BuildRequest,
    config: AssemblerConfig,
    gateway: &dyn CompileGateway,
    collector: &mut DiagnosticCollector,
) -> io::Result<bool> {
    let mut assembler = Assembler::new(config);

    match request.kind {
        AssetKind::Scripts | AssetKind::Systems => {
            add_scripts(&mut assembler, collector, request)?
        }
        AssetKind::Scenes => add_scenes(&mut assembler, request)?,
    }

    if request.emit_source {
        let dump_path = request.output_path.with_extension("unit.src");
        std::fs::write(&dump_path, assembler.finalize().render())?;
        info!("wrote assembled source to {}", dump_path.display());
    }

    match assembler.compile(gateway) {
        Ok(artifact) => {
            std::fs::write(&request.output_path, artifact)?;
            info!(
                "{}: artifact written to {}",
                request.kind.label(),
                request.output_path.display()
            );
            Ok(true)
        }
        Err(diagnostics) => {
            for diagnostic in diagnostics {
                collector.report(diagnostic);
            }
            Ok(false)
        }
    }
}

fn add_scripts(
    assembler: &mut Assembler,
    collector: &mut DiagnosticCollector,
    request: &BuildRequest,
) -> io::Result<()> {
    let root_namespace = assembler.config().root_namespace.clone();
    let files = collect_files(&request.input_dir, SCRIPT_SUFFIX, request.recurse)?;
    info!(
        "{}: merging {} fragments from {}",
        request.kind.label(),
        files.len(),
        request.input_dir.display()
    );
    for path in files {
        let source = Source::from_file(&path)?;
        let hint = namespace_hint(&root_namespace, &request.input_dir, &path);
        debug!(
            "fragment {} -> namespace {}",
            path.display(),
            hint.as_deref().unwrap_or(&root_namespace)
        );
        assembler.add_script(collector, hint.as_deref(), &source);
    }
    Ok(())
}

fn add_scenes(assembler: &mut Assembler, request: &BuildRequest) -> io::Result<()> {
    let files = collect_files(&request.input_dir, SCENE_SUFFIX, request.recurse)?;
    info!(
        "scenes: embedding {} snapshots from {}",
        files.len(),
        request.input_dir.display()
    );
    for path in files {
        let graph = SceneGraph::load(&path)?;
        let payload = graph.canonical_bytes()?;
        let blob = embed(&owner_name(&path, SCENE_SUFFIX), &payload);
        debug!(
            "scene {} -> {} base64 chars",
            path.display(),
            blob.base64_payload().len()
        );
        assembler.add_blob(&blob);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptfuse_assembler::diagnostics::Diagnostic;
    use scriptfuse_assembler::gateway::{ArtifactKind, GatewayDiagnostic, Reference};
    use std::fs;

    /// Returns the rendered unit as the "artifact" so tests can inspect it.
    struct EchoGateway;

    impl CompileGateway for EchoGateway {
        fn compile(
            &self,
            units: &[String],
            _references: &[Reference],
            _kind: ArtifactKind,
        ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
            Ok(units.concat().into_bytes())
        }
    }

    struct RejectingGateway;

    impl CompileGateway for RejectingGateway {
        fn compile(
            &self,
            _units: &[String],
            _references: &[Reference],
            _kind: ArtifactKind,
        ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
            Err(vec![Box::new(GatewayDiagnostic::error("type mismatch"))])
        }
    }

    #[test]
    fn script_build_writes_merged_artifact() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        fs::write(
            input.path().join("player.src"),
            "using Engine.Core;\nclass Player {}\n",
        )
        .unwrap();
        fs::create_dir(input.path().join("ai")).unwrap();
        fs::write(input.path().join("ai").join("brain.src"), "class Brain {}\n").unwrap();

        let request = BuildRequest {
            kind: AssetKind::Scripts,
            input_dir: input.path().to_path_buf(),
            output_path: out_dir.path().join("scripts.lib"),
            recurse: true,
            emit_source: true,
        };
        let mut collector = DiagnosticCollector::new();
        let ok = run_build(
            &request,
            AssemblerConfig::default(),
            &EchoGateway,
            &mut collector,
        )
        .unwrap();

        assert!(ok);
        let artifact = fs::read_to_string(out_dir.path().join("scripts.lib")).unwrap();
        assert!(artifact.contains("namespace Game {"));
        assert!(artifact.contains("namespace Game.ai {"));
        assert!(artifact.contains("class Player {}"));
        assert!(out_dir.path().join("scripts.unit.src").exists());
        assert!(!collector.has_errors());
    }

    #[test]
    fn scene_build_embeds_payloads() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        fs::write(
            input.path().join("hub.scene.json"),
            r#"{"name":"hub","entities":[{"id":1}]}"#,
        )
        .unwrap();

        let request = BuildRequest {
            kind: AssetKind::Scenes,
            input_dir: input.path().to_path_buf(),
            output_path: out_dir.path().join("scenes.lib"),
            recurse: false,
            emit_source: false,
        };
        let mut collector = DiagnosticCollector::new();
        let ok = run_build(
            &request,
            AssemblerConfig::default(),
            &EchoGateway,
            &mut collector,
        )
        .unwrap();

        assert!(ok);
        let artifact = fs::read_to_string(out_dir.path().join("scenes.lib")).unwrap();
        assert!(artifact.contains("public static class Embedded_hub {"));
    }

    #[test]
    fn gateway_rejection_lands_in_collector() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        fs::write(input.path().join("broken.src"), "class ???\n").unwrap();

        let request = BuildRequest {
            kind: AssetKind::Scripts,
            input_dir: input.path().to_path_buf(),
            output_path: out_dir.path().join("scripts.lib"),
            recurse: false,
            emit_source: false,
        };
        let mut collector = DiagnosticCollector::new();
        let ok = run_build(
            &request,
            AssemblerConfig::default(),
            &RejectingGateway,
            &mut collector,
        )
        .unwrap();

        assert!(!ok);
        assert!(collector.has_errors());
        assert!(!out_dir.path().join("scripts.lib").exists());
    }
}
