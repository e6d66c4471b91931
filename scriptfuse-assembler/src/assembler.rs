//! Engine facade: one [`Assembler`] per build invocation.
//!
//! Fragments go in one at a time; the assembler runs the header scan, merges
//! the directives into its registry and files the body under the right
//! namespace. Finalizing snapshots the current state into a
//! [`CompilationUnit`] without consuming it, so a build can be rendered for
//! inspection and compiled from the same state.

use crate::assemble::CompilationUnit;
use crate::config::AssemblerConfig;
use crate::diagnostics::collector::DiagnosticCollector;
use crate::diagnostics::Diagnostic;
use crate::embed::EmbeddedBlob;
use crate::extract::HeaderExtractor;
use crate::gateway::{ArtifactKind, CompileGateway};
use crate::registry::ImportRegistry;
use crate::source::Source;
use crate::store::NamespaceStore;

/// Merges script fragments and embedded payloads into one compilation unit.
///
/// Owns its registry and store outright; independent invocations share
/// nothing, so callers may run several assemblers (scripts, scenes, systems)
/// side by side. Every step is total over its input: no fragment can fail
/// the assembler itself, only the gateway can fail a build.
pub struct Assembler {
    config: AssemblerConfig,
    extractor: HeaderExtractor,
    registry: ImportRegistry,
    store: NamespaceStore,
}

impl Assembler {
    /// Engine seeded with the configuration's default directives.
    pub fn new(config: AssemblerConfig) -> Self {
        let extractor = HeaderExtractor::new(&config);
        let mut registry = ImportRegistry::new();
        registry.merge(config.default_directives.iter().cloned());
        let store = NamespaceStore::new(config.root_namespace.clone());
        Self {
            config,
            extractor,
            registry,
            store,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Submit one fragment, optionally targeted at a sub-namespace of the
    /// root.
    pub fn add_script(
        &mut self,
        collector: &mut DiagnosticCollector,
        namespace: Option<&str>,
        source: &Source,
    ) {
        let scan = self.extractor.extract(collector, source);
        let body = scan.body.slice(source);
        self.registry.merge(scan.directives);
        self.store.add_script(namespace, &body);
    }

    /// Splice an embedded payload container into the root namespace.
    pub fn add_blob(&mut self, blob: &EmbeddedBlob) {
        self.store.add_script(None, &blob.render());
    }

    /// Build the compilation unit from the current registry and store.
    pub fn finalize(&self) -> CompilationUnit {
        CompilationUnit {
            directives: self.registry.directives().map(str::to_string).collect(),
            root_namespace: self.store.root_namespace().to_string(),
            units: self.store.units(),
        }
    }

    /// Render the current state and hand it to the gateway.
    ///
    /// Gateway diagnostics are returned verbatim; there is no retry and no
    /// partial fallback.
    pub fn compile(
        &self,
        gateway: &dyn CompileGateway,
    ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
        let unit = self.finalize().render();
        gateway.compile(&[unit], &self.config.references, ArtifactKind::Library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ReportSeverity;
    use crate::embed::embed;
    use crate::gateway::{GatewayDiagnostic, Reference};

    struct RecordingGateway;

    impl CompileGateway for RecordingGateway {
        fn compile(
            &self,
            units: &[String],
            _references: &[Reference],
            kind: ArtifactKind,
        ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
            assert_eq!(kind, ArtifactKind::Library);
            Ok(units.concat().into_bytes())
        }
    }

    struct FailingGateway;

    impl CompileGateway for FailingGateway {
        fn compile(
            &self,
            _units: &[String],
            _references: &[Reference],
            _kind: ArtifactKind,
        ) -> Result<Vec<u8>, Vec<Box<dyn Diagnostic>>> {
            Err(vec![
                Box::new(GatewayDiagnostic::warning("shadowed declaration")),
                Box::new(GatewayDiagnostic::error("unresolved identifier")),
            ])
        }
    }

    fn bare_config() -> AssemblerConfig {
        AssemblerConfig {
            default_directives: Vec::new(),
            ..AssemblerConfig::default()
        }
    }

    #[test]
    fn finalize_is_idempotent_on_unchanged_state() {
        let mut assembler = Assembler::new(AssemblerConfig::default());
        let mut collector = DiagnosticCollector::new();
        assembler.add_script(
            &mut collector,
            Some("Game.AI"),
            &Source::from("using Engine.Nav;\nclass Brain {}\n"),
        );

        assert_eq!(assembler.finalize().render(), assembler.finalize().render());
    }

    #[test]
    fn directives_dedup_across_line_ending_styles() {
        let mut assembler = Assembler::new(bare_config());
        let mut collector = DiagnosticCollector::new();
        assembler.add_script(&mut collector, None, &Source::from("using X;\nclass A {}\n"));
        assembler.add_script(&mut collector, None, &Source::from("using X;\r\nclass B {}\r\n"));

        let unit = assembler.finalize();
        assert_eq!(unit.directives, vec!["using X;"]);
    }

    #[test]
    fn first_submission_order_is_preserved() {
        let mut assembler = Assembler::new(bare_config());
        let mut collector = DiagnosticCollector::new();
        assembler.add_script(
            &mut collector,
            Some("Game.UI"),
            &Source::from("using B;\nclass Menu {}\n"),
        );
        assembler.add_script(&mut collector, None, &Source::from("using A;\nclass Core {}\n"));

        let unit = assembler.finalize();
        assert_eq!(unit.directives, vec!["using B;", "using A;"]);
        let names: Vec<&str> = unit.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Game", "Game.UI"]);
    }

    #[test]
    fn sub_namespace_body_does_not_leak_into_root() {
        let mut assembler = Assembler::new(bare_config());
        let mut collector = DiagnosticCollector::new();
        assembler.add_script(
            &mut collector,
            Some("Game.AI"),
            &Source::from("class Brain {}\n"),
        );

        let text = assembler.finalize().render();
        let opener = text.find("namespace Game.AI {").expect("nested block present");
        let body = text.find("class Brain {}").expect("body present");
        assert!(opener < body);
        // Marker, body, nested close, root close.
        assert_eq!(text.matches('}').count(), 4);
    }

    #[test]
    fn default_directives_are_seeded() {
        let assembler = Assembler::new(AssemblerConfig::default());
        let unit = assembler.finalize();
        assert_eq!(unit.directives, vec!["using System;", "using Engine.Core;"]);
    }

    #[test]
    fn embedded_blob_lands_in_root_unit() {
        let mut assembler = Assembler::new(bare_config());
        assembler.add_blob(&embed("Hub", b"\x00\x01\x02"));

        let text = assembler.finalize().render();
        assert!(text.contains("public static class Embedded_Hub {"));
        let root_open = text.find("namespace Game {").expect("root present");
        assert!(text.find("Embedded_Hub").expect("blob present") > root_open);
    }

    #[test]
    fn compile_hands_rendered_unit_to_gateway() {
        let mut assembler = Assembler::new(bare_config());
        let mut collector = DiagnosticCollector::new();
        assembler.add_script(&mut collector, None, &Source::from("class A {}\n"));

        let artifact = assembler.compile(&RecordingGateway).expect("gateway accepts");
        assert_eq!(artifact, assembler.finalize().render().into_bytes());
    }

    #[test]
    fn gateway_failure_is_forwarded_verbatim() {
        let assembler = Assembler::new(bare_config());
        let diagnostics = assembler.compile(&FailingGateway).unwrap_err();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .any(|d| d.severity() == ReportSeverity::Error));
    }
}
