use crate::gateway::Reference;

/// Immutable configuration for one build invocation.
///
/// Passed to [`crate::assembler::Assembler::new`] at construction; there are
/// no process-wide default tables. The [`Default`] value describes the stock
/// game build: `using`-style directives terminated by `;`, fragments merged
/// under the `Game` root namespace, and the engine runtime imported into
/// every unit.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Keyword opening a header directive line.
    pub directive_keyword: String,
    /// Statement terminator closing a directive.
    pub directive_terminator: String,
    /// Namespace every compilation unit is rooted in.
    pub root_namespace: String,
    /// Directives seeded into the registry before any fragment is scanned,
    /// as full normalized lines.
    pub default_directives: Vec<String>,
    /// Libraries handed to the compile gateway alongside the unit.
    pub references: Vec<Reference>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            directive_keyword: "using".to_string(),
            directive_terminator: ";".to_string(),
            root_namespace: "Game".to_string(),
            default_directives: vec![
                "using System;".to_string(),
                "using Engine.Core;".to_string(),
            ],
            references: Vec::new(),
        }
    }
}

impl AssemblerConfig {
    /// Stock configuration with a different root namespace.
    pub fn with_root_namespace(root: impl Into<String>) -> Self {
        Self {
            root_namespace: root.into(),
            ..Self::default()
        }
    }
}
