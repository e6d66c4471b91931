//! Final compilation unit: the structured value handed to the compile
//! gateway, and its one stringification point.

use crate::store::NamespaceUnit;

/// Zero-member declaration emitted into every unit so the produced artifact
/// stays loadable and inspectable even when every fragment is empty.
const UNIT_MARKER: &str = "internal static class UnitMarker { }";

/// A fully assembled compilation unit, built fresh from the registry and
/// store on every finalize call and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub directives: Vec<String>,
    pub root_namespace: String,
    pub units: Vec<NamespaceUnit>,
}

impl CompilationUnit {
    /// Render the unit as source text.
    ///
    /// Pure concatenation: directive block, blank line, root namespace
    /// opener, the unit marker, every namespace body in order, closing
    /// brace. No semantic validation happens here, and rendering the same
    /// value twice yields byte-identical text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for directive in &self.directives {
            out.push_str(directive);
            out.push('\n');
        }
        out.push('\n');

        out.push_str(&format!("namespace {} {{\n", self.root_namespace));
        out.push_str(UNIT_MARKER);
        out.push('\n');

        for unit in &self.units {
            for body in &unit.bodies {
                let body = body.trim_end();
                if body.is_empty() {
                    continue;
                }
                out.push_str(body);
                out.push('\n');
            }
        }

        out.push_str("}\n");
        out
    }
}
