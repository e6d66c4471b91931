use indexmap::IndexMap;

/// One namespace's accumulated fragment bodies, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceUnit {
    pub name: String,
    pub bodies: Vec<String>,
}

/// Maps namespace names to their fragment bodies.
///
/// Fragments for the root namespace are stored as-is; fragments for any
/// other namespace are wrapped in an explicit nested `namespace` block at
/// submission time, so several fragments targeting the same sub-namespace
/// accumulate correctly under one root. Namespace names are arbitrary dotted
/// strings; legality is the compiler's problem, not ours.
///
/// Enumeration order is first-encountered, bodies keep submission order.
/// Units are created lazily and never removed.
#[derive(Debug, Clone)]
pub struct NamespaceStore {
    root_namespace: String,
    units: IndexMap<String, Vec<String>>,
}

impl NamespaceStore {
    pub fn new(root_namespace: impl Into<String>) -> Self {
        let root_namespace = root_namespace.into();
        let mut units = IndexMap::new();
        // The root unit always enumerates first.
        units.insert(root_namespace.clone(), Vec::new());
        Self {
            root_namespace,
            units,
        }
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    /// Append a fragment body under `namespace`; `None` targets the root.
    pub fn add_script(&mut self, namespace: Option<&str>, body: &str) {
        match namespace {
            None => self.push_root(body.to_string()),
            Some(name) if name == self.root_namespace => self.push_root(body.to_string()),
            Some(name) => {
                let wrapped = format!("namespace {} {{\n{}\n}}", name, body.trim_end());
                self.units
                    .entry(name.to_string())
                    .or_default()
                    .push(wrapped);
            }
        }
    }

    fn push_root(&mut self, body: String) {
        self.units
            .entry(self.root_namespace.clone())
            .or_default()
            .push(body);
    }

    /// Snapshot of every unit in first-encountered order.
    pub fn units(&self) -> Vec<NamespaceUnit> {
        self.units
            .iter()
            .map(|(name, bodies)| NamespaceUnit {
                name: name.clone(),
                bodies: bodies.clone(),
            })
            .collect()
    }

    /// Total number of stored bodies across all namespaces.
    pub fn body_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }
}
