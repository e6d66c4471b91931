use indexmap::IndexSet;

/// Deduplicating registry of header directives, in first-seen order.
///
/// Growth is monotonic within a build: merging can only append, never drop a
/// previously registered directive. Equality is exact string match over the
/// normalized lines the extractor produces, so two spellings that differ
/// only in line endings collapse to one entry while casing differences do
/// not.
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    directives: IndexSet<String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every directive not already present, preserving insertion
    /// order.
    pub fn merge<I>(&mut self, new_directives: I)
    where
        I: IntoIterator<Item = String>,
    {
        for directive in new_directives {
            self.directives.insert(directive);
        }
    }

    pub fn directives(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
