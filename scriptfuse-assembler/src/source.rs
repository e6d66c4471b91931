use std::{
    fmt::{Debug, Display},
    path::Path,
    sync::Arc,
};

/// A fragment of caller-submitted source text, with its file path when it
/// came from disk.
///
/// Content is stored as shared characters so that clones are cheap and
/// diagnostics can address the text by character offset regardless of the
/// byte width of what the fragment contains.
#[derive(Clone)]
pub struct Source {
    content: Arc<Vec<char>>,
    file_path: Option<Arc<Path>>,
}

impl Source {
    pub fn from_string(text: String) -> Self {
        Self {
            content: Arc::new(text.chars().collect()),
            file_path: None,
        }
    }

    pub fn from_string_with_file_path<P: AsRef<Path>>(text: String, path: P) -> Self {
        Self {
            content: Arc::new(text.chars().collect()),
            file_path: Some(Arc::from(path.as_ref())),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref)?;
        Ok(Self {
            content: Arc::new(text.chars().collect()),
            file_path: Some(Arc::from(path_ref)),
        })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn content(&self) -> &[char] {
        &self.content
    }

    /// Number of characters in the fragment.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn content_str(&self) -> String {
        self.content.iter().collect()
    }
}

impl Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path_str = self
            .file_path
            .as_ref()
            .map(|p| p.to_string_lossy())
            .unwrap_or_else(|| "<in-memory>".into());
        let snippet: String = self.content.iter().take(40).collect();
        write!(f, "Source(file: \"{}\", content: \"{}...\")", path_str, snippet)
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file_path {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "<anonymous>"),
        }
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::from_string(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::from_string(text.to_string())
    }
}
