//! Scene snapshot loading and canonical serialization.
//!
//! A scene file is a JSON object graph. Before embedding we re-serialize the
//! parsed graph to canonical bytes, so that the embedded payload round-trips
//! exactly through the runtime deserializer regardless of how the file on
//! disk was formatted.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// In-memory scene object graph as authored by the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneGraph {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entities: Vec<Value>,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SceneGraph {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to read scene '{}': {}", path.display(), e),
            )
        })?;
        serde_json::from_str(&text).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("scene '{}' is not valid JSON: {}", path.display(), e),
            )
        })
    }

    /// Serialized bytes of the graph, independent of source formatting.
    pub fn canonical_bytes(&self) -> io::Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to serialize scene '{}': {}", self.name, e),
            )
        })
    }
}

/// Blob owner name for a scene file: the file name with the scene suffix
/// stripped.
pub fn owner_name(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name
        .strip_suffix(suffix)
        .map(str::to_string)
        .unwrap_or(file_name)
}
