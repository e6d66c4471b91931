//! Binary payload embedding.
//!
//! Serialized object graphs (scene snapshots and the like) are spliced into
//! the compilation unit as base64 string constants inside a generated static
//! container, together with an accessor that decodes the constant through
//! the runtime deserializer when the artifact is loaded. Nothing is decoded
//! at build time.

use base64::{engine::general_purpose::STANDARD, Engine};

/// A named binary payload destined for the compilation unit.
///
/// Created once per owner, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedBlob {
    owner: String,
    base64_payload: String,
}

/// Encode `payload` for `owner` with the standard base64 alphabet, no line
/// wrapping. An empty payload still produces a blob so the generated
/// container stays structurally uniform across owners.
pub fn embed(owner: &str, payload: &[u8]) -> EmbeddedBlob {
    EmbeddedBlob {
        owner: owner.to_string(),
        base64_payload: STANDARD.encode(payload),
    }
}

impl EmbeddedBlob {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn base64_payload(&self) -> &str {
        &self.base64_payload
    }

    /// Render the generated static container: the base64 constant and the
    /// decode-on-load accessor.
    pub fn render(&self) -> String {
        let container = container_name(&self.owner);
        format!(
            "public static class {container} {{\n\
             public const string Payload = \"{payload}\";\n\
             public static readonly object Graph = Runtime.Serializer.Decode(Payload);\n\
             }}",
            payload = self.base64_payload,
        )
    }
}

/// Container type name derived from an owner name: every character that is
/// not alphanumeric becomes `_`, and a leading digit gets an extra prefix.
fn container_name(owner: &str) -> String {
    let sanitized: String = owner
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("Embedded__{sanitized}")
    } else {
        format!("Embedded_{sanitized}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let blob = embed("Level1", &payload);
        let decoded = STANDARD.decode(blob.base64_payload()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn empty_payload_still_emits_a_constant() {
        let blob = embed("Empty", b"");
        assert_eq!(blob.base64_payload(), "");
        assert!(blob.render().contains("public const string Payload = \"\";"));
    }

    #[test]
    fn no_line_wrapping() {
        let blob = embed("Big", &vec![0xAB; 4096]);
        assert!(!blob.base64_payload().contains('\n'));
    }

    #[test]
    fn container_names_are_sanitized() {
        assert_eq!(container_name("boss fight.scene"), "Embedded_boss_fight_scene");
        assert_eq!(container_name("3rd-level"), "Embedded__3rd_level");
    }

    #[test]
    fn render_declares_constant_and_accessor() {
        let text = embed("Hub", b"\x01\x02").render();
        assert!(text.starts_with("public static class Embedded_Hub {"));
        assert!(text.contains("public const string Payload"));
        assert!(text.contains("Runtime.Serializer.Decode(Payload)"));
    }
}
