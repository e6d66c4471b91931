//! Input enumeration for one asset directory.
//!
//! Traversal order is deterministic (lexicographic per directory, files
//! before subdirectories) so that fragment submission order, and with it the
//! assembled unit, is reproducible across runs.

use std::io;
use std::path::{Path, PathBuf};

/// Collect every file under `dir` whose name ends with `suffix`.
///
/// Recurses into subdirectories only when `recurse` is set, matching the
/// CLI flag. Symlinks are followed by `read_dir`; cycles are the caller's
/// problem, same as for any build input tree.
pub fn collect_files(dir: &Path, suffix: &str, recurse: bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_into(dir, suffix, recurse, &mut files)?;
    Ok(files)
}

fn collect_into(
    dir: &Path,
    suffix: &str,
    recurse: bool,
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to read input directory '{}': {}", dir.display(), e),
            )
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let mut subdirs = Vec::new();
    for path in entries {
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            files.push(path);
        }
    }

    if recurse {
        for subdir in subdirs {
            collect_into(&subdir, suffix, recurse, files)?;
        }
    }

    Ok(())
}

/// Namespace hint for a file found under `base`.
///
/// Each directory component between `base` and the file becomes one dotted
/// segment under the root namespace: `ai/pathing/walker.src` maps to
/// `Game.ai.pathing`. Files directly in `base` carry no hint and land in the
/// root namespace.
pub fn namespace_hint(root_namespace: &str, base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parent = relative.parent()?;
    let mut namespace = root_namespace.to_string();
    let mut nested = false;
    for component in parent.components() {
        let segment = component.as_os_str().to_string_lossy();
        if segment.is_empty() {
            continue;
        }
        namespace.push('.');
        namespace.push_str(&segment);
        nested = true;
    }
    nested.then_some(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn collects_matching_files_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.src"));
        touch(&dir.path().join("a.src"));
        touch(&dir.path().join("notes.txt"));

        let files = collect_files(dir.path(), ".src", false).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.src", "b.src"]);
    }

    #[test]
    fn recursion_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("ai")).unwrap();
        touch(&dir.path().join("main.src"));
        touch(&dir.path().join("ai").join("brain.src"));

        let flat = collect_files(dir.path(), ".src", false).unwrap();
        assert_eq!(flat.len(), 1);

        let deep = collect_files(dir.path(), ".src", true).unwrap();
        assert_eq!(deep.len(), 2);
        // Top-level files come before recursed ones.
        assert!(deep[0].ends_with("main.src"));
    }

    #[test]
    fn namespace_hints_follow_directory_structure() {
        let base = Path::new("/in");
        assert_eq!(
            namespace_hint("Game", base, Path::new("/in/ai/pathing/walker.src")),
            Some("Game.ai.pathing".to_string())
        );
        assert_eq!(namespace_hint("Game", base, Path::new("/in/main.src")), None);
        assert_eq!(namespace_hint("Game", Path::new("/elsewhere"), Path::new("/in/x.src")), None);
    }
}
