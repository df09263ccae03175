//! Writing rendered output to disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::GraphSerializer;
use crate::error::{LawGraphError, Result};
use crate::graph::LawGraph;

/// Write `content` to `path` through a temp file in the same directory.
///
/// The temp file is synced before it is renamed over the target, so an
/// existing file is never left half-written.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| LawGraphError::InvalidOutputDir(path.display().to_string()))?;
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Render the graph with each serializer and save `<stem>.<ext>` files
/// into `output_dir`, which must already exist.
///
/// # Returns
/// Paths of the written files, in serializer order.
pub fn save_outputs(
    graph: &LawGraph,
    serializers: &[Box<dyn GraphSerializer>],
    output_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    if !output_dir.is_dir() {
        return Err(LawGraphError::InvalidOutputDir(
            output_dir.display().to_string(),
        ));
    }

    let mut written = Vec::with_capacity(serializers.len());
    for serializer in serializers {
        let path = output_dir.join(format!("{stem}.{}", serializer.file_extension()));
        write_atomic(&path, &serializer.render(graph))?;
        tracing::debug!(path = %path.display(), "wrote output");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompileOptions, Namespaces};
    use crate::graph::compile;
    use crate::render::OutputFormat;
    use crate::row::RawRow;
    use tempfile::tempdir;

    fn graph() -> LawGraph {
        let rows = vec![RawRow {
            lag: Some("Testlag (2000:1)".to_string()),
            paragraf: Some("1".to_string()),
            stycke: Some("1".to_string()),
            text: Some("Text".to_string()),
            ..RawRow::default()
        }];
        compile(&rows, &CompileOptions::new()).unwrap()
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.cypher");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join(".out.cypher.tmp").exists());
    }

    #[test]
    fn test_save_outputs_both_forms() {
        let dir = tempdir().unwrap();
        let serializers = OutputFormat::Both.serializers(&Namespaces::default());

        let written = save_outputs(&graph(), &serializers, dir.path(), "sfb").unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("sfb.cypher"), dir.path().join("sfb.ttl")]
        );
        let cypher = fs::read_to_string(&written[0]).unwrap();
        assert!(cypher.starts_with("// Generated from flat JSON"));
        let turtle = fs::read_to_string(&written[1]).unwrap();
        assert!(turtle.starts_with("@prefix def:"));
    }

    #[test]
    fn test_save_outputs_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let serializers = OutputFormat::Cypher.serializers(&Namespaces::default());

        let result = save_outputs(&graph(), &serializers, &missing, "sfb");

        assert!(matches!(result, Err(LawGraphError::InvalidOutputDir(_))));
    }
}
