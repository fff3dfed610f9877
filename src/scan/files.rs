// src/scan/files.rs
// =============================================================================
// Finds the markdown files to check.
//
// - A directory is walked recursively and every *.md file is kept
// - A single file is checked as-is, whatever its extension
// - Symlinked files and folders are followed; a link that loops back to
//   one of its own parents is skipped with a warning
//
// Entries are sorted by name so two runs over the same tree list the files
// (and therefore the broken links) in the same order.
// =============================================================================

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::warn!(path = ?e.path(), "Skipping symlink loop");
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to walk directory {}", root.display()))
            }
        };

        // Skip directories and anything that isn't a plain file
        if !entry.file_type().is_file() {
            continue;
        }

        if is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
