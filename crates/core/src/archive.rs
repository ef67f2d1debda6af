//! Archive maintenance.

use std::fs::{read_dir, remove_file};

use anyhow::{Context, Result};
use log::debug;

use crate::layout::DirectoryLayout;

/// Delete every plain file directly inside the archive directory.
///
/// Subdirectories and their contents are left alone. Returns how many files
/// were removed; a missing archive directory counts as empty.
pub fn clear_archive(layout: &DirectoryLayout) -> Result<usize> {
    let dir = &layout.archive_dir;
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
            debug!("removed {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, write};
    use tempfile::tempdir;

    #[test]
    fn test_clear_archive_removes_files_only() {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::create(dir.path()).unwrap();
        write(layout.archive_dir.join("A-Bold.ttf"), b"").unwrap();
        write(layout.archive_dir.join("A-Bold-1.ttf"), b"").unwrap();
        let nested = layout.archive_dir.join("keep");
        create_dir(&nested).unwrap();
        write(nested.join("B-Bold.ttf"), b"").unwrap();

        assert_eq!(clear_archive(&layout).unwrap(), 2);
        assert!(nested.join("B-Bold.ttf").exists());
    }

    #[test]
    fn test_clear_archive_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::create(dir.path()).unwrap();
        write(layout.archive_dir.join("A-Bold.ttf"), b"").unwrap();

        assert_eq!(clear_archive(&layout).unwrap(), 1);
        assert_eq!(clear_archive(&layout).unwrap(), 0);
    }

    #[test]
    fn test_clear_missing_archive() {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::new(dir.path());
        assert_eq!(clear_archive(&layout).unwrap(), 0);
    }
}
