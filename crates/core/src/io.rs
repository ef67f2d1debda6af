//! Shared filesystem utilities.

use std::{
    fs::{copy, create_dir_all, remove_file, rename},
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::glob;
use log::debug;

/// Find files matching a glob pattern directly inside a directory, sorted by path.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<PathBuf> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Create a directory and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Move a file, falling back to copy + remove when a plain rename is not
/// possible (e.g. across filesystems).
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!("rename {} -> {} failed ({err}), copying instead", from.display(), to.display());
            copy(from, to)?;
            remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, read, write};
    use tempfile::tempdir;

    #[test]
    fn test_glob_fonts_is_flat_and_sorted() {
        let dir = tempdir().unwrap();
        write(dir.path().join("b.ttf"), b"b").unwrap();
        write(dir.path().join("a.ttf"), b"a").unwrap();
        write(dir.path().join("c.otf"), b"c").unwrap();
        create_dir(dir.path().join("nested.ttf")).unwrap();

        let found = glob_fonts(dir.path(), "*.ttf").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.ttf", "b.ttf"]);
    }

    #[test]
    fn test_move_file() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("Font.ttf");
        let to = dir.path().join("moved.ttf");
        write(&from, b"data").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(read(&to).unwrap(), b"data");
    }

    #[test]
    fn test_move_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(move_file(&dir.path().join("nope.ttf"), &dir.path().join("x.ttf")).is_err());
    }
}
