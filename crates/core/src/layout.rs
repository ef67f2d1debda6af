//! Directory layout of a font library root.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    config::{ARCHIVE_DIR_NAME, INPUT_DIR_NAME, INPUT_EXTENSION, LIBRARY_DIR_NAME},
    io::{ensure_dir, glob_fonts},
};

/// The three working directories below a library root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub root: PathBuf,
    pub library_dir: PathBuf,
    pub input_dir: PathBuf,
    pub archive_dir: PathBuf,
}

impl DirectoryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            library_dir: root.join(LIBRARY_DIR_NAME),
            input_dir: root.join(INPUT_DIR_NAME),
            archive_dir: root.join(ARCHIVE_DIR_NAME),
            root,
        }
    }

    /// Create the layout and make sure every directory exists.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = Self::new(root);
        layout.ensure()?;
        Ok(layout)
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.library_dir, &self.input_dir, &self.archive_dir] {
            ensure_dir(dir)?;
        }
        Ok(())
    }

    /// Output subfolder for a family; see [`family_folder`].
    pub fn family_dir(&self, family: &str) -> PathBuf {
        match family_folder(family) {
            Some(folder) => self.library_dir.join(folder),
            None => self.library_dir.clone(),
        }
    }

    /// Source path of an input file name.
    pub fn input_path(&self, source_name: &str) -> PathBuf {
        self.input_dir.join(source_name)
    }

    /// TrueType files directly under the input directory, sorted by name.
    pub fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        glob_fonts(&self.input_dir, &format!("*.{INPUT_EXTENSION}"))
    }

    /// File names of [`Self::list_inputs`], skipping names that are not UTF-8.
    pub fn input_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_inputs()?
            .iter()
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
            .collect())
    }
}

/// Subfolder name for a family, or `None` when the family cannot name a
/// folder of its own (empty, `.` or `..`) and writes into the library
/// directory itself. Path separators become `-`.
pub fn family_folder(family: &str) -> Option<String> {
    match family {
        "" | "." | ".." => None,
        name => Some(name.replace(['/', '\\'], "-")),
    }
}

/// Families with equal keys resolve to the same output folder on some
/// filesystem: case and trailing dots or spaces are ignored.
pub fn folder_key(family: &str) -> String {
    family_folder(family)
        .map(|folder| folder.trim_end_matches(['.', ' ']).to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;
    use tempfile::tempdir;

    #[test]
    fn test_layout_paths() {
        let layout = DirectoryLayout::new("/lib");
        assert_eq!(layout.library_dir, PathBuf::from("/lib/font_lib"));
        assert_eq!(layout.input_dir, PathBuf::from("/lib/fonts_ttf"));
        assert_eq!(layout.archive_dir, PathBuf::from("/lib/fonts_used"));
        assert_eq!(layout.family_dir("Roboto"), PathBuf::from("/lib/font_lib/Roboto"));
    }

    #[test]
    fn test_family_dir_stays_inside_library() {
        let layout = DirectoryLayout::new("/lib");
        for family in ["", ".", ".."] {
            assert_eq!(layout.family_dir(family), PathBuf::from("/lib/font_lib"), "{family:?}");
        }
        assert_eq!(layout.family_dir("a/b"), PathBuf::from("/lib/font_lib/a-b"));
        assert_eq!(layout.family_dir("..."), PathBuf::from("/lib/font_lib/..."));
    }

    #[test]
    fn test_folder_key_merges_aliasing_names() {
        assert_eq!(folder_key("Roboto"), folder_key("roboto"));
        assert_eq!(folder_key("Roboto"), folder_key("ROBOTO. "));
        assert_eq!(folder_key(""), folder_key("."));
        assert_eq!(folder_key(".."), "");
        assert_ne!(folder_key("Roboto"), folder_key("Inter"));
    }

    #[test]
    fn test_create_is_repeatable() {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::create(dir.path()).unwrap();
        assert!(layout.library_dir.is_dir());
        assert!(layout.input_dir.is_dir());
        assert!(layout.archive_dir.is_dir());
        layout.ensure().unwrap();
    }

    #[test]
    fn test_input_names_only_ttf() {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::create(dir.path()).unwrap();
        write(layout.input_dir.join("Roboto-Bold.ttf"), b"").unwrap();
        write(layout.input_dir.join("Inter-Regular.ttf"), b"").unwrap();
        write(layout.input_dir.join("readme.txt"), b"").unwrap();

        assert_eq!(layout.input_names().unwrap(), ["Inter-Regular.ttf", "Roboto-Bold.ttf"]);
    }
}
