//! Run-wide settings resolved once at startup.

use std::{
    env::current_exe,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fontshelf_core::{DirectoryLayout, ExternalTool, FontTransform, Woff2Transform};
use log::debug;

/// Library root, transform and pool size shared by every command.
pub struct App {
    pub layout: DirectoryLayout,
    pub transform: Box<dyn FontTransform>,
    pub jobs: Option<usize>,
}

impl App {
    pub fn new(layout: DirectoryLayout, transform: Box<dyn FontTransform>) -> Self {
        Self { layout, transform, jobs: None }
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Resolve the root, pick the transform and create the directories.
    pub fn from_args(
        root: Option<PathBuf>,
        external_subsetter: Option<PathBuf>,
        jobs: Option<usize>,
    ) -> Result<Self> {
        let root = resolve_root(root)?;
        debug!("library root: {}", root.display());
        let layout = DirectoryLayout::create(root)?;

        let transform: Box<dyn FontTransform> = match external_subsetter {
            Some(program) => Box::new(ExternalTool::new(program)),
            None => Box::new(Woff2Transform::default()),
        };
        Ok(Self::new(layout, transform).with_jobs(jobs))
    }
}

/// An explicit root wins; otherwise the directory holding the executable,
/// so a copied binary manages the folders next to it.
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root);
    }
    let exe = current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable has no parent directory: {}", exe.display()))
}
