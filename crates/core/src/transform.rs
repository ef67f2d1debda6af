//! The subset + compress step applied to each source font.

use std::{
    ffi::OsString,
    fs::{read, write},
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, bail};
use fontshelf_font_subsetter::Subsetter;
use fontshelf_font_woff2::{compress, inspect};
use log::{debug, info};

use crate::config::{EXTERNAL_FLAVOR, EXTERNAL_UNICODES};

/// Converts one source font into one output file.
///
/// Implementations must either write `target` completely and return `Ok`, or
/// return an error; the error's context chain becomes the reported reason.
pub trait FontTransform: Sync {
    fn transform(&self, source: &Path, target: &Path) -> Result<()>;
}

impl<T: FontTransform + ?Sized> FontTransform for &T {
    fn transform(&self, source: &Path, target: &Path) -> Result<()> {
        (**self).transform(source, target)
    }
}

impl<T: FontTransform + ?Sized> FontTransform for Box<T> {
    fn transform(&self, source: &Path, target: &Path) -> Result<()> {
        (**self).transform(source, target)
    }
}

/// In-process conversion: validate, subset with HarfBuzz, compress to WOFF2.
#[derive(Debug, Clone)]
pub struct Woff2Transform {
    subsetter: Subsetter,
}

impl Woff2Transform {
    pub fn new(subsetter: Subsetter) -> Self {
        Self { subsetter }
    }
}

impl Default for Woff2Transform {
    fn default() -> Self {
        Self::new(Subsetter::latin())
    }
}

impl FontTransform for Woff2Transform {
    fn transform(&self, source: &Path, target: &Path) -> Result<()> {
        let data = read(source)
            .with_context(|| format!("Failed to read font: {}", source.display()))?;
        let summary = inspect(&data)?;
        let kept = summary.coverage(self.subsetter.unicode_ranges());
        if kept == 0 {
            bail!("Font maps no codepoints in the subset range");
        }
        debug!(
            "{}: {} glyphs, keeping {kept} of {} mapped codepoints",
            source.display(),
            summary.num_glyphs,
            summary.mapped_codepoints.len()
        );

        let subset = self.subsetter.subset(&data).context("Subsetting failed")?;
        let woff2 = compress(&subset)?;
        write(target, &woff2)
            .with_context(|| format!("Failed to write font: {}", target.display()))?;

        let input_size = data.len() as f64 / 1024.0;
        let output_size = woff2.len() as f64 / 1024.0;
        info!(
            "Subset {} -> {} ({input_size:.1} KB -> {output_size:.1} KB, {:.1}% reduction)",
            source.file_name().unwrap_or_default().to_string_lossy(),
            target.file_name().unwrap_or_default().to_string_lossy(),
            (1.0 - output_size / input_size) * 100.0
        );
        Ok(())
    }
}

/// Delegates to a `pyftsubset`-compatible program.
///
/// The program is run as
/// `PROGRAM SOURCE --flavor=woff2 --output-file=TARGET --unicodes=U+000-5FF`;
/// exit status 0 is success, anything else fails with the status and stderr.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self, source: &Path, target: &Path) -> Vec<OsString> {
        let mut output_file = OsString::from("--output-file=");
        output_file.push(target.as_os_str());
        vec![
            source.as_os_str().to_owned(),
            format!("--flavor={EXTERNAL_FLAVOR}").into(),
            output_file,
            format!("--unicodes={EXTERNAL_UNICODES}").into(),
        ]
    }
}

impl FontTransform for ExternalTool {
    fn transform(&self, source: &Path, target: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .args(self.args(source, target))
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = output
                .status
                .code()
                .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string());
            let detail = stderr.trim();
            if detail.is_empty() {
                bail!("{} exited with status {status}", self.program.display());
            }
            bail!("{} exited with status {status}: {detail}", self.program.display());
        }

        if !target.exists() {
            bail!("{} reported success but wrote no output", self.program.display());
        }
        Ok(())
    }
}
