//! Collision-free file names inside a directory.
//!
//! Both functions probe `name`, `name-1`, `name-2`, ... against the current
//! directory contents. The check and the later write are separate steps, so
//! callers must not reserve in the same directory from two threads at once.

use std::path::{Path, PathBuf};

use crate::config::{FALLBACK_STEM, OUTPUT_EXTENSION};

const STRIPPED_EXTENSIONS: [&str; 2] = [".ttf", ".woff2"];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn strip_extension(name: &str) -> &str {
    for ext in STRIPPED_EXTENSIONS {
        if let Some(cut) = name.len().checked_sub(ext.len())
            && name.is_char_boundary(cut)
            && name[cut..].eq_ignore_ascii_case(ext)
        {
            return &name[..cut];
        }
    }
    name
}

/// Make a stem safe for any filesystem.
///
/// Runs of characters outside `[A-Za-z0-9._-]` become a single `-`, and
/// separators are trimmed from both ends. An empty result becomes `font`.
pub fn sanitize_stem(name: &str) -> String {
    let name = strip_extension(name.trim());

    let mut cleaned = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if is_allowed(c) {
            cleaned.push(c);
            in_run = false;
        } else if !in_run {
            cleaned.push('-');
            in_run = true;
        }
    }

    let trimmed = cleaned.trim_matches(|c| matches!(c, '-' | '.' | '_'));
    if trimmed.is_empty() { FALLBACK_STEM.to_string() } else { trimmed.to_string() }
}

/// First free `stem[-N].ext` path in `dir`.
fn first_free(dir: &Path, stem: &str, extension: Option<&str>) -> PathBuf {
    let file_name = |counter: usize| {
        let base = if counter == 0 { stem.to_string() } else { format!("{stem}-{counter}") };
        match extension {
            Some(ext) => format!("{base}.{ext}"),
            None => base,
        }
    };

    (0..)
        .map(|counter| dir.join(file_name(counter)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dir.join(file_name(0)))
}

/// Reserve a `.woff2` output path for a desired stem.
pub fn reserve_output_path(dir: &Path, desired_stem: &str) -> PathBuf {
    first_free(dir, &sanitize_stem(desired_stem), Some(OUTPUT_EXTENSION))
}

/// Reserve a path in `target_dir` for moving `source` there, keeping its
/// file name unless that is taken.
pub fn reserve_destination_path(source: &Path, target_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    let extension = source.extension().map(|e| e.to_string_lossy().into_owned());
    first_free(target_dir, &stem, extension.as_deref())
}
