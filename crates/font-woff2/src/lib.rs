//! TrueType validation and WOFF2 compression.
//!
//! Fonts are checked with `read-fonts` before they reach the subsetter, so a
//! broken input fails with a readable reason instead of an opaque HarfBuzz
//! error. Compression uses `ttf2woff2` at its default Brotli quality.
//!
//! # Example
//!
//! ```no_run
//! use fontshelf_font_woff2::{compress, inspect};
//!
//! let ttf_data: &[u8] = &[];
//! let summary = inspect(ttf_data).unwrap();
//! let woff2 = compress(ttf_data).unwrap();
//! ```

use anyhow::{Context, Result, anyhow, bail};
use read_fonts::{FontRef, TableProvider};
use ttf2woff2::{BrotliQuality, encode};

/// Basic facts about a parsed TrueType font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSummary {
    pub num_glyphs: u16,
    /// Codepoints mapped to a real glyph by the first usable cmap subtable.
    pub mapped_codepoints: Vec<u32>,
}

impl FontSummary {
    /// Number of mapped codepoints that fall inside the given inclusive ranges.
    pub fn coverage(&self, ranges: &[(u32, u32)]) -> usize {
        self.mapped_codepoints
            .iter()
            .filter(|cp| ranges.iter().any(|(start, end)| (*start..=*end).contains(*cp)))
            .count()
    }
}

/// Parses font data and collects the facts needed before subsetting.
///
/// Fails when the data is not a font or has no character map, since
/// codepoint-based subsetting would produce an empty font.
pub fn inspect(data: &[u8]) -> Result<FontSummary> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let num_glyphs = font.maxp().context("Failed to read maxp table")?.num_glyphs();
    let cmap = font.cmap().context("Failed to read cmap table")?;

    let mut mapped_codepoints = Vec::new();
    for record in cmap.encoding_records() {
        if let Ok(subtable) = record.subtable(cmap.offset_data()) {
            mapped_codepoints.extend(
                subtable
                    .iter()
                    .filter(|(_, gid)| gid.to_u32() != 0)
                    .map(|(cp, _)| cp),
            );
            if !mapped_codepoints.is_empty() {
                break;
            }
        }
    }

    if mapped_codepoints.is_empty() {
        bail!("No valid codepoints found in font");
    }
    mapped_codepoints.sort_unstable();
    mapped_codepoints.dedup();

    Ok(FontSummary { num_glyphs, mapped_codepoints })
}

/// Compresses TrueType data into a WOFF2 container.
pub fn compress(ttf_data: &[u8]) -> Result<Vec<u8>> {
    encode(ttf_data, BrotliQuality::default())
        .map_err(|e| anyhow!("WOFF2 encoding failed: {e:?}"))
}
