//! Font subsetting wrapper around hb-subset.
//!
//! This crate provides a high-level interface for subsetting fonts using HarfBuzz's
//! hb-subset library. It operates purely on byte slices with no file I/O dependencies.
//!
//! # Example
//!
//! ```no_run
//! use fontshelf_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::latin().subset(font_data);
//! ```

use anyhow::Result;
use hb_subset::{Blob, FontFace, SubsetInput, Tag};

/// Latin Unicode coverage kept in library fonts.
///
/// One block from U+0000 to U+05FF: Basic Latin, Latin-1 Supplement,
/// Latin Extended-A/B, IPA, spacing modifiers and combining diacritics
/// (plus Greek, Cyrillic and Armenian, which fall inside the same block range).
pub const LATIN_RANGES: &[(u32, u32)] = &[(0x0000, 0x05FF)];

/// Layout features to retain during subsetting.
///
/// Covers kerning, mark positioning, ligatures and the numeral/case features
/// web text commonly relies on.
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"ccmp", b"locl", b"kern", b"mark", b"mkmk", b"liga", b"clig", b"calt", b"rlig", b"dlig",
    b"case", b"frac", b"numr", b"dnom", b"sups", b"subs", b"ordn", b"lnum", b"onum", b"pnum",
    b"tnum", b"zero", b"smcp", b"c2sc",
];

/// Unicode-range font subsetter.
#[derive(Debug, Clone)]
pub struct Subsetter {
    unicode_ranges: Vec<(u32, u32)>,
}

impl Subsetter {
    /// Creates a subsetter for the font library: [`LATIN_RANGES`] with the
    /// standard [`LAYOUT_FEATURES`]. Glyph names are dropped.
    pub fn latin() -> Self {
        Self { unicode_ranges: LATIN_RANGES.to_vec() }
    }

    /// The configured Unicode ranges.
    pub fn unicode_ranges(&self) -> &[(u32, u32)] {
        &self.unicode_ranges
    }

    /// Subsets the font data and returns the result as TrueType bytes.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = SubsetInput::new()?;

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in LAYOUT_FEATURES {
                feature_set.insert(Tag::new(*tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            let codepoints = self
                .unicode_ranges
                .iter()
                .flat_map(|(start, end)| (*start..=*end).filter_map(char::from_u32));
            for c in codepoints {
                unicode_set.insert(c);
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_ranges_cover_basic_and_supplement() {
        let subsetter = Subsetter::latin();
        assert_eq!(subsetter.unicode_ranges(), &[(0x0000, 0x05FF)]);
    }

    #[test]
    fn test_layout_features_are_unique() {
        let mut tags: Vec<_> = LAYOUT_FEATURES.to_vec();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), LAYOUT_FEATURES.len());
    }
}
