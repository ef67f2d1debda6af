//! Configuration constants for the font library.

/// Input directory: TrueType fonts waiting to be converted.
pub const INPUT_DIR_NAME: &str = "fonts_ttf";

/// Output directory: WOFF2 files, one subfolder per family.
pub const LIBRARY_DIR_NAME: &str = "font_lib";

/// Archive directory: originals that were already converted.
pub const ARCHIVE_DIR_NAME: &str = "fonts_used";

/// Only files with this extension are picked up from the input directory.
pub const INPUT_EXTENSION: &str = "ttf";

/// Extension of every generated file.
pub const OUTPUT_EXTENSION: &str = "woff2";

/// Stem used when sanitizing leaves nothing behind.
pub const FALLBACK_STEM: &str = "font";

/// Unicode range argument passed to external subsetters, matching
/// [`fontshelf_font_subsetter::LATIN_RANGES`].
pub const EXTERNAL_UNICODES: &str = "U+000-5FF";

/// Flavor argument passed to external subsetters.
pub const EXTERNAL_FLAVOR: &str = "woff2";

/// Cores left free for the rest of the system when sizing the worker pool.
pub const RESERVED_CORES: usize = 2;
