//! fontshelf core: turn a folder of TrueType files into a tidy WOFF2 library.
//!
//! The pipeline runs file names through [`naming::parse`], resolves output
//! names with [`plan::build_plans`], and hands the plans to a
//! [`convert::Converter`], which subsets and compresses each font and moves
//! converted sources into the archive.

pub mod archive;
pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod layout;
pub mod naming;
pub mod plan;
pub mod reserve;
pub mod transform;

pub use archive::clear_archive;
pub use convert::{ConversionOutcome, ConversionReport, Converter, Failure, default_jobs};
pub use error::ConvertError;
pub use layout::DirectoryLayout;
pub use naming::{FontDescriptor, Weight, WeightName, parse, parse_all};
pub use plan::{
    ConversionPlan, SuffixCandidate, SuffixDecisions, WeightLabel, build_plans, families,
    suffix_candidates,
};
pub use reserve::{reserve_destination_path, reserve_output_path, sanitize_stem};
pub use transform::{ExternalTool, FontTransform, Woff2Transform};
pub use fontshelf_font_subsetter::{LATIN_RANGES, Subsetter};
