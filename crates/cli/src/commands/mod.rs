//! CLI command implementations.

mod clear;
mod convert;

pub use clear::clear;
pub use convert::{ConvertOptions, convert, print_report};
