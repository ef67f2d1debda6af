//! Per-item conversion errors.

use std::{io, path::PathBuf, result};

/// Why a single planned conversion did not produce a library file.
///
/// These never abort a run; the converter records them next to the source
/// path and carries on with the next item.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("TTF file not found.")]
    SourceMissing,

    #[error("failed to {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Subset(String),

    #[error("converted to {} but could not archive the source: {source}", .output.display())]
    Archive {
        output: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(action: impl Into<String>, source: io::Error) -> Self {
        Self::Io { action: action.into(), source }
    }

    /// Builds a subset failure from a transform error, keeping its whole
    /// context chain in the reason. An empty reason becomes "Unknown failure.".
    pub(crate) fn subset(err: &anyhow::Error) -> Self {
        let reason = format!("{err:#}");
        if reason.trim().is_empty() {
            Self::Subset("Unknown failure.".to_string())
        } else {
            Self::Subset(reason)
        }
    }

    /// Short label for the failure kind, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceMissing => "missing",
            Self::Io { .. } => "io",
            Self::Subset(_) => "subset",
            Self::Archive { .. } => "archive",
        }
    }
}

pub type Result<T> = result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_subset_reason_keeps_context_chain() {
        let err = Err::<(), _>(anyhow!("bad cmap"))
            .context("Failed to parse font")
            .unwrap_err();
        let converted = ConvertError::subset(&err);
        assert_eq!(converted.to_string(), "Failed to parse font: bad cmap");
        assert_eq!(converted.kind(), "subset");
    }

    #[test]
    fn test_empty_subset_reason_is_replaced() {
        let converted = ConvertError::subset(&anyhow!(""));
        assert_eq!(converted.to_string(), "Unknown failure.");
    }

    #[test]
    fn test_archive_error_mentions_output() {
        let err = ConvertError::Archive {
            output: PathBuf::from("font_lib/Inter/Inter-Regular.woff2"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("Inter-Regular.woff2"));
        assert!(message.contains("denied"));
    }
}
