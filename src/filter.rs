//! Metadata file filtering.
//!
//! Operating systems drop bookkeeping files into photo folders (Finder's
//! `.DS_Store`, AppleDouble `._*` forks, Windows `Thumbs.db`). They are not
//! photos and are skipped by file name before any processing.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// File name patterns skipped unless the caller replaces them.
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &[
    ".DS_Store",
    "._*",
    ".localized",
    "Thumbs.db",
    "desktop.ini",
];

/// Matches OS metadata files by file name.
#[derive(Debug, Clone)]
pub(crate) struct MetadataFilter {
    skip: GlobSet,
}

impl MetadataFilter {
    /// Compiles the given file name patterns.
    ///
    /// # Errors
    ///
    /// Returns an invalid pattern error for malformed globs.
    pub(crate) fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        Ok(Self {
            skip: Self::build_globset(patterns)?,
        })
    }

    fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern)
                .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| Error::invalid_pattern(patterns_summary(patterns), e.to_string()))
    }

    /// Returns true if the file at `path` is metadata and should be skipped.
    pub(crate) fn is_metadata(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.skip.is_match(Path::new(name)))
    }
}

fn patterns_summary<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skips_ds_store() {
        let filter = MetadataFilter::new(DEFAULT_SKIP_PATTERNS).unwrap();
        assert!(filter.is_metadata(Path::new("/photos/.DS_Store")));
        assert!(filter.is_metadata(Path::new("/photos/sub/._A.jpg")));
        assert!(filter.is_metadata(Path::new("Thumbs.db")));
    }

    #[test]
    fn test_default_keeps_photos() {
        let filter = MetadataFilter::new(DEFAULT_SKIP_PATTERNS).unwrap();
        assert!(!filter.is_metadata(Path::new("/photos/A.jpg")));
        assert!(!filter.is_metadata(Path::new("/photos/.DS_Store/B.png")));
        assert!(!filter.is_metadata(Path::new("/photos/my.DS_Store.jpg")));
    }

    #[test]
    fn test_custom_patterns() {
        let filter = MetadataFilter::new(&["*.xmp", ".DS_Store"]).unwrap();
        assert!(filter.is_metadata(Path::new("/photos/A.xmp")));
        assert!(!filter.is_metadata(Path::new("/photos/Thumbs.db")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MetadataFilter::new(&["[unclosed"]).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("[unclosed"));
    }
}
