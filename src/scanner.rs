use crate::{
    config::Config,
    error::{Error, Result},
    filter::MetadataFilter,
};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A photo discovered under the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEntry {
    /// Absolute path to the source file
    pub source_path: PathBuf,

    /// Bare file name, used for naming and prompts
    pub file_name: String,

    /// Path relative to the input directory
    pub relative_path: String,
}

/// Result of a directory walk.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanOutcome {
    /// Photos in traversal order
    pub photos: Vec<PhotoEntry>,

    /// Metadata files that were filtered out
    pub skipped_files: usize,
}

/// Walks the input directory and collects photo entries.
pub(crate) struct Scanner {
    root_dir: PathBuf,
    filter: MetadataFilter,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a skip pattern is invalid.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            root_dir: config.input_dir.clone(),
            filter: MetadataFilter::new(&config.skip_patterns)?,
        })
    }

    /// Recursively lists every regular file under the root, sorted by file
    /// name within each directory. Hidden files are not special; only the
    /// metadata filter drops files.
    ///
    /// # Errors
    ///
    /// Returns an IO error if any directory cannot be read.
    pub(crate) fn scan(&self) -> Result<ScanOutcome> {
        debug!("Walking {}", self.root_dir.display());

        let mut builder = WalkBuilder::new(&self.root_dir);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut outcome = ScanOutcome::default();

        for result in builder.build() {
            let entry = result.map_err(|e| self.walk_error(e))?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if self.filter.is_metadata(path) {
                trace!("Skipping metadata file: {}", path.display());
                outcome.skipped_files += 1;
                continue;
            }

            outcome.photos.push(self.entry_for(path)?);
        }

        debug!(
            "Walk complete: {} photos, {} skipped",
            outcome.photos.len(),
            outcome.skipped_files
        );

        Ok(outcome)
    }

    fn entry_for(&self, path: &Path) -> Result<PhotoEntry> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::validation(format!(
                    "file name is not valid UTF-8: {}",
                    path.display()
                ))
            })?
            .to_string();

        let relative_path = pathdiff::diff_paths(path, &self.root_dir)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .to_string();

        trace!("Found photo: {}", relative_path);

        Ok(PhotoEntry {
            source_path: path.to_path_buf(),
            file_name,
            relative_path,
        })
    }

    fn walk_error(&self, error: ignore::Error) -> Error {
        let message = error.to_string();
        match error.into_io_error() {
            Some(io) => Error::io(&self.root_dir, io),
            None => Error::Io {
                path: self.root_dir.clone(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(root: &Path) -> Config {
        Config::builder()
            .input_dir(root)
            .topic("Cats")
            .output_dir(root.with_file_name("scanner_out"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_scanner_finds_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("B.png").write_str("b").unwrap();
        temp.child("A.jpg").write_str("a").unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path())).unwrap();
        let outcome = scanner.scan().unwrap();

        let names: Vec<_> = outcome.photos.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, ["A.jpg", "B.png"]);
        assert_eq!(outcome.skipped_files, 0);
    }

    #[test]
    fn test_scanner_skips_metadata() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".DS_Store").write_str("junk").unwrap();
        temp.child("sub/.DS_Store").write_str("junk").unwrap();
        temp.child("sub/._A.jpg").write_str("fork").unwrap();
        temp.child("A.jpg").write_str("a").unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path())).unwrap();
        let outcome = scanner.scan().unwrap();

        assert_eq!(outcome.photos.len(), 1);
        assert_eq!(outcome.skipped_files, 3);
    }

    #[test]
    fn test_scanner_includes_hidden_and_ignored() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".gitignore").write_str("*.jpg\n").unwrap();
        temp.child("A.jpg").write_str("a").unwrap();
        temp.child(".hidden.png").write_str("h").unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path())).unwrap();
        let outcome = scanner.scan().unwrap();

        assert_eq!(outcome.photos.len(), 3);
    }

    #[test]
    fn test_scanner_nested_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("round1/A.jpg").write_str("a").unwrap();
        temp.child("round2/B.jpg").write_str("b").unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path())).unwrap();
        let outcome = scanner.scan().unwrap();

        assert_eq!(outcome.photos.len(), 2);
        assert!(outcome
            .photos
            .iter()
            .any(|p| p.relative_path == Path::new("round2").join("B.jpg").to_string_lossy()));
    }

    #[test]
    fn test_scanner_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path())).unwrap();
        let outcome = scanner.scan().unwrap();

        assert!(outcome.photos.is_empty());
    }
}
