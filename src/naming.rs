//! File and directory naming rules.
//!
//! Every output file name is derived from the source file name and the
//! topic label: spaces in the base become hyphens and the label is appended
//! right before the extension. Award copies additionally carry the award's
//! suffix token.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const TOPIC_PREFIX: &str = "-Best-";

/// Default suffix appended to the input directory name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_edited";

/// One of the three award slots a photo can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Award {
    /// First place
    Gold,
    /// Second place
    Silver,
    /// Third place
    Bronze,
}

impl Award {
    /// All awards in assignment order.
    pub const ALL: [Self; 3] = [Self::Gold, Self::Silver, Self::Bronze];

    /// Token inserted between the topic label and the extension.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Gold => "-Gold.",
            Self::Silver => "-Silver.",
            Self::Bronze => "-Bronze.",
        }
    }

    /// Human-readable name used in prompts and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Gold => 0,
            Self::Silver => 1,
            Self::Bronze => 2,
        }
    }
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Splits a file name at its last dot into base and extension.
fn split_extension(source: &str) -> Result<(&str, &str)> {
    match source.rsplit_once('.') {
        Some((base, ext)) if !ext.is_empty() => Ok((base, ext)),
        _ => Err(Error::validation(format!(
            "missing extension in file name '{source}'"
        ))),
    }
}

/// Builds the topic label embedded into every output name.
///
/// # Errors
///
/// Returns a validation error if the topic is blank.
///
/// # Examples
///
/// ```
/// assert_eq!(award_photos::naming::topic_label("Street Cats")?, "-Best-Street-Cats");
/// # Ok::<(), award_photos::Error>(())
/// ```
pub fn topic_label(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(Error::validation("topic must not be empty"));
    }
    Ok(format!("{TOPIC_PREFIX}{}", topic.replace(' ', "-")))
}

/// Name of the renamed, width-scaled copy of `source`.
///
/// # Errors
///
/// Returns a validation error if `source` has no extension.
///
/// # Examples
///
/// ```
/// use award_photos::naming::destination_file_name;
///
/// assert_eq!(destination_file_name("my cat.jpg", "-Best-Cats")?, "my-cat-Best-Cats.jpg");
/// # Ok::<(), award_photos::Error>(())
/// ```
pub fn destination_file_name(source: &str, topic: &str) -> Result<String> {
    let (base, ext) = split_extension(source)?;
    Ok(format!("{}{topic}.{ext}", base.replace(' ', "-")))
}

/// Name of the award copy of `source`.
///
/// # Errors
///
/// Returns a validation error if `source` has no extension.
pub fn square_file_name(source: &str, topic: &str, award: Award) -> Result<String> {
    let (base, ext) = split_extension(source)?;
    Ok(format!("{}{topic}{}{ext}", base.replace(' ', "-"), award.suffix()))
}

/// Sibling directory of `input` named `<input name><suffix>`.
///
/// # Errors
///
/// Returns a configuration error if `input` has no final path component.
pub fn output_dir_for(input: &Path, suffix: &str) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        Error::config(format!(
            "Input path has no directory name: {}",
            input.display()
        ))
    })?;

    let mut output_name = name.to_os_string();
    output_name.push(suffix);

    Ok(input.with_file_name(output_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_label() {
        assert_eq!(topic_label("Cats").unwrap(), "-Best-Cats");
        assert_eq!(topic_label("  Street Cats ").unwrap(), "-Best-Street-Cats");
        assert!(topic_label("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_destination_keeps_extension() {
        assert_eq!(
            destination_file_name("A.jpg", "-Best-Cats").unwrap(),
            "A-Best-Cats.jpg"
        );
        assert_eq!(
            destination_file_name("B.png", "-Best-Cats").unwrap(),
            "B-Best-Cats.png"
        );
    }

    #[test]
    fn test_destination_hyphenates_every_space() {
        let name = destination_file_name("my  old cat.JPG", "-Best-Cats").unwrap();
        assert_eq!(name, "my--old-cat-Best-Cats.JPG");
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_square_suffix_before_final_dot() {
        for award in Award::ALL {
            let name = square_file_name("A cat.jpg", "-Best-Cats", award).unwrap();
            let (stem, ext) = name.rsplit_once('.').unwrap();
            assert_eq!(ext, "jpg");
            assert!(stem.ends_with(&format!("-{}", award.label())));
            assert!(name.contains(award.suffix()));
        }
        assert_eq!(
            square_file_name("A.jpg", "-Best-Cats", Award::Gold).unwrap(),
            "A-Best-Cats-Gold.jpg"
        );
    }

    #[test]
    fn test_multi_dot_names_use_last_dot() {
        assert_eq!(
            destination_file_name("IMG.0042.jpeg", "-Best-Dogs").unwrap(),
            "IMG.0042-Best-Dogs.jpeg"
        );
        assert_eq!(
            square_file_name("IMG.0042.jpeg", "-Best-Dogs", Award::Bronze).unwrap(),
            "IMG.0042-Best-Dogs-Bronze.jpeg"
        );
    }

    #[test]
    fn test_missing_extension() {
        assert!(destination_file_name("README", "-Best-Cats").unwrap_err().is_validation());
        assert!(square_file_name("photo.", "-Best-Cats", Award::Silver)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_output_dir_is_sibling() {
        let out = output_dir_for(Path::new("/photos/contest"), DEFAULT_OUTPUT_SUFFIX).unwrap();
        assert_eq!(out, PathBuf::from("/photos/contest_edited"));

        let out = output_dir_for(Path::new("/photos/contest/"), DEFAULT_OUTPUT_SUFFIX).unwrap();
        assert_eq!(out, PathBuf::from("/photos/contest_edited"));
    }

    #[test]
    fn test_output_dir_for_root_fails() {
        assert!(output_dir_for(Path::new("/"), DEFAULT_OUTPUT_SUFFIX)
            .unwrap_err()
            .is_config());
    }

    #[test]
    fn test_award_order() {
        assert!(Award::Gold < Award::Silver && Award::Silver < Award::Bronze);
        assert_eq!(Award::Silver.to_string(), "Silver");
    }
}
