use crate::error::{Error, Result};
use crate::filter::DEFAULT_SKIP_PATTERNS;
use crate::naming::{self, DEFAULT_OUTPUT_SUFFIX};
use std::path::{Path, PathBuf};

/// Width of every renamed copy.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 400;

/// Width of finalized award thumbnails.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 200;

/// Editor launched on award images that are not square.
#[cfg(target_os = "macos")]
pub const DEFAULT_EDITOR_PROGRAM: &str = "open";
/// Editor launched on award images that are not square.
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_EDITOR_PROGRAM: &str = "gimp";

#[cfg(target_os = "macos")]
const DEFAULT_EDITOR_ARGS: &[&str] = &["-a", "GIMP"];
#[cfg(not(target_os = "macos"))]
const DEFAULT_EDITOR_ARGS: &[&str] = &[];

/// Configuration for one award-photos run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory holding the contest entries
    pub input_dir: PathBuf,

    /// Topic as typed by the user
    pub topic: String,

    /// Suffix appended to the input directory name
    pub output_suffix: String,

    /// Explicit output directory, overrides the derived sibling
    pub output_dir_override: Option<PathBuf>,

    /// Width of every renamed copy
    pub display_width: u32,

    /// Width of finalized award thumbnails
    pub thumbnail_width: u32,

    /// File name globs skipped during the walk
    pub skip_patterns: Vec<String>,

    /// Program launched on non-square award images
    pub editor_program: String,

    /// Arguments passed before the image path
    pub editor_args: Vec<String>,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use award_photos::Config;
    ///
    /// let config = Config::builder()
    ///     .input_dir("/photos/contest")
    ///     .topic("Cats")
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.topic_label().unwrap(), "-Best-Cats");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Input directory doesn't exist or is not a directory
    /// - Topic is blank
    /// - A width is zero
    /// - Output directory equals or lies inside the input directory
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(Error::config(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        if !self.input_dir.is_dir() {
            return Err(Error::config(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        self.topic_label()?;

        if self.display_width == 0 || self.thumbnail_width == 0 {
            return Err(Error::config("image widths must be greater than 0"));
        }

        if self.output_suffix.is_empty() && self.output_dir_override.is_none() {
            return Err(Error::config(
                "output_suffix must not be empty, the output would replace the input",
            ));
        }

        let output_dir = self.output_dir()?;
        if overlaps(&self.input_dir, &output_dir) {
            return Err(Error::config(format!(
                "Output directory {} must not be inside input directory {}",
                output_dir.display(),
                self.input_dir.display()
            )));
        }

        if self.editor_program.trim().is_empty() {
            return Err(Error::config("editor_program must not be empty"));
        }

        Ok(())
    }

    /// Label embedded into every output file name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the topic is blank.
    pub fn topic_label(&self) -> Result<String> {
        naming::topic_label(&self.topic)
    }

    /// Directory that receives all output files.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no sibling name can be derived.
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir_override {
            Some(dir) => Ok(dir.clone()),
            None => naming::output_dir_for(&self.input_dir, &self.output_suffix),
        }
    }
}

fn overlaps(input: &Path, output: &Path) -> bool {
    let input = input.canonicalize().unwrap_or_else(|_| input.to_path_buf());
    // The output usually doesn't exist yet; resolve its parent instead.
    let output = match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map_or_else(|_| output.to_path_buf(), |p| p.join(name)),
        _ => output.to_path_buf(),
    };
    output.starts_with(&input)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            topic: String::new(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            output_dir_override: None,
            display_width: DEFAULT_DISPLAY_WIDTH,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            skip_patterns: DEFAULT_SKIP_PATTERNS.iter().map(ToString::to_string).collect(),
            editor_program: DEFAULT_EDITOR_PROGRAM.to_string(),
            editor_args: DEFAULT_EDITOR_ARGS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input_dir: Option<PathBuf>,
    topic: Option<String>,
    output_suffix: Option<String>,
    output_dir: Option<PathBuf>,
    display_width: Option<u32>,
    thumbnail_width: Option<u32>,
    extra_skip_patterns: Vec<String>,
    editor_program: Option<String>,
    editor_args: Option<Vec<String>>,
}

impl ConfigBuilder {
    /// Sets the directory holding the contest entries.
    #[must_use]
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(path.into());
        self
    }

    /// Sets the topic embedded into output names.
    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets the suffix appended to the input directory name.
    #[must_use]
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    /// Writes output to `path` instead of the derived sibling directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the width of every renamed copy.
    #[must_use]
    pub fn display_width(mut self, width: u32) -> Self {
        self.display_width = Some(width);
        self
    }

    /// Sets the width of finalized award thumbnails.
    #[must_use]
    pub fn thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = Some(width);
        self
    }

    /// Adds file name globs skipped on top of the defaults.
    #[must_use]
    pub fn skip_patterns(mut self, patterns: Vec<String>) -> Self {
        self.extra_skip_patterns.extend(patterns);
        self
    }

    /// Sets the program launched on non-square award images.
    #[must_use]
    pub fn editor_program(mut self, program: impl Into<String>) -> Self {
        self.editor_program = Some(program.into());
        self
    }

    /// Sets the arguments passed to the editor before the image path.
    #[must_use]
    pub fn editor_args(mut self, args: Vec<String>) -> Self {
        self.editor_args = Some(args);
        self
    }

    /// Builds the configuration.
    ///
    /// Setting an editor program without arguments clears the platform
    /// default arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let editor_args = match (&self.editor_program, self.editor_args) {
            (_, Some(args)) => args,
            (Some(_), None) => Vec::new(),
            (None, None) => defaults.editor_args,
        };

        let mut skip_patterns = defaults.skip_patterns;
        skip_patterns.extend(self.extra_skip_patterns);

        let config = Config {
            input_dir: self.input_dir.unwrap_or(defaults.input_dir),
            topic: self.topic.unwrap_or_default(),
            output_suffix: self.output_suffix.unwrap_or(defaults.output_suffix),
            output_dir_override: self.output_dir,
            display_width: self.display_width.unwrap_or(DEFAULT_DISPLAY_WIDTH),
            thumbnail_width: self.thumbnail_width.unwrap_or(DEFAULT_THUMBNAIL_WIDTH),
            skip_patterns,
            editor_program: self.editor_program.unwrap_or(defaults.editor_program),
            editor_args,
        };

        config.validate()?;
        Ok(config)
    }
}
