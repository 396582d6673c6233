//! # award-photos
//!
//! Batch-renames and resizes a directory of contest photo entries, lets the
//! user pick Gold, Silver and Bronze winners, and turns the winners into
//! square thumbnails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use award_photos::{Config, ExternalEditor, Pipeline, TerminalPrompter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input_dir("/photos/october")
//!     .topic("Autumn Leaves")
//!     .build()?;
//!
//! let editor = ExternalEditor::from_config(&config);
//! let stats = Pipeline::new(config, TerminalPrompter, editor)?.run()?;
//! stats.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Stages
//!
//! 1. **Setup**: creates `<input>_edited` next to the input directory
//! 2. **Walk**: copies every photo as `<name>-Best-<topic>.<ext>`, scales it
//!    to 400px wide and asks which photos win the open awards
//! 3. **Square**: scales square winners to 200px, opens the others in an
//!    external editor for manual cropping

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod awards;
mod config;
mod editor;
mod error;
mod filter;
mod photo;
mod pipeline;
mod prompt;
mod scanner;

pub mod naming;

pub use awards::{AwardSlots, SquareWorkList};
pub use config::{Config, ConfigBuilder, DEFAULT_DISPLAY_WIDTH, DEFAULT_THUMBNAIL_WIDTH};
pub use editor::{Editor, ExternalEditor, RecordingEditor};
pub use error::{Error, Result};
pub use filter::DEFAULT_SKIP_PATTERNS;
pub use naming::Award;
pub use photo::{ImageHandle, scale_file};
pub use pipeline::{AwardOutcome, Pipeline, PipelineStats};
pub use prompt::{
    Prompter, ScriptedPrompter, TerminalPrompter, ask_topic, is_affirmative, pick_input_dir,
};
pub use scanner::PhotoEntry;

/// Runs the complete workflow on the terminal with the configured editor.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The output directory already exists
/// - A photo cannot be copied, decoded or encoded
/// - A file name has no extension
/// - The external editor cannot be started
pub fn run(config: Config) -> Result<PipelineStats> {
    let editor = ExternalEditor::from_config(&config);
    Pipeline::new(config, TerminalPrompter, editor)?.run()
}
