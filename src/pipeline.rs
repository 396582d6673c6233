use crate::{
    awards::{AwardSlots, SquareWorkList},
    config::Config,
    editor::Editor,
    error::{Error, Result},
    naming::{self, Award},
    photo::{self, ImageHandle},
    prompt::Prompter,
    scanner::{PhotoEntry, Scanner},
};
use serde::Serialize;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing::{debug, info, instrument, warn};

/// An award copy and what the square pass did with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardOutcome {
    /// Award that was assigned
    pub award: Award,

    /// Source file the user picked
    pub source: String,

    /// Award copy in the output directory
    pub path: PathBuf,

    /// True if the copy was square and scaled to thumbnail width
    pub squared: bool,
}

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Photos copied, renamed and scaled
    pub files_processed: usize,

    /// Metadata files that were skipped
    pub files_skipped: usize,

    /// Awards in assignment order
    pub awards: Vec<AwardOutcome>,

    /// Output directory path
    pub output_directory: String,

    /// Total execution time, including time spent waiting on prompts
    pub duration: Duration,

    /// Time spent in the square pass
    pub square_duration: Duration,

    /// Generation timestamp
    pub generated_at: String,
}

impl PipelineStats {
    /// Award copies that were scaled to thumbnail width.
    #[must_use]
    pub fn squared(&self) -> usize {
        self.awards.iter().filter(|a| a.squared).count()
    }

    /// Award copies handed to the external editor.
    #[must_use]
    pub fn sent_to_editor(&self) -> usize {
        self.awards.len() - self.squared()
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║               Award Photos Summary                    ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Photos Processed:     {:>8}                        ║",
            self.files_processed
        );
        println!(
            "║ Metadata Skipped:     {:>8}                        ║",
            self.files_skipped
        );
        println!("║                                                       ║");
        for outcome in &self.awards {
            let action = if outcome.squared { "squared" } else { "editor" };
            println!(
                "║ {:<7} {:<32} {:>8}     ║",
                outcome.award.label(),
                outcome.source,
                action
            );
        }
        for award in Award::ALL {
            if !self.awards.iter().any(|a| a.award == award) {
                println!("║ {:<7} {:<32} {:>8}     ║", award.label(), "-", "unfilled");
            }
        }
        println!("║                                                       ║");
        println!("║ Output Directory:                                     ║");
        println!(
            "║   {}                                              ║",
            self.output_directory
        );
        println!(
            "║ Total Time:           {:>8.2}s                     ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }

    /// Serializes the statistics as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs setup, the walk and award loop, and the square pass.
pub struct Pipeline<P, E> {
    config: Config,
    scanner: Scanner,
    topic_label: String,
    output_dir: PathBuf,
    prompter: P,
    editor: E,
}

impl<P: Prompter, E: Editor> Pipeline<P, E> {
    /// Creates a new pipeline with the given configuration and collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - A skip pattern is invalid
    pub fn new(config: Config, prompter: P, editor: E) -> Result<Self> {
        config.validate()?;

        let scanner = Scanner::new(&config)?;
        let topic_label = config.topic_label()?;
        let output_dir = config.output_dir()?;

        Ok(Self {
            config,
            scanner,
            topic_label,
            output_dir,
            prompter,
            editor,
        })
    }

    /// Directory that receives all output files.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The injected prompter.
    #[must_use]
    pub const fn prompter(&self) -> &P {
        &self.prompter
    }

    /// The injected editor.
    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Executes the complete pipeline and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Setup**: creates the output directory, refusing to reuse one
    /// 2. **Walk**: copies and scales every photo, asking for award winners
    /// 3. **Square**: scales square award copies, sends the rest to the editor
    ///
    /// # Errors
    ///
    /// Any failure aborts the run; files already written stay in place.
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(&mut self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Stage 1/3: Creating {}", self.output_dir.display());
        self.create_output_dir()?;

        info!("Stage 2/3: Processing photos...");
        let scan = self.scanner.scan()?;
        let mut slots = AwardSlots::new();
        let mut work = SquareWorkList::new();
        let mut sources = Vec::new();

        for entry in &scan.photos {
            if let Some(award) = self.process_photo(entry, &mut slots, &mut work)? {
                sources.push((award, entry.file_name.clone()));
            }
        }

        info!(
            "✓ Processed {} photos ({} skipped), {} award(s) assigned",
            scan.photos.len(),
            scan.skipped_files,
            work.len()
        );
        if !slots.all_filled() {
            let open: Vec<_> = slots.unfilled().map(Award::label).collect();
            warn!("Unfilled award slots: {}", open.join(", "));
        }

        info!("Stage 3/3: Finalizing award images...");
        let square_start = Instant::now();
        let mut awards = Vec::with_capacity(work.len());
        for (award, path) in work.iter() {
            let squared = self.finalize_square(award, path)?;
            let source = sources
                .iter()
                .find(|(a, _)| *a == award)
                .map(|(_, name)| name.clone())
                .unwrap_or_default();
            awards.push(AwardOutcome {
                award,
                source,
                path: path.to_path_buf(),
                squared,
            });
        }
        let square_duration = square_start.elapsed();

        let duration = start_time.elapsed();
        info!("✓ Completed in {:.2}s", duration.as_secs_f64());

        Ok(PipelineStats {
            files_processed: scan.photos.len(),
            files_skipped: scan.skipped_files,
            awards,
            output_directory: self.output_dir.display().to_string(),
            duration,
            square_duration,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn create_output_dir(&self) -> Result<()> {
        fs::create_dir(&self.output_dir).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                Error::output_exists(&self.output_dir)
            } else {
                Error::io(&self.output_dir, e)
            }
        })
    }

    /// Copies and scales one photo, then offers it for the open award slots.
    fn process_photo(
        &mut self,
        entry: &PhotoEntry,
        slots: &mut AwardSlots,
        work: &mut SquareWorkList,
    ) -> Result<Option<Award>> {
        let destination = self
            .output_dir
            .join(naming::destination_file_name(&entry.file_name, &self.topic_label)?);

        copy_file(&entry.source_path, &destination)?;
        photo::scale_file(&destination, self.config.display_width)?;
        debug!("{} -> {}", entry.relative_path, destination.display());

        let open: Vec<Award> = slots.unfilled().collect();
        for award in open {
            let question = format!("Is {} the {}?", entry.file_name, award.label());
            if !self.prompter.ask_yes_no(&question)? {
                continue;
            }

            let square_path = self.output_dir.join(naming::square_file_name(
                &entry.file_name,
                &self.topic_label,
                award,
            )?);
            copy_file(&entry.source_path, &square_path)?;
            work.assign(slots, award, square_path);

            info!("{} is the {}", entry.file_name, award);
            return Ok(Some(award));
        }

        Ok(None)
    }

    /// Returns true if the image was square and scaled in place.
    fn finalize_square(&self, award: Award, path: &Path) -> Result<bool> {
        let mut handle = ImageHandle::open(path)?;

        if handle.is_square()? {
            handle.scale(self.config.thumbnail_width)?;
            handle.save()?;
            debug!(
                "{} thumbnail scaled to {}px: {}",
                award,
                self.config.thumbnail_width,
                path.display()
            );
            return Ok(true);
        }

        warn!(
            "{} image {} is {}x{}, opening editor for manual crop",
            award,
            path.display(),
            handle.width()?,
            handle.height()?
        );
        self.editor.launch(path)?;
        Ok(false)
    }
}

/// Copies `from` to `to`, blaming whichever side actually failed.
fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let mut source = fs::File::open(from).map_err(|e| Error::io(from, e))?;
    let mut destination = fs::File::create(to).map_err(|e| Error::io(to, e))?;
    io::copy(&mut source, &mut destination).map_err(|e| Error::io(to, e))?;
    Ok(())
}
