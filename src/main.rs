use anyhow::Context;
use award_photos::{Config, DEFAULT_DISPLAY_WIDTH, DEFAULT_THUMBNAIL_WIDTH};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "award-photos",
    version,
    author,
    about = "Rename, resize and pick award winners from a folder of contest photos",
    long_about = "Rename, resize and pick award winners from a folder of contest photos.\n\n\
    Every photo is copied to <dir>_edited as <name>-Best-<topic>.<ext> and scaled to \
    400px wide. While Gold, Silver or Bronze are still open you are asked whether the \
    current photo wins; answer y to pick it. Square winners become 200px thumbnails, \
    other winners are opened in an image editor for manual cropping.\n\n\
    USAGE EXAMPLES:\n  \
      # Prompt for everything\n  \
      award-photos\n\n  \
      # Non-interactive setup\n  \
      award-photos --dir ~/Pictures/october --topic \"Autumn Leaves\"\n\n  \
      # Use Krita for non-square winners\n  \
      award-photos --dir ./entries --topic Cats --editor krita"
)]
struct Cli {
    /// Directory with the contest entries (asks if omitted)
    #[arg(short, long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Topic embedded into every output name (asks if omitted)
    #[arg(short, long)]
    topic: Option<String>,

    /// Width of the renamed copies
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    width: u32,

    /// Width of square award thumbnails
    #[arg(long, default_value_t = DEFAULT_THUMBNAIL_WIDTH)]
    thumb_width: u32,

    /// Suffix for the output directory name
    #[arg(long, default_value = "_edited")]
    suffix: String,

    /// Program used to crop non-square winners
    #[arg(long, value_name = "PROGRAM")]
    editor: Option<String>,

    /// Argument passed to the editor before the image path (repeatable)
    #[arg(long = "editor-arg", value_name = "ARG", allow_hyphen_values = true)]
    editor_args: Vec<String>,

    /// Additional file name glob to skip (repeatable)
    #[arg(long = "skip", value_name = "GLOB")]
    skip: Vec<String>,

    /// Print run statistics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let topic = match cli.topic {
        Some(topic) => topic,
        None => award_photos::ask_topic().context("Failed to read topic")?,
    };
    let dir = match cli.dir {
        Some(dir) => dir,
        None => award_photos::pick_input_dir().context("Failed to choose input directory")?,
    };

    let mut builder = Config::builder()
        .input_dir(dir)
        .topic(topic)
        .display_width(cli.width)
        .thumbnail_width(cli.thumb_width)
        .output_suffix(cli.suffix)
        .skip_patterns(cli.skip);

    if let Some(editor) = cli.editor {
        builder = builder.editor_program(editor);
    }
    if !cli.editor_args.is_empty() {
        builder = builder.editor_args(cli.editor_args);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = award_photos::run(config).context("Award photo run failed")?;

    if cli.json {
        println!("{}", stats.to_json()?);
    } else {
        stats.print_summary();
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("award_photos=info"),
        1 => EnvFilter::new("award_photos=debug"),
        _ => EnvFilter::new("award_photos=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
