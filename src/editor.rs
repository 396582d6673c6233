//! Hand-off of non-square award images to an interactive editor.

use crate::config::Config;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Opens an image for manual editing.
pub trait Editor {
    /// Opens `path` in the editor and returns without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns an external tool error if the editor cannot be started.
    fn launch(&self, path: &Path) -> Result<()>;
}

/// Spawns a GUI editor as a detached child process.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    /// Runs `program args... <path>` for each launch.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Editor configured for this run.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.editor_program.clone(), config.editor_args.clone())
    }

    /// Program that will be started.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Editor for ExternalEditor {
    fn launch(&self, path: &Path) -> Result<()> {
        debug!(
            "Launching {} {:?} {}",
            self.program,
            self.args,
            path.display()
        );

        // Not waited on: the editor outlives this run.
        #[allow(clippy::zombie_processes)]
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::external_tool(&self.program, e))?;

        debug!("Editor started with pid {}", child.id());
        Ok(())
    }
}

/// Records launch requests instead of starting anything.
#[derive(Debug, Default)]
pub struct RecordingEditor {
    launched: RefCell<Vec<PathBuf>>,
}

impl RecordingEditor {
    /// Creates an editor with no recorded launches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths handed to [`Editor::launch`], in order.
    #[must_use]
    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.borrow().clone()
    }
}

impl Editor for RecordingEditor {
    fn launch(&self, path: &Path) -> Result<()> {
        self.launched.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
