//! External tool invocation
//!
//! The evolutionary test-generation tool is an external collaborator: the
//! pipeline's only contract with it is that it writes free-text diagnostic
//! lines to stdout. Invocation is synchronous and blocking, and the whole
//! output is captured in memory before extraction begins. No streaming, no
//! retry, no timeout.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Runs one trial of the external tool against a project and returns the
/// captured stdout. The seam exists so tests and orchestrators can substitute
/// canned output for a real process.
pub trait ToolRunner {
    /// Run one blocking trial and capture its entire stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be launched or produces nothing.
    fn run(&self, project: &Path) -> Result<String>;
}

/// Command-line assembly for the test-generation tool's CLI.
///
/// Flag letters follow the tool's servant interface: `-s` project, `-c`
/// configuration, `-u` harness entry point, `-a` acceleration factor, `-g`
/// test generation, `-l` live log, `-k` console forwarding, `-d` headless,
/// `-z` seed.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    script: PathBuf,
    config: Option<PathBuf>,
    harness: Option<PathBuf>,
    acceleration: u32,
    test_generation: bool,
    live_log: bool,
    console_forwarded: bool,
    headless: bool,
    seed: Option<String>,
}

impl ToolCommand {
    /// Create a command for an interpreter (e.g. `node`) and tool script.
    pub fn new(program: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            config: None,
            harness: None,
            acceleration: 1,
            test_generation: false,
            live_log: false,
            console_forwarded: false,
            headless: false,
            seed: None,
        }
    }

    /// Set the tool configuration file (`-c`).
    #[must_use]
    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Set the harness entry point (`-u`).
    #[must_use]
    pub fn harness(mut self, path: impl Into<PathBuf>) -> Self {
        self.harness = Some(path.into());
        self
    }

    /// Set the acceleration factor (`-a`).
    #[must_use]
    pub const fn acceleration(mut self, factor: u32) -> Self {
        self.acceleration = factor;
        self
    }

    /// Enable test-generation mode (`-g`).
    #[must_use]
    pub const fn test_generation(mut self, enabled: bool) -> Self {
        self.test_generation = enabled;
        self
    }

    /// Enable periodic log forwarding (`-l`).
    #[must_use]
    pub const fn live_log(mut self, enabled: bool) -> Self {
        self.live_log = enabled;
        self
    }

    /// Forward browser console output (`-k`).
    #[must_use]
    pub const fn console_forwarded(mut self, enabled: bool) -> Self {
        self.console_forwarded = enabled;
        self
    }

    /// Run without a visible browser (`-d`).
    #[must_use]
    pub const fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    /// Fix the tool's random seed (`-z`), for deterministic trials.
    #[must_use]
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Assemble the process command for one project.
    #[must_use]
    pub fn command(&self, project: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(&self.script).arg("-s").arg(project);
        if let Some(config) = &self.config {
            command.arg("-c").arg(config);
        }
        if let Some(harness) = &self.harness {
            command.arg("-u").arg(harness);
        }
        command.arg("-a").arg(self.acceleration.to_string());
        if self.test_generation {
            command.arg("-g");
        }
        if self.live_log {
            command.arg("-l");
        }
        if self.console_forwarded {
            command.arg("-k");
        }
        if self.headless {
            command.arg("-d");
        }
        if let Some(seed) = &self.seed {
            command.arg("-z").arg(seed);
        }
        command
    }
}

impl ToolRunner for ToolCommand {
    fn run(&self, project: &Path) -> Result<String> {
        debug!(project = %project.display(), "launching tool");
        let output = self.command(project).output()?;
        if !output.status.success() {
            // The tool's exit status is unreliable; its stdout is the
            // contract. Only a silent failure is fatal.
            warn!(status = %output.status, "tool exited abnormally");
            if output.stdout.is_empty() {
                return Err(Error::Tool(format!(
                    "exited with {} and produced no output",
                    output.status
                )));
            }
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
