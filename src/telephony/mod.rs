//! Handing dial strings to the system
//!
//! Whether the call goes through is up to the platform; a launcher only
//! reports whether the handoff itself worked.

use std::process::Command;

use thiserror::Error;

/// Failure to hand a dial string to the system
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program:?} exited with {status}")]
    Exited { program: String, status: std::process::ExitStatus },

    #[error("empty launcher command")]
    EmptyCommand,
}

/// Telephony launcher collaborator
pub trait Launcher {
    /// Start a call for a dial string
    fn launch(&self, dial: &str) -> Result<(), LaunchError>;
}

/// Opens `tel:` URLs with the platform URL handler or a configured program
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    command: Vec<String>,
}

impl SystemLauncher {
    /// Use the platform URL handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom program. The command line is split on whitespace and the
    /// dial string is appended as the last argument.
    pub fn with_command(command: &str) -> Self {
        Self {
            command: command.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Program and leading arguments, empty for the platform handler
    pub fn command(&self) -> &[String] {
        &self.command
    }

    fn run_command(&self, dial: &str) -> Result<(), LaunchError> {
        let (program, args) = self.command.split_first().ok_or(LaunchError::EmptyCommand)?;

        tracing::debug!("launching {:?} {:?} {:?}", program, args, dial);
        let status = Command::new(program)
            .args(args)
            .arg(dial)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(LaunchError::Exited {
                program: program.clone(),
                status,
            });
        }
        Ok(())
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, dial: &str) -> Result<(), LaunchError> {
        if self.command.is_empty() {
            tracing::debug!("opening {:?} with the platform handler", dial);
            return open::that(dial).map_err(|source| LaunchError::Spawn {
                program: "platform URL handler".to_string(),
                source,
            });
        }
        self.run_command(dial)
    }
}

/// Prints the dial string instead of calling
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintLauncher;

impl Launcher for PrintLauncher {
    fn launch(&self, dial: &str) -> Result<(), LaunchError> {
        println!("{}", dial);
        Ok(())
    }
}
