use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use tokio::process::Command;

use tracing::{debug, info, warn};

use crate::errors::{StarterError, StarterErrorKind};

/// Exit code used when the child ended without one and no signal could be read from its status.
const UNKNOWN_EXIT_CODE: i32 = 1;

/// Launcher runs the multiplexer executable in the foreground. The child inherits the standard
/// streams and the environment of the shim.
#[derive(Debug, Clone)]
pub struct Launcher {
    program: PathBuf,
    args: Vec<String>,
}

impl Launcher {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Launcher {
            program: program.into(),
            args,
        }
    }

    /// Spawns the executable and waits for it to exit. There is no retry: a spawn failure is
    /// returned as is, and a non-zero exit is only logged.
    pub async fn run(&self) -> Result<ExitStatus, StarterError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                StarterError::with_source(
                    StarterErrorKind::LaunchMultiplexer,
                    format!(
                        "Error launching multiplexer {}: {}",
                        self.program.display(),
                        e
                    ),
                    e,
                )
            })?;

        info!(program = %self.program.display(), pid = ?child.id(), "Multiplexer started");

        let status = child.wait().await.map_err(|e| {
            StarterError::with_source(
                StarterErrorKind::LaunchMultiplexer,
                format!("Error waiting for multiplexer: {}", e),
                e,
            )
        })?;

        if status.success() {
            debug!("multiplexer exited successfully");
        } else {
            warn!(code = exit_code(&status), "Multiplexer exited with failure");
        }

        Ok(status)
    }
}

/// Spawns `program` with `args` and blocks until it exits.
pub async fn launch_multiplexer(
    program: &Path,
    args: &[String],
) -> Result<ExitStatus, StarterError> {
    Launcher::new(program, args.to_vec()).run().await
}

/// Maps the child's status to the code the shim exits with. A child killed by a signal maps to
/// `128 + signal`, the way shells report it.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}
