use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor command configured")]
    EmptyCommand,
    #[error("failed to launch editor `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("editor `{command}` did not exit cleanly ({status})")]
    Failed { command: String, status: ExitStatus },
}

/// Something that lets the user modify a file in place.
///
/// Returning `Ok(())` means the file may have changed and should be re-read.
/// Any error means the caller must treat the file as untouched.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<(), EditorError>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<(), EditorError>,
{
    fn edit(&self, path: &Path) -> Result<(), EditorError> {
        self(path)
    }
}

/// Runs a configured editor command as a blocking child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    /// Split `command` on whitespace: the first word is the program, the rest
    /// are passed ahead of the file path (`code --wait` → `code --wait <path>`).
    pub fn parse(command: &str) -> Result<Self, EditorError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(EditorError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command_line(&self, path: &Path) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push(' ');
        line.push_str(&path.display().to_string());
        line
    }
}

impl Editor for CommandEditor {
    fn edit(&self, path: &Path) -> Result<(), EditorError> {
        let command = self.command_line(path);
        info!(%command, "launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| {
                error!(%command, %source, "failed to launch editor");
                EditorError::Spawn {
                    command: command.clone(),
                    source,
                }
            })?;

        if !status.success() {
            error!(%command, %status, "editor exited unsuccessfully");
            return Err(EditorError::Failed { command, status });
        }

        info!(%command, "editor closed");
        Ok(())
    }
}
