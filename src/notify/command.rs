//! Shell command hook run on completion

use std::io;

use tokio::process::{Child, Command};
use tracing::{debug, error, info};

use super::{CompletionEvent, Notifier};

const DEFAULT_SHELL: &str = "sh";

/// Runs a user supplied `sh -c` command when a countdown completes.
///
/// The event is passed through `POMODORO_TITLE`, `POMODORO_MESSAGE` and
/// `POMODORO_MINUTES`. Blank commands and commands starting with `#` are
/// treated as disabled.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    shell: String,
    command: String,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            command: command.into(),
        }
    }

    /// Use a different shell binary to interpret the command
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        let trimmed = self.command.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    }

    fn build(&self, event: &CompletionEvent) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(&self.command)
            .env("POMODORO_TITLE", &event.title)
            .env("POMODORO_MESSAGE", &event.message)
            .env("POMODORO_MINUTES", event.minutes.to_string());
        cmd
    }

    /// Start the hook. `Ok(None)` when the hook is disabled.
    fn spawn(&self, event: &CompletionEvent) -> io::Result<Option<Child>> {
        if !self.is_enabled() {
            return Ok(None);
        }
        self.build(event).spawn().map(Some)
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, event: &CompletionEvent) {
        // Fire and forget: the child is reaped by the runtime
        match self.spawn(event) {
            Ok(Some(child)) => info!("Completion hook started (pid {:?})", child.id()),
            Ok(None) => debug!("Completion hook disabled: {:?}", self.command),
            Err(e) => error!("Failed to run completion hook `{}`: {}", self.command, e),
        }
    }
}
