//! # Argot Console
//!
//! Line-oriented host for argot commands: strips the configured prefix,
//! dispatches the line through a [`CommandManager`] and turns handler output
//! and dispatch errors into printable lines.

#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
mod session;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argot_command::{CommandError, CommandManager};
use tracing::debug;

pub use config::{load_config, ConfigError, ConsoleConfig};
pub use session::Session;

/// Console with the built-in commands registered
pub struct Console {
    manager: Arc<CommandManager<Session>>,
    config: ConsoleConfig,
    exit: Arc<AtomicBool>,
}

impl Console {
    /// Create a console and register the built-in commands
    pub fn new(config: ConsoleConfig) -> Result<Self, CommandError> {
        let manager = Arc::new(CommandManager::new());
        manager.register_all(&commands::builders())?;
        Ok(Self {
            manager,
            config,
            exit: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Registry backing this console
    pub fn manager(&self) -> &CommandManager<Session> {
        &self.manager
    }

    /// Active configuration
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Check if a command asked the console to stop
    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    /// Dispatch one line and return what should be printed
    pub async fn execute(&self, line: &str) -> Vec<String> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let line = match &self.config.prefix {
            Some(prefix) => match line.strip_prefix(prefix.as_str()) {
                Some(rest) => rest,
                None => return vec![format!("Commands start with '{prefix}'")],
            },
            None => line,
        };

        debug!(line, "console input");
        let session = Session::new(Arc::clone(&self.manager), Arc::clone(&self.exit));
        let result = self.manager.invoke_line(line, session.clone()).await;

        let mut output = session.take_output();
        if let Err(err) = result {
            output.extend(self.render_error(&err));
        }
        output
    }

    fn render_error(&self, err: &CommandError) -> Vec<String> {
        let mut lines = vec![err.to_string()];
        if let Some(usage) = err.usage().filter(|_| self.config.show_usage_on_mismatch) {
            lines.push("Usage:".to_string());
            lines.extend(usage.render().lines().map(str::to_owned));
        }
        lines
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("manager", &self.manager)
            .field("config", &self.config)
            .field("exit", &self.exit_requested())
            .finish()
    }
}
