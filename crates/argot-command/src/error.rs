//! Error types for command parsing, registration and dispatch

use std::sync::Arc;

use thiserror::Error;

use crate::command::CommandUsage;

/// Boxed error returned by command handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias for command operations
pub type Result<T, E = CommandError> = std::result::Result<T, E>;

/// Errors surfaced by the tokenizer, the registry and command invocation.
///
/// Builder misuse and reads of unmapped argument identifiers are not listed
/// here: they are logic defects and panic instead of returning an error.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Empty or blank input rejected before tokenizing or lookup
    #[error("{reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: &'static str,
    },

    /// No command is registered under the requested name or alias
    #[error("No command found for: {name}")]
    CommandNotFound {
        /// Name that failed to resolve
        name: String,
    },

    /// The command exists but none of its overloads matched the arguments
    #[error("No matching sub command found for args: \"{}\"", sub_command_args(.args))]
    NoMatchingOverload {
        /// Raw tokens, including the command token at index 0
        args: Vec<String>,
        /// Usage of the command that was resolved
        usage: Arc<CommandUsage>,
    },

    /// A command name or alias collides with an existing registration
    #[error("'{name}' is already registered by command '{existing}'")]
    RegistrationConflict {
        /// Colliding name or alias
        name: String,
        /// Primary name of the command that already owns it
        existing: String,
    },

    /// The selected overload's handler returned an error
    #[error("Command '{command}' failed: {source}")]
    Handler {
        /// Primary name of the command
        command: String,
        /// Error returned by the handler
        #[source]
        source: BoxError,
    },
}

impl CommandError {
    /// Create an invalid input error
    pub fn invalid_input(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }

    /// Create a command not found error
    pub fn command_not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Usage of the resolved command when no overload matched
    pub fn usage(&self) -> Option<&CommandUsage> {
        match self {
            Self::NoMatchingOverload { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

fn sub_command_args(args: &[String]) -> String {
    args.get(1..).unwrap_or_default().join(" ")
}
