//! Command registry and dispatch.
//!
//! The registry is an alias-indexed set of built commands behind a single
//! read-write lock. Registration and removal take the write lock; lookups
//! take the read lock and hand out a cloned `Arc`, so no guard is ever held
//! across a handler await.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::alias::{AliasConflict, AliasSet};
use crate::builder::CommandBuilder;
use crate::command::Command;
use crate::complete::{static_prefix_match, AutoComplete};
use crate::error::{CommandError, Result};
use crate::event::ExecuteEvent;
use crate::tokenizer::parse_arguments;

/// Registry of commands, reachable by name or alias
pub struct CommandManager<S = ()> {
    commands: RwLock<AliasSet<Command<S>>>,
}

impl<S> Default for CommandManager<S> {
    fn default() -> Self {
        Self {
            commands: RwLock::new(AliasSet::default()),
        }
    }
}

impl<S: Send + 'static> CommandManager<S> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `builder` and register the result.
    ///
    /// # Errors
    ///
    /// [`CommandError::RegistrationConflict`] if the name or one of the
    /// aliases is already taken. The registry is left unchanged.
    pub fn register(&self, builder: &CommandBuilder<S>) -> Result<Arc<Command<S>>> {
        let command = Arc::new(builder.build());

        let inserted = self.commands.write().insert(Arc::clone(&command));
        if let Err(conflict) = inserted {
            warn!(
                command = %command.name(),
                name = %conflict.name,
                existing = %conflict.existing,
                "command registration conflict"
            );
            return Err(conflict.into());
        }

        debug!(
            command = %command.name(),
            aliases = ?command.aliases(),
            overloads = command.final_args().len(),
            "command registered"
        );
        Ok(command)
    }

    /// Register every builder in order, stopping at the first conflict
    pub fn register_all<'a>(
        &self,
        builders: impl IntoIterator<Item = &'a CommandBuilder<S>>,
    ) -> Result<Vec<Arc<Command<S>>>> {
        builders
            .into_iter()
            .map(|builder| self.register(builder))
            .collect()
    }

    /// Remove `command` and all of its names.
    ///
    /// Returns `false` if that exact command is not registered.
    pub fn unregister(&self, command: &Arc<Command<S>>) -> bool {
        let removed = self.commands.write().remove(command);
        if removed {
            debug!(command = %command.name(), "command unregistered");
        }
        removed
    }

    /// Command registered under `name`, either as name or alias
    ///
    /// # Errors
    ///
    /// [`CommandError::CommandNotFound`] if nothing is registered under `name`.
    pub fn command(&self, name: &str) -> Result<Arc<Command<S>>> {
        self.command_opt(name)
            .ok_or_else(|| CommandError::command_not_found(name))
    }

    /// Command registered under `name`, or `None`
    pub fn command_opt(&self, name: &str) -> Option<Arc<Command<S>>> {
        self.commands.read().get(name).cloned()
    }

    /// Registered commands in registration order
    pub fn commands(&self) -> Vec<Arc<Command<S>>> {
        self.commands.read().iter().cloned().collect()
    }

    /// Check if a command is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.commands.read().contains(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    /// Check if no command is registered
    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    /// Resolve `args[0]` and invoke that command with `state`.
    ///
    /// # Errors
    ///
    /// - [`CommandError::InvalidInput`] if `args` is empty
    /// - [`CommandError::CommandNotFound`] if `args[0]` is not registered
    /// - [`CommandError::NoMatchingOverload`] if no overload accepts `args`
    /// - [`CommandError::Handler`] if the selected handler fails
    pub async fn invoke(&self, args: Vec<String>, state: S) -> Result<()> {
        let Some(name) = args.first() else {
            return Err(CommandError::invalid_input("Arguments can not be empty!"));
        };
        let command = self.command(name)?;

        debug!(command = %command.name(), args = ?args, "dispatching");
        let result = command.invoke(ExecuteEvent::new(args, state)).await;
        if let Err(CommandError::Handler { source, .. }) = &result {
            warn!(command = %command.name(), error = %source, "command handler failed");
        }
        result
    }

    /// Tokenize `line` and [`invoke`](Self::invoke) the result
    pub async fn invoke_line(&self, line: &str, state: S) -> Result<()> {
        let args = parse_arguments(line)?;
        self.invoke(args, state).await
    }
}

impl<S> AutoComplete for CommandManager<S> {
    /// Matching command names and aliases, sorted and deduplicated
    fn completions(&self, prefix: &str) -> Vec<String> {
        let commands = self.commands.read();
        let mut names = static_prefix_match(commands.names(), prefix);
        names.sort();
        names.dedup();
        names
    }
}

impl From<AliasConflict> for CommandError {
    fn from(conflict: AliasConflict) -> Self {
        Self::RegistrationConflict {
            name: conflict.name,
            existing: conflict.existing,
        }
    }
}

impl<S> fmt::Debug for CommandManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commands = self.commands.read();
        f.debug_struct("CommandManager")
            .field("registered_count", &commands.len())
            .field(
                "commands",
                &commands.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
