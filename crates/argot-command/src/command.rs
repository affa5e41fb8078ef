//! Built commands and overload resolution

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::alias::Alias;
use crate::error::{CommandError, Result};
use crate::event::ExecuteEvent;
use crate::final_arg::FinalArg;

/// Syntax and description of one overload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverloadUsage {
    /// Syntax line, e.g. `set [volume] <level:Int>`
    pub syntax: String,
    /// Description of the overload
    pub description: String,
}

/// Help data of a command, detached from its handlers.
///
/// Carried by [`CommandError::NoMatchingOverload`] so callers can render
/// per-overload usage without holding the command itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandUsage {
    /// Primary name
    pub name: String,
    /// Alternative names
    pub aliases: Vec<String>,
    /// Command description
    pub description: String,
    /// Overloads in declaration order
    pub overloads: Vec<OverloadUsage>,
}

impl CommandUsage {
    fn from_final_args<S>(
        name: &str,
        aliases: &[String],
        description: &str,
        final_args: &[FinalArg<S>],
    ) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.to_vec(),
            description: description.to_string(),
            overloads: final_args
                .iter()
                .map(|final_arg| OverloadUsage {
                    syntax: final_arg.print_arg_help(),
                    description: final_arg.description().to_string(),
                })
                .collect(),
        }
    }

    /// Render every overload, separated by blank lines
    pub fn render(&self) -> String {
        self.overloads
            .iter()
            .map(|overload| {
                let mut help = if overload.syntax.trim().is_empty() {
                    "<No Argument>".to_string()
                } else {
                    overload.syntax.clone()
                };
                if !overload.description.trim().is_empty() {
                    help.push_str("\n    - ");
                    help.push_str(&overload.description);
                }
                help
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for CommandUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A named, aliased set of overloads.
///
/// Built by [`CommandBuilder`](crate::CommandBuilder) and immutable
/// afterwards, so it can be shared between concurrent invocations.
pub struct Command<S = ()> {
    name: String,
    aliases: Vec<String>,
    description: String,
    final_args: Vec<FinalArg<S>>,
    usage: Arc<CommandUsage>,
}

impl<S> Command<S> {
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        description: String,
        final_args: Vec<FinalArg<S>>,
    ) -> Self {
        let usage = Arc::new(CommandUsage::from_final_args(
            &name,
            &aliases,
            &description,
            &final_args,
        ));
        Self {
            name,
            aliases,
            description,
            final_args,
            usage,
        }
    }

    /// Primary name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Command description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Overloads in declaration order
    pub fn final_args(&self) -> &[FinalArg<S>] {
        &self.final_args
    }

    /// Help data of this command
    pub fn usage(&self) -> &Arc<CommandUsage> {
        &self.usage
    }

    /// Argument help for every overload
    pub fn print_arg_help(&self) -> String {
        self.usage.render()
    }
}

impl<S: Send + 'static> Command<S> {
    /// Run the first overload, in declaration order, that matches the event.
    ///
    /// # Errors
    ///
    /// [`CommandError::NoMatchingOverload`] if no overload matches, and
    /// [`CommandError::Handler`] if the selected handler fails.
    pub async fn invoke(&self, event: ExecuteEvent<S>) -> Result<()> {
        for final_arg in &self.final_args {
            if !final_arg.check_args(event.args()).await {
                trace!(command = %self.name, overload = %final_arg.name(), "overload rejected");
                continue;
            }

            debug!(command = %self.name, overload = %final_arg.name(), "overload selected");
            return final_arg
                .invoke(event)
                .await
                .map_err(|source| CommandError::Handler {
                    command: self.name.clone(),
                    source,
                });
        }

        debug!(command = %self.name, args = ?event.args(), "no matching overload");
        Err(CommandError::NoMatchingOverload {
            args: event.into_args(),
            usage: Arc::clone(&self.usage),
        })
    }

    /// Overload with the most leading positions matching `args`.
    ///
    /// Ties go to the earlier declared overload. Returns `None` only when the
    /// command has no overloads.
    pub async fn best_partial_match(&self, args: &[String]) -> Option<&FinalArg<S>> {
        let mut best: Option<(usize, &FinalArg<S>)> = None;
        for final_arg in &self.final_args {
            let count = final_arg.count_args(args).await;
            if best.map_or(true, |(best_count, _)| count > best_count) {
                best = Some((count, final_arg));
            }
        }
        best.map(|(_, final_arg)| final_arg)
    }
}

impl<S> Alias for Command<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

impl<S> fmt::Debug for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("final_args", &self.final_args.len())
            .finish()
    }
}
