//! Fluent declaration of commands.
//!
//! A [`CommandBuilder`] is a literal root node plus the overloads declared
//! under it. Declarations go through an [`ArgScope`], which points at one
//! node of the chain: each attach call creates a child node, opens a scope on
//! it and hands the continuation the child's typed identifier. Calling the
//! same attach methods on an outer scope again branches the chain.
//!
//! ```
//! use argot_command::{CommandBuilder, Command};
//!
//! let command: Command = CommandBuilder::with_aliases("volume", &["vol"])
//!     .description("Adjust the output volume")
//!     .args(|root| {
//!         root.int("level", |scope, level| {
//!             scope.execute("Set the volume", move |event| {
//!                 let level = event.value(&level);
//!                 async move {
//!                     println!("volume set to {level}");
//!                     Ok(())
//!                 }
//!             });
//!         });
//!         root.literal("mute", &["m"], |scope| {
//!             scope.execute("Mute the output", |_event| async { Ok(()) });
//!         });
//!     })
//!     .build();
//!
//! assert_eq!(command.final_args().len(), 2);
//! ```

use std::future::Future;

use crate::args::{
    ArgEnum, ArgIdentifier, ArgNode, Argument, BooleanArg, DoubleArg, EnumArg, FloatArg,
    GreedyStringArg, IntArg, LiteralArg, LongArg, StringArg,
};
use crate::command::Command;
use crate::event::ExecuteEvent;
use crate::final_arg::{FinalArg, HandlerResult};

const NO_DESCRIPTION: &str = "No description";

/// Builder for a [`Command`]
pub struct CommandBuilder<S = ()> {
    name: String,
    aliases: Vec<String>,
    description: String,
    root: ArgNode,
    final_args: Vec<FinalArg<S>>,
}

impl<S: Send + 'static> CommandBuilder<S> {
    /// Start a command without aliases
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_aliases(name, &[])
    }

    /// Start a command reachable through `aliases` as well as its name
    pub fn with_aliases(name: impl Into<String>, aliases: &[&str]) -> Self {
        let name = name.into();
        let (root, _) = ArgNode::root(LiteralArg::new(name.clone(), aliases));
        Self {
            name,
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            description: NO_DESCRIPTION.to_string(),
            root,
            final_args: Vec::new(),
        }
    }

    /// Set the command description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare overloads under the command root.
    ///
    /// May be called repeatedly; overloads keep their declaration order.
    pub fn args(mut self, declare: impl FnOnce(&mut ArgScope<'_, S>)) -> Self {
        self.declare(declare);
        self
    }

    /// Declare overloads through a mutable reference
    pub fn declare(&mut self, declare: impl FnOnce(&mut ArgScope<'_, S>)) {
        let mut scope = ArgScope {
            node: self.root.clone(),
            final_args: &mut self.final_args,
        };
        declare(&mut scope);
    }

    /// Name of the command being built
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Freeze the declared overloads into a command.
    ///
    /// Every call returns an independent snapshot; overloads declared later
    /// do not show up in commands built earlier.
    pub fn build(&self) -> Command<S> {
        Command::new(
            self.name.clone(),
            self.aliases.clone(),
            self.description.clone(),
            self.final_args.clone(),
        )
    }
}

/// Declaration cursor positioned on one node of an argument chain
pub struct ArgScope<'a, S> {
    node: ArgNode,
    final_args: &'a mut Vec<FinalArg<S>>,
}

impl<S: Send + 'static> ArgScope<'_, S> {
    /// Attach `arg` under the current node and continue inside it
    pub fn arg<A: Argument>(
        &mut self,
        arg: A,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<A::Value>),
    ) {
        let (child, identifier) = self.node.append(arg);
        let mut scope = ArgScope {
            node: child,
            final_args: &mut *self.final_args,
        };
        block(&mut scope, identifier);
    }

    /// Attach a [`BooleanArg`]
    pub fn boolean(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<bool>),
    ) {
        self.arg(BooleanArg::new(name), block);
    }

    /// Attach an [`IntArg`]
    pub fn int(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<i32>),
    ) {
        self.arg(IntArg::new(name), block);
    }

    /// Attach a [`LongArg`]
    pub fn long(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<i64>),
    ) {
        self.arg(LongArg::new(name), block);
    }

    /// Attach a [`FloatArg`]
    pub fn float(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<f32>),
    ) {
        self.arg(FloatArg::new(name), block);
    }

    /// Attach a [`DoubleArg`]
    pub fn double(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<f64>),
    ) {
        self.arg(DoubleArg::new(name), block);
    }

    /// Attach an [`EnumArg`] over `E`
    pub fn enumeration<E: ArgEnum>(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<E>),
    ) {
        self.arg(EnumArg::<E>::new(name), block);
    }

    /// Attach a [`StringArg`]
    pub fn string(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<String>),
    ) {
        self.arg(StringArg::new(name), block);
    }

    /// Attach a [`GreedyStringArg`]; only [`execute`](Self::execute) may follow
    pub fn greedy(
        &mut self,
        name: impl Into<String>,
        block: impl FnOnce(&mut ArgScope<'_, S>, ArgIdentifier<String>),
    ) {
        self.arg(GreedyStringArg::new(name), block);
    }

    /// Attach a [`LiteralArg`]
    pub fn literal(
        &mut self,
        name: impl Into<String>,
        aliases: &[&str],
        block: impl FnOnce(&mut ArgScope<'_, S>),
    ) {
        self.arg(LiteralArg::new(name, aliases), |scope, _| block(scope));
    }

    /// Terminate the chain here with a handler
    pub fn execute<F, Fut>(&mut self, description: impl Into<String>, handler: F)
    where
        F: Fn(ExecuteEvent<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let final_arg = FinalArg::new(self.node.extended_path(), description.into(), handler);
        self.final_args.push(final_arg);
    }

    /// Terminate the chain here with a handler and the default description
    pub fn execute_default<F, Fut>(&mut self, handler: F)
    where
        F: Fn(ExecuteEvent<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.execute(NO_DESCRIPTION, handler);
    }
}
