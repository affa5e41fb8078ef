//! # Argot Command - typed command matching and dispatch
//!
//! Declarative command definitions whose arguments are matched and converted
//! into strongly typed values before a handler runs.
//!
//! ## Purpose
//!
//! - Split a raw line into quote-aware tokens
//! - Resolve a command by name or alias
//! - Pick the first declared overload whose typed argument chain matches
//! - Hand the handler an event it can read typed values from
//!
//! ## Model
//!
//! A command is a literal root node plus an ordered list of overloads
//! ([`FinalArg`]). Every overload is a linear chain of [`ArgNode`]s ending in
//! a handler. Chains grow by copying their ancestor path, so overloads that
//! share a prefix share only immutable nodes and a built [`Command`] can be
//! invoked concurrently without locking.
//!
//! The command token is the first node of every chain: token `0` is the
//! command name, token `1` the first argument.
//!
//! ## What Does NOT Belong Here
//!
//! - Command business logic (lives in handlers)
//! - Console, chat or network transport producing the line
//! - Rendering of completions
//!
//! ## Example
//!
//! ```
//! use argot_command::{CommandBuilder, CommandManager};
//!
//! # futures::executor::block_on(async {
//! let manager = CommandManager::new();
//! manager
//!     .register(&CommandBuilder::with_aliases("echo", &["say"]).args(|root| {
//!         root.greedy("text", |scope, text| {
//!             scope.execute("Print text", move |event| {
//!                 println!("{}", event.value(&text));
//!                 async { Ok(()) }
//!             });
//!         });
//!     }))
//!     .unwrap();
//!
//! manager.invoke_line(r#"say "hello world""#, ()).await.unwrap();
//! # });
//! ```

#![forbid(unsafe_code)]

mod alias;
/// Argument nodes and the built-in argument kinds
pub mod args;
mod builder;
mod command;
mod complete;
/// Error types
pub mod error;
mod event;
mod final_arg;
mod manager;
mod tokenizer;

pub use alias::{Alias, AliasConflict, AliasSet};
pub use args::{
    ArgEnum, ArgIdentifier, ArgKind, ArgNode, Argument, BooleanArg, DoubleArg, EnumArg, FloatArg,
    GreedyStringArg, IntArg, LiteralArg, LongArg, NodeId, StringArg,
};
pub use builder::{ArgScope, CommandBuilder};
pub use command::{Command, CommandUsage, OverloadUsage};
pub use complete::{static_prefix_match, AutoComplete};
pub use error::{BoxError, CommandError, Result};
pub use event::ExecuteEvent;
pub use final_arg::{FinalArg, HandlerResult};
pub use manager::CommandManager;
pub use tokenizer::parse_arguments;
