//! Overload leaves: terminated argument chains bound to a handler

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::args::{ArgKind, ArgNode};
use crate::error::BoxError;
use crate::event::ExecuteEvent;

/// Result returned by command handlers
pub type HandlerResult = Result<(), BoxError>;

type Handler<S> = Arc<dyn Fn(ExecuteEvent<S>) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A terminated argument chain with a description and a handler.
///
/// The path fixes how many tokens the overload expects and which converter
/// runs at each position. There is no way to extend a `FinalArg`.
pub struct FinalArg<S = ()> {
    path: Arc<[ArgNode]>,
    description: String,
    handler: Handler<S>,
}

impl<S: Send + 'static> FinalArg<S> {
    pub(crate) fn new<F, Fut>(path: Arc<[ArgNode]>, description: String, handler: F) -> Self
    where
        F: Fn(ExecuteEvent<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            path,
            description,
            handler: Arc::new(move |event: ExecuteEvent<S>| handler(event).boxed()),
        }
    }

    /// Check whether `args` match every node of the path.
    ///
    /// Arity must line up first: the same number of tokens as nodes, one
    /// extra blank token at the end, or any surplus when the last node is a
    /// greedy string.
    pub async fn check_args(&self, args: &[String]) -> bool {
        let expected = self.path.len();
        let last_is_greedy = self
            .path
            .last()
            .is_some_and(|node| node.kind() == ArgKind::Greedy);
        let trailing_blank = args.last().is_some_and(|arg| arg.trim().is_empty());

        let arity_matches = args.len() == expected
            || (args.len() == expected + 1 && trailing_blank)
            || (args.len() > expected && last_is_greedy);

        if !arity_matches {
            return false;
        }

        self.count_args(args).await == expected
    }

    /// Count leading positions of `args` that match the path.
    ///
    /// Stops at the first failing position. A greedy node always counts.
    pub async fn count_args(&self, args: &[String]) -> usize {
        let mut matched = 0;

        for (index, node) in self.path.iter().enumerate() {
            if node.kind() == ArgKind::Greedy {
                matched += 1;
                break;
            }

            if node.check(args.get(index).map(String::as_str)).await {
                matched += 1;
            } else {
                break;
            }
        }

        matched
    }

    /// Map `event` along the path and run the handler
    pub async fn invoke(&self, mut event: ExecuteEvent<S>) -> HandlerResult {
        event.map_args(&self.path).await;
        (self.handler)(event).await
    }
}

impl<S> FinalArg<S> {
    /// Dotted join of the node names on the path
    pub fn name(&self) -> String {
        self.path
            .iter()
            .map(ArgNode::name)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Nodes this overload expects, command root first
    pub fn path(&self) -> &[ArgNode] {
        &self.path
    }

    /// Description of this argument combination
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Syntax line: root name followed by the descriptors of the other nodes
    pub fn print_arg_help(&self) -> String {
        let Some((root, rest)) = self.path.split_first() else {
            return String::new();
        };
        let rest: Vec<String> = rest.iter().map(ArgNode::describe).collect();
        format!("{} {}", root.name(), rest.join(" "))
            .trim_end()
            .to_string()
    }
}

impl<S> Clone for FinalArg<S> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            description: self.description.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// `- description`, or empty when the description is blank
impl<S> fmt::Display for FinalArg<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.trim().is_empty() {
            Ok(())
        } else {
            write!(f, "- {}", self.description)
        }
    }
}

impl<S> fmt::Debug for FinalArg<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalArg")
            .field("name", &self.name())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
