//! Per-invocation execution context

use std::collections::HashMap;
use std::fmt;

use crate::args::{ArgIdentifier, ArgKind, ArgNode, ArgValue, NodeId};

/// Event handed to a command handler.
///
/// Holds the raw tokens of the invocation, the values converted along the
/// matched overload path, and a host-supplied state value. A fresh event is
/// created for every invocation and consumed by the handler.
pub struct ExecuteEvent<S = ()> {
    args: Vec<String>,
    mapped: HashMap<NodeId, ArgValue>,
    state: S,
}

impl<S> ExecuteEvent<S> {
    /// Create an unmapped event
    pub fn new(args: Vec<String>, state: S) -> Self {
        Self {
            args,
            mapped: HashMap::new(),
            state,
        }
    }

    /// Raw tokens, including the command token at index 0
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Host state for this invocation
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable host state for this invocation
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Take the host state out of the event
    pub fn into_state(self) -> S {
        self.state
    }

    pub(crate) fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Convert the tokens along `path` and store the values.
    ///
    /// Conversion runs again here even though the overload was already
    /// checked; positions that fail to convert are left unmapped.
    pub(crate) async fn map_args(&mut self, path: &[ArgNode]) {
        for (index, node) in path.iter().enumerate() {
            if node.kind() == ArgKind::Greedy {
                let rest = self.args.get(index..).unwrap_or_default().join(" ");
                if let Some(value) = node.convert(Some(rest.as_str())).await {
                    self.mapped.insert(node.id(), value);
                }
                break;
            }

            let value = node.convert(self.args.get(index).map(String::as_str)).await;
            if let Some(value) = value {
                self.mapped.insert(node.id(), value);
            }
        }
    }

    /// Value converted for `id`, or `None` if it is not on the matched path
    pub fn try_value_ref<T: 'static>(&self, id: &ArgIdentifier<T>) -> Option<&T> {
        self.mapped
            .get(&id.id())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Value converted for `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not mapped for this invocation, which means the
    /// handler reads an argument that is not on its own overload path.
    pub fn value_ref<T: 'static>(&self, id: &ArgIdentifier<T>) -> &T {
        match self.try_value_ref(id) {
            Some(value) => value,
            None => panic!(
                "argument `{}` is not mapped for this invocation (args: {:?})",
                id.name(),
                self.args
            ),
        }
    }

    /// Owned copy of the value converted for `id`
    ///
    /// # Panics
    ///
    /// Same contract as [`value_ref`](Self::value_ref).
    pub fn value<T: Clone + 'static>(&self, id: &ArgIdentifier<T>) -> T {
        self.value_ref(id).clone()
    }

    /// Owned copy of the value for `id`, or `None` if it is not mapped
    pub fn try_value<T: Clone + 'static>(&self, id: &ArgIdentifier<T>) -> Option<T> {
        self.try_value_ref(id).cloned()
    }

    /// Number of mapped arguments
    pub fn mapped_len(&self) -> usize {
        self.mapped.len()
    }
}

impl<S: fmt::Debug> fmt::Debug for ExecuteEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecuteEvent")
            .field("args", &self.args)
            .field("mapped", &self.mapped.len())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{GreedyStringArg, IntArg, LiteralArg};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_map_args_stores_typed_values() {
        let (root, _) = ArgNode::root(LiteralArg::new("foo", &[]));
        let (n_node, n) = root.append(IntArg::new("n"));

        let mut event = ExecuteEvent::new(tokens(&["foo", "5"]), ());
        event.map_args(&n_node.extended_path()).await;

        assert_eq!(event.value(&n), 5);
        assert_eq!(*event.value_ref(&n), 5);
        assert_eq!(event.mapped_len(), 2);
    }

    #[tokio::test]
    async fn test_map_args_joins_greedy_tail() {
        let (root, _) = ArgNode::root(LiteralArg::new("say", &[]));
        let (msg_node, msg) = root.append(GreedyStringArg::new("msg"));

        let mut event = ExecuteEvent::new(tokens(&["say", "hello", "world"]), ());
        event.map_args(&msg_node.extended_path()).await;

        assert_eq!(event.value(&msg), "hello world");
    }

    #[tokio::test]
    async fn test_failed_conversion_is_left_unmapped() {
        let (root, _) = ArgNode::root(LiteralArg::new("foo", &[]));
        let (n_node, n) = root.append(IntArg::new("n"));

        let mut event = ExecuteEvent::new(tokens(&["foo", "bar"]), ());
        event.map_args(&n_node.extended_path()).await;

        assert_eq!(event.try_value(&n), None);
    }

    #[test]
    #[should_panic(expected = "argument `n` is not mapped")]
    fn test_unmapped_read_panics() {
        let (root, _) = ArgNode::root(LiteralArg::new("foo", &[]));
        let (_, n) = root.append(IntArg::new("n"));
        let event = ExecuteEvent::new(tokens(&["foo"]), ());
        let _ = event.value(&n);
    }

    #[test]
    fn test_state_access() {
        let mut event = ExecuteEvent::new(tokens(&["foo"]), 1_u32);
        *event.state_mut() += 1;
        assert_eq!(*event.state(), 2);
        assert_eq!(event.into_state(), 2);
    }
}
