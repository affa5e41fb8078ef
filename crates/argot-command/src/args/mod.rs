//! Argument nodes: typed matchers chained into overload paths.
//!
//! A chain grows only through [`ArgNode::append`], which never touches the
//! parent. The child receives a copy of the parent's ancestor path plus the
//! parent itself, so every node can describe its full path on its own and
//! overloads that share a prefix share nothing mutable.

mod types;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

pub use types::{
    ArgEnum, BooleanArg, DoubleArg, EnumArg, FloatArg, GreedyStringArg, IntArg, LiteralArg,
    LongArg, StringArg,
};

/// Type-erased converted value stored in an execution context
pub(crate) type ArgValue = Box<dyn Any + Send + Sync>;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an argument node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a node participates in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Converts exactly one token into a typed value
    Typed,
    /// Matches a fixed word (or one of its aliases)
    Literal,
    /// Consumes every remaining token; must end the chain
    Greedy,
}

/// A typed matcher/converter for one position of an argument chain.
///
/// Implement this to add argument kinds beyond the built-in ones and attach
/// them with [`ArgScope::arg`](crate::ArgScope::arg).
#[async_trait]
pub trait Argument: Send + Sync + 'static {
    /// Value produced by a successful conversion
    type Value: Send + Sync + 'static;

    /// Name of this argument, used for identifiers and help
    fn name(&self) -> &str;

    /// Type label rendered in help, e.g. `Int`
    fn type_name(&self) -> &str;

    /// Matching behavior of this argument
    fn kind(&self) -> ArgKind {
        ArgKind::Typed
    }

    /// Convert a token (absent past the end of input) into a value
    async fn convert(&self, token: Option<&str>) -> Option<Self::Value>;

    /// Check if a token converts successfully
    async fn check_type(&self, token: Option<&str>) -> bool {
        self.convert(token).await.is_some()
    }

    /// Help descriptor for this argument
    fn describe(&self) -> String {
        format!("<{}:{}>", self.name(), self.type_name())
    }
}

/// Object-safe view of an [`Argument`] used inside heterogeneous chains
#[async_trait]
trait ErasedArgument: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> ArgKind;
    fn describe(&self) -> String;
    async fn check(&self, token: Option<&str>) -> bool;
    async fn convert_erased(&self, token: Option<&str>) -> Option<ArgValue>;
}

#[async_trait]
impl<A: Argument> ErasedArgument for A {
    fn name(&self) -> &str {
        Argument::name(self)
    }

    fn kind(&self) -> ArgKind {
        Argument::kind(self)
    }

    fn describe(&self) -> String {
        Argument::describe(self)
    }

    async fn check(&self, token: Option<&str>) -> bool {
        self.check_type(token).await
    }

    async fn convert_erased(&self, token: Option<&str>) -> Option<ArgValue> {
        self.convert(token)
            .await
            .map(|value| Box::new(value) as ArgValue)
    }
}

/// Key for reading a converted value back out of an
/// [`ExecuteEvent`](crate::ExecuteEvent).
///
/// The type parameter is the value type the node produces. Identity is the
/// node the identifier was created for; the name is only for display.
pub struct ArgIdentifier<T> {
    id: NodeId,
    name: Arc<str>,
    _value: PhantomData<fn() -> T>,
}

impl<T> ArgIdentifier<T> {
    fn new(id: NodeId, name: &str) -> Self {
        Self {
            id,
            name: Arc::from(name),
            _value: PhantomData,
        }
    }

    /// Identity of the node this identifier belongs to
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name of the argument
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for ArgIdentifier<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for ArgIdentifier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ArgIdentifier<T> {}

impl<T> std::hash::Hash for ArgIdentifier<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for ArgIdentifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgIdentifier")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<T> fmt::Display for ArgIdentifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One link of an argument chain together with its ancestor path
#[derive(Clone)]
pub struct ArgNode {
    id: NodeId,
    arg: Arc<dyn ErasedArgument>,
    path: Arc<[ArgNode]>,
}

impl ArgNode {
    /// Create a chain root with an empty ancestor path
    pub fn root<A: Argument>(arg: A) -> (Self, ArgIdentifier<A::Value>) {
        Self::with_path(arg, Arc::from(Vec::new()))
    }

    fn with_path<A: Argument>(arg: A, path: Arc<[ArgNode]>) -> (Self, ArgIdentifier<A::Value>) {
        let id = NodeId::next();
        let identifier = ArgIdentifier::new(id, Argument::name(&arg));
        let node = Self {
            id,
            arg: Arc::new(arg),
            path,
        };
        (node, identifier)
    }

    /// Extend the chain with `arg`.
    ///
    /// Returns a new node whose ancestor path is this node's path followed by
    /// this node; `self` is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if this node is a greedy string, which has to stay last.
    pub fn append<A: Argument>(&self, arg: A) -> (Self, ArgIdentifier<A::Value>) {
        assert!(
            self.kind() != ArgKind::Greedy,
            "greedy argument `{}` must be the last argument of its chain",
            self.name()
        );
        Self::with_path(arg, self.extended_path())
    }

    /// Ancestor path followed by this node
    pub(crate) fn extended_path(&self) -> Arc<[ArgNode]> {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(self.clone());
        Arc::from(path)
    }

    /// Identity of this node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name of this node
    pub fn name(&self) -> &str {
        self.arg.name()
    }

    /// Matching behavior of this node
    pub fn kind(&self) -> ArgKind {
        self.arg.kind()
    }

    /// Nodes from the chain root up to, not including, this node
    pub fn path(&self) -> &[ArgNode] {
        &self.path
    }

    /// Help descriptor, `<name:Type>` or `[name]`
    pub fn describe(&self) -> String {
        self.arg.describe()
    }

    pub(crate) async fn check(&self, token: Option<&str>) -> bool {
        self.arg.check(token).await
    }

    pub(crate) async fn convert(&self, token: Option<&str>) -> Option<ArgValue> {
        self.arg.convert_erased(token).await
    }
}

impl fmt::Debug for ArgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgNode")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("depth", &self.path.len())
            .finish()
    }
}

impl fmt::Display for ArgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Case-insensitive string equality over full lowercase mappings.
///
/// Characters whose lowercase form expands to several characters, such as
/// `İ`, only match that full expansion.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_copies_path_without_touching_parent() {
        let (root, _) = ArgNode::root(LiteralArg::new("set", &[]));
        let (first, _) = root.append(IntArg::new("a"));
        let (second, _) = root.append(StringArg::new("b"));
        let (leaf, _) = first.append(BooleanArg::new("c"));

        assert!(root.path().is_empty());
        assert_eq!(first.path().len(), 1);
        assert_eq!(second.path().len(), 1);
        assert_eq!(first.path()[0].id(), root.id());
        assert_eq!(second.path()[0].id(), root.id());

        let names: Vec<_> = leaf.path().iter().map(ArgNode::name).collect();
        assert_eq!(names, vec!["set", "a"]);
    }

    #[test]
    fn test_identifier_equality_is_node_identity() {
        let (root, _) = ArgNode::root(LiteralArg::new("cmd", &[]));
        let (_, left) = root.append(IntArg::new("n"));
        let (_, right) = root.append(IntArg::new("n"));

        assert_eq!(left.name(), right.name());
        assert_ne!(left, right);
        assert_eq!(left, left.clone());
    }

    #[test]
    fn test_describe() {
        let (root, _) = ArgNode::root(LiteralArg::new("cmd", &["c"]));
        let (int, _) = root.append(IntArg::new("count"));
        assert_eq!(root.describe(), "[cmd]");
        assert_eq!(int.to_string(), "<count:Int>");
    }

    #[test]
    #[should_panic(expected = "must be the last argument")]
    fn test_append_after_greedy_panics() {
        let (root, _) = ArgNode::root(LiteralArg::new("say", &[]));
        let (greedy, _) = root.append(GreedyStringArg::new("msg"));
        let _ = greedy.append(IntArg::new("n"));
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("TRUE", "true"));
        assert!(eq_ignore_case("ÉTÉ", "été"));
        assert!(!eq_ignore_case("on", "off"));
        assert!(!eq_ignore_case("on", "o"));
    }

    #[test]
    fn test_eq_ignore_case_uses_full_lowercase_mapping() {
        assert!(!eq_ignore_case("İ", "i"));
        assert!(eq_ignore_case("İ", "i\u{307}"));
        assert!(!eq_ignore_case("ß", "SS"));
    }
}
