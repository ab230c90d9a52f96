//! Main [`ChainError`] type: a leaf or foreign error plus its context notes

// Standard library
use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

// Internal crates
use crate::core::frame::{Frame, SourceLocation};
use crate::core::leaf::LeafError;
use crate::core::traits::{HasCause, HasLocation, HasMessage};

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// An error and the context notes added to it on its way up the stack
///
/// Every value is one node of a singly linked chain. A node is either a root
/// (a [`LeafError`] or a foreign error converted with `?`) or a wrap that owns
/// exactly one cause, so a chain can never loop back on itself. A wrap carries
/// either a note or, from [`with_location`](Self::with_location), only the
/// place the error passed through.
///
/// `ChainError` is one pointer wide. It deliberately does not implement
/// [`std::error::Error`], which keeps `?` usable on any foreign error; use
/// [`as_std_error`](Self::as_std_error) or `Box<dyn Error>::from` when a
/// standard error is required.
///
/// ```rust
/// use faultline_error::prelude::*;
///
/// fn load(id: u32) -> Result<String> {
///     Err(RECORD_NOT_FOUND.err()).wrap_err_with(|| format!("loading user {id}"))
/// }
///
/// let err = load(7).wrap_err("rendering profile").unwrap_err();
/// assert!(err.is(&RECORD_NOT_FOUND));
/// assert_eq!(err.to_string(), "rendering profile: loading user 7: record not found");
/// ```
pub struct ChainError {
    node: Box<Node>,
}

#[derive(Debug)]
enum Node {
    Leaf(Arc<LeafError>),
    External {
        error: BoxedError,
        location: &'static Location<'static>,
    },
    Wrapped {
        note: Cow<'static, str>,
        location: &'static Location<'static>,
        cause: ChainError,
    },
    Located {
        location: &'static Location<'static>,
        cause: ChainError,
    },
}

impl ChainError {
    /// Create an ad hoc leaf error
    #[track_caller]
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_leaf(Arc::new(LeafError::new(message)))
    }

    /// Adopt a foreign error as the root of a new chain
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_node(Node::External {
            error: Box::new(error),
            location: Location::caller(),
        })
    }

    pub(crate) fn from_leaf(leaf: Arc<LeafError>) -> Self {
        Self::from_node(Node::Leaf(leaf))
    }

    fn from_node(node: Node) -> Self {
        Self {
            node: Box::new(node),
        }
    }

    /// Wrap this error with a note, recording the caller's location
    ///
    /// The new node takes ownership of `self`; nothing about `self` changes.
    #[track_caller]
    #[must_use]
    pub fn wrap(self, note: impl Into<Cow<'static, str>>) -> Self {
        self.wrap_at(note.into(), Location::caller())
    }

    pub(crate) fn wrap_at(
        self,
        note: Cow<'static, str>,
        location: &'static Location<'static>,
    ) -> Self {
        Self::from_node(Node::Wrapped {
            note,
            location,
            cause: self,
        })
    }

    /// The immediate cause, or `None` for a root
    #[inline]
    #[must_use]
    pub fn cause(&self) -> Option<&ChainError> {
        match &*self.node {
            Node::Wrapped { cause, .. } | Node::Located { cause, .. } => Some(cause),
            Node::Leaf(_) | Node::External { .. } => None,
        }
    }

    /// Record the caller's location without adding a note
    ///
    /// Use it where a shared error is raised, so the chain shows the raise
    /// site and not only where the sentinel was declared. The node takes the
    /// message of its cause and is left out of the single-line `{}` form.
    #[track_caller]
    #[must_use]
    pub fn with_location(self) -> Self {
        self.located_at(Location::caller())
    }

    pub(crate) fn located_at(self, location: &'static Location<'static>) -> Self {
        Self::from_node(Node::Located {
            location,
            cause: self,
        })
    }

    /// Take back the cause this node owns
    ///
    /// `err.wrap(note).into_cause()` gives back exactly `err`.
    #[must_use]
    pub fn into_cause(self) -> Option<ChainError> {
        match *self.node {
            Node::Wrapped { cause, .. } | Node::Located { cause, .. } => Some(cause),
            Node::Leaf(_) | Node::External { .. } => None,
        }
    }

    /// Whether any node of the chain is the leaf `target`
    ///
    /// Comparison is by identity, never by message text, so two sentinels
    /// that happen to share a message are told apart.
    #[must_use]
    pub fn is(&self, target: &LeafError) -> bool {
        self.chain().any(|node| match &*node.node {
            Node::Leaf(leaf) => std::ptr::eq(Arc::as_ptr(leaf), target),
            Node::External { .. } | Node::Wrapped { .. } | Node::Located { .. } => false,
        })
    }

    /// The first root or foreign error of type `E` in the chain
    #[must_use]
    pub fn find<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.chain().find_map(|node| match &*node.node {
            Node::Leaf(leaf) => (&**leaf as &dyn Any).downcast_ref::<E>(),
            Node::External { error, .. } => error.downcast_ref::<E>(),
            Node::Wrapped { .. } | Node::Located { .. } => None,
        })
    }

    /// The leaf at this node, if this node is a leaf
    #[must_use]
    pub fn leaf(&self) -> Option<&LeafError> {
        match &*self.node {
            Node::Leaf(leaf) => Some(leaf),
            Node::External { .. } | Node::Wrapped { .. } | Node::Located { .. } => None,
        }
    }

    /// Iterate the chain from this node down to the root
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost node
    #[must_use]
    pub fn root_cause(&self) -> &ChainError {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Number of nodes in the chain, this one included
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain().count()
    }

    /// A chain always holds at least one node
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// One [`Frame`] per node, outermost first
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.chain().map(ChainError::frame).collect()
    }

    fn frame(&self) -> Frame {
        Frame {
            message: self.message().into_owned(),
            location: SourceLocation::from(self.site()),
        }
    }

    fn site(&self) -> &'static Location<'static> {
        match &*self.node {
            Node::Leaf(leaf) => leaf.location(),
            Node::External { location, .. }
            | Node::Wrapped { location, .. }
            | Node::Located { location, .. } => *location,
        }
    }

    fn is_located(&self) -> bool {
        matches!(*self.node, Node::Located { .. })
    }

    /// Multi-line diagnostic: one line per node, outermost first, each with
    /// the node's note or message and the location that produced it
    ///
    /// ```text
    /// err-2 (at src/repo.rs:41:10)
    /// err-1 (at src/repo.rs:40:10)
    /// record not found (at src/core/leaf.rs:97:20)
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.chain()
            .map(|node| node.frame().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// View this node as a standard error whose `source()` walks the chain
    #[must_use]
    pub fn as_std_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.node
    }
}

impl HasMessage for ChainError {
    fn message(&self) -> Cow<'_, str> {
        match &*self.node {
            Node::Leaf(leaf) => Cow::Borrowed(leaf.message()),
            Node::External { error, .. } => Cow::Owned(error.to_string()),
            Node::Wrapped { note, .. } => Cow::Borrowed(note),
            Node::Located { cause, .. } => cause.message(),
        }
    }
}

impl HasCause for ChainError {
    fn cause(&self) -> Option<&ChainError> {
        ChainError::cause(self)
    }
}

impl HasLocation for ChainError {
    fn location(&self) -> Option<&'static Location<'static>> {
        Some(self.site())
    }
}

impl<E> From<E> for ChainError
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl From<ChainError> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(error: ChainError) -> Self {
        error.node
    }
}

impl AsRef<dyn StdError + Send + Sync> for ChainError {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.as_std_error()
    }
}

/// `{}` joins every message on one line (`outer: inner: root`); `{:#}` is
/// [`ChainError::render`].
impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f.write_str(&self.render());
        }

        let mut first = true;
        for node in self.chain().filter(|node| !node.is_located()) {
            if !first {
                write!(f, ": ")?;
            }
            write!(f, "{}", node.message())?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f.debug_struct("ChainError").field("node", &self.node).finish();
        }
        f.write_str(&self.render())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => fmt::Display::fmt(leaf, f),
            Node::External { error, .. } => fmt::Display::fmt(error, f),
            Node::Wrapped { note, .. } => f.write_str(note),
            Node::Located { cause, .. } => fmt::Display::fmt(&*cause.node, f),
        }
    }
}

impl StdError for Node {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Node::Leaf(_) => None,
            Node::External { error, .. } => error.source(),
            Node::Wrapped { cause, .. } | Node::Located { cause, .. } => Some(&*cause.node),
        }
    }
}

/// Iterator over the nodes of a chain, outermost first
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a ChainError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ChainError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::leaf::{RECORD_NOT_FOUND, UNKNOWN};

    #[test]
    fn test_wrap_keeps_cause() {
        let err = RECORD_NOT_FOUND.err().wrap("loading user");

        assert_eq!(err.message(), "loading user");
        assert_eq!(err.cause().map(|c| c.to_string()).as_deref(), Some("record not found"));
        assert!(err.cause().unwrap().cause().is_none());
    }

    #[test]
    fn test_into_cause_returns_same_leaf() {
        let err = ChainError::msg("disk on fire");
        let before: *const LeafError = err.leaf().unwrap();

        let back = err.wrap("saving").into_cause().unwrap();

        assert!(std::ptr::eq(before, back.leaf().unwrap()));
    }

    #[test]
    fn test_is_compares_identity() {
        let err = RECORD_NOT_FOUND.err().wrap("a").wrap("b");
        let lookalike = ChainError::msg("record not found").wrap("a").wrap("b");

        assert!(err.is(&RECORD_NOT_FOUND));
        assert!(!err.is(&UNKNOWN));
        assert!(!lookalike.is(&RECORD_NOT_FOUND));
    }

    #[test]
    fn test_external_error_root() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err = ChainError::from(io).wrap("reading configuration");

        assert_eq!(err.len(), 2);
        assert_eq!(
            err.find::<std::io::Error>().map(std::io::Error::kind),
            Some(std::io::ErrorKind::NotFound)
        );
        assert_eq!(err.to_string(), "reading configuration: config.toml");
    }

    #[test]
    fn test_std_error_source_walks_chain() {
        let err = UNKNOWN.err().wrap("inner").wrap("outer");
        let std_err = err.as_std_error();

        assert_eq!(std_err.to_string(), "outer");
        let inner = std_err.source().unwrap();
        assert_eq!(inner.to_string(), "inner");
        let root = inner.source().unwrap();
        assert_eq!(root.to_string(), "unknown error");
        assert!(root.source().is_none());
    }

    #[test]
    fn test_wrap_location_is_call_site() {
        let err = UNKNOWN.err().wrap("here");
        let location = err.location().unwrap();

        assert_eq!(location.file(), file!());
        assert_eq!(location.line(), line!() - 4);
    }

    #[test]
    fn test_with_location_records_raise_site() {
        let err = RECORD_NOT_FOUND.err().with_location().wrap("loading user");
        let raised = err.cause().unwrap();

        assert_eq!(err.len(), 3);
        assert_eq!(raised.message(), "record not found");
        assert_eq!(raised.location().unwrap().file(), file!());
        assert_eq!(raised.location().unwrap().line(), line!() - 6);
        assert!(err.is(&RECORD_NOT_FOUND));
        assert_eq!(err.to_string(), "loading user: record not found");
        assert_eq!(err.render().lines().count(), 3);
        assert_eq!(err.wrap("x").into_cause().unwrap().to_string(), "loading user: record not found");
    }

    #[test]
    fn test_root_cause_and_find_leaf() {
        let err = ChainError::msg("root").wrap("mid").wrap("top");

        assert_eq!(err.root_cause().message(), "root");
        assert_eq!(err.find::<LeafError>().map(LeafError::message), Some("root"));
    }
}
