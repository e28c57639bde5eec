//! The parse tree produced by a successful match.
//!
//! Trees borrow the input they were parsed from, and are shared through [Rc] between the memo
//! table and every parent that retains them. Once built a tree is never mutated: the shaping
//! wrappers build a new root node that shares the original children.

use std::{
    fmt::{Display, Formatter},
    rc::Rc,
    sync::Arc,
};

/// A user-assigned label for a tree node.
pub type Tag = Arc<str>;

/// One successful match of some parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<'i> {
    start: usize,
    matched: &'i [char],
    children: Vec<Rc<Tree<'i>>>,
    tag: Option<Tag>,
    omit: bool,
}

impl<'i> Tree<'i> {
    /// A bare span of `len` chars of `input` beginning at `start`.
    pub(crate) fn leaf(input: &'i [char], start: usize, len: usize) -> Self {
        Self::node(input, start, start + len, Vec::new())
    }

    /// An empty match at `start`.
    pub(crate) fn empty(input: &'i [char], start: usize) -> Self {
        Self::leaf(input, start, 0)
    }

    /// The span `input[start..end]` with the given children.
    pub(crate) fn node(
        input: &'i [char],
        start: usize,
        end: usize,
        children: Vec<Rc<Tree<'i>>>,
    ) -> Self {
        Tree {
            start,
            matched: &input[start..end],
            children,
            tag: None,
            omit: false,
        }
    }

    pub(crate) fn with_tag(mut self, tag: Option<Tag>) -> Self {
        self.tag = tag;
        self
    }

    /// A copy of this node (sharing its children) carrying `tag`.
    pub(crate) fn retagged(&self, tag: &Tag) -> Self {
        Tree {
            tag: Some(tag.clone()),
            ..self.clone()
        }
    }

    /// A copy of this node that parents will leave out of their children.
    pub(crate) fn omitted(&self) -> Self {
        Tree {
            omit: true,
            ..self.clone()
        }
    }

    /// A copy of this node without any substructure.
    pub(crate) fn flattened(&self) -> Self {
        Tree {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Whether an enclosing sequence, repetition or fold keeps this tree as a child.
    pub(crate) fn retained(&self) -> bool {
        !self.omit && self.tag.is_some()
    }

    /// Add `tree` to a parent's children. Retained trees are added themselves, untagged trees
    /// pass up their own children, and omitted trees add nothing.
    pub(crate) fn contribute(tree: &Rc<Tree<'i>>, children: &mut Vec<Rc<Tree<'i>>>) {
        if tree.retained() {
            children.push(tree.clone());
        } else if !tree.omit {
            children.extend(tree.children.iter().cloned());
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The position just after the match.
    pub fn end(&self) -> usize {
        self.start + self.matched.len()
    }

    /// Number of chars consumed.
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// The slice of input consumed.
    pub fn span(&self) -> &'i [char] {
        self.matched
    }

    /// The text consumed.
    pub fn matched(&self) -> String {
        self.matched.iter().collect()
    }

    pub fn children(&self) -> &[Rc<Tree<'i>>] {
        &self.children
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Renders as an s-expression:
/// - `"x"` for an untagged leaf
/// - `(tag "x")` for a tagged leaf
/// - `(tag child child ...)` or `(child child ...)` when there are children
impl Display for Tree<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tag, self.children.is_empty()) {
            (None, true) => write!(f, "{:?}", self.matched()),
            (Some(tag), true) => write!(f, "({tag} {:?})", self.matched()),
            (tag, false) => {
                write!(f, "(")?;
                if let Some(tag) = tag {
                    write!(f, "{tag} ")?;
                }
                let mut children = self.children.iter();
                if let Some(first) = children.next() {
                    write!(f, "{first}")?;
                }
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
