//! Wrappers that change how a result appears in the tree, without changing what it matches.

use crate::{
    context::{Context, Memo, ParserId},
    tree::Tag,
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    rc::Rc,
    sync::Arc,
};

/// Labels every result of its parser, making it visible to parents.
pub struct Tagged {
    id: ParserId,
    inner: ParserRef,
    tag: Tag,
}

impl Tagged {
    pub fn new(inner: ParserRef, tag: Tag) -> Self {
        Tagged {
            id: ParserId::fresh(),
            inner,
            tag,
        }
    }
}

impl Parser for Tagged {
    fn id(&self) -> Option<ParserId> {
        Some(self.id)
    }

    fn parse<'i>(
        &self,
        input: &'i [char],
        start: usize,
        ctx: &mut Context<'i>,
    ) -> ParseResult<'i> {
        ctx.memoize(self.id, input, start, Memo::Guarded, |ctx| {
            Ok(self
                .inner
                .parse(input, start, ctx)?
                .map(|tree| Rc::new(tree.retagged(&self.tag))))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}:{}", Repr(self.inner.as_ref()), self.tag)
    }

    fn retag(&self, tag: &Tag) -> Option<ParserRef> {
        Some(Arc::new(Tagged::new(self.inner.clone(), tag.clone())))
    }
}

/// Consumes what its parser matches, but is never kept as a child.
pub struct Omit {
    id: ParserId,
    inner: ParserRef,
}

impl Omit {
    pub fn new(inner: ParserRef) -> Self {
        Omit {
            id: ParserId::fresh(),
            inner,
        }
    }
}

impl Parser for Omit {
    fn id(&self) -> Option<ParserId> {
        Some(self.id)
    }

    fn parse<'i>(
        &self,
        input: &'i [char],
        start: usize,
        ctx: &mut Context<'i>,
    ) -> ParseResult<'i> {
        ctx.memoize(self.id, input, start, Memo::Guarded, |ctx| {
            Ok(ctx
                .without_children(|ctx| self.inner.parse(input, start, ctx))?
                .map(|tree| Rc::new(tree.omitted())))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "-{}", Repr(self.inner.as_ref()))
    }
}

/// Presents its parser's match as a single leaf.
pub struct Token {
    id: ParserId,
    inner: ParserRef,
}

impl Token {
    pub fn new(inner: ParserRef) -> Self {
        Token {
            id: ParserId::fresh(),
            inner,
        }
    }
}

impl Parser for Token {
    fn id(&self) -> Option<ParserId> {
        Some(self.id)
    }

    fn parse<'i>(
        &self,
        input: &'i [char],
        start: usize,
        ctx: &mut Context<'i>,
    ) -> ParseResult<'i> {
        ctx.memoize(self.id, input, start, Memo::Guarded, |ctx| {
            Ok(ctx
                .without_children(|ctx| self.inner.parse(input, start, ctx))?
                .map(|tree| Rc::new(tree.flattened())))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}>", Repr(self.inner.as_ref()))
    }
}
