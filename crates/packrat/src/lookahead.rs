//! Zero-width assertions.
//!
//! Both run their inner parser without collecting children, and on success produce an empty,
//! omitted tree at the start position, so they never consume input or contribute to a parent.

use crate::{
    context::{Context, Memo, ParserId},
    tree::Tree,
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    rc::Rc,
    sync::Arc,
};

/// Succeeds where its parser would match, without consuming anything.
pub struct LookingAt {
    id: ParserId,
    parser: ParserRef,
}

pub fn looking_at(parser: ParserRef) -> ParserRef {
    Arc::new(LookingAt {
        id: ParserId::fresh(),
        parser,
    })
}

impl Parser for LookingAt {
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
            let found = ctx.without_children(|ctx| self.parser.parse(input, start, ctx))?;
            Ok(found.map(|_| Rc::new(Tree::empty(input, start).omitted())))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "&{}", Repr(self.parser.as_ref()))
    }
}

/// Succeeds exactly where its parser fails, without consuming anything.
pub struct Not {
    id: ParserId,
    parser: ParserRef,
}

pub fn not(parser: ParserRef) -> ParserRef {
    Arc::new(Not {
        id: ParserId::fresh(),
        parser,
    })
}

impl Parser for Not {
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
            let found = ctx.without_children(|ctx| self.parser.parse(input, start, ctx))?;
            Ok(match found {
                Some(_) => None,
                None => Some(Rc::new(Tree::empty(input, start).omitted())),
            })
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "!{}", Repr(self.parser.as_ref()))
    }
}
