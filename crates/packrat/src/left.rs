//! Left-associative folding, for operator chains that a PEG cannot express with left recursion.

use crate::{
    context::{Context, Memo, ParserId},
    tree::{Tag, Tree},
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    rc::Rc,
    sync::Arc,
};

/// Matches `base` once and then `continuation` as many times as possible, nesting each match
/// to the left: `a+b+c` folds as `((a + b) + c)`.
pub struct LeftAssoc {
    id: ParserId,
    base: ParserRef,
    continuation: ParserRef,
    tag: Option<Tag>,
}

/// `base continuation*`, folded to the left.
///
/// Each fold node spans from `start` to the end of the latest continuation, and has the
/// previous node followed by the continuation's own children as its children, so a tag on the
/// continuation itself never appears in the fold. When tagged, every fold node carries the
/// tag. If no continuation matches, the result is the base's own tree.
pub fn left(base: ParserRef, continuation: ParserRef) -> ParserRef {
    Arc::new(LeftAssoc {
        id: ParserId::fresh(),
        base,
        continuation,
        tag: None,
    })
}

impl Parser for LeftAssoc {
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
            let Some(mut acc) = self.base.parse(input, start, ctx)? else {
                return Ok(None);
            };
            loop {
                let position = acc.end();
                let Some(next) = self.continuation.parse(input, position, ctx)? else {
                    break;
                };
                if next.end() == position {
                    break;
                }
                let mut children = Vec::new();
                if ctx.with_children() {
                    children.push(acc);
                    children.extend(next.children().iter().cloned());
                }
                acc = Rc::new(
                    Tree::node(input, start, next.end(), children).with_tag(self.tag.clone()),
                );
            }
            Ok(Some(acc))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "left({}, {})",
            Repr(self.base.as_ref()),
            Repr(self.continuation.as_ref())
        )?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        Ok(())
    }

    fn retag(&self, tag: &Tag) -> Option<ParserRef> {
        Some(Arc::new(LeftAssoc {
            id: ParserId::fresh(),
            base: self.base.clone(),
            continuation: self.continuation.clone(),
            tag: Some(tag.clone()),
        }))
    }
}
