//! Sequencing, ordered choice, optional and repetition.
//!
//! Each has a type, a construction function returning a [ParserRef], and a [Parser]
//! implementation evaluated under the recursion guard.

use crate::{
    context::{Context, Memo, ParserId},
    error::GrammarError,
    tree::Tree,
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    rc::Rc,
    sync::Arc,
};

/// Apply `parsers` left to right from `start`, returning the end position and the collected
/// children, or `None` as soon as one fails.
#[allow(clippy::type_complexity)]
fn run_sequence<'i>(
    parsers: &[ParserRef],
    input: &'i [char],
    start: usize,
    ctx: &mut Context<'i>,
) -> Result<Option<(usize, Vec<Rc<Tree<'i>>>)>, GrammarError> {
    let mut position = start;
    let mut children = Vec::new();
    for parser in parsers {
        let Some(tree) = parser.parse(input, position, ctx)? else {
            return Ok(None);
        };
        position = tree.end();
        if ctx.with_children() {
            Tree::contribute(&tree, &mut children);
        }
    }
    Ok(Some((position, children)))
}

fn repr_all(parsers: &[ParserRef], sep: &str, f: &mut Formatter<'_>) -> Result<(), Error> {
    write!(f, "(")?;
    for (i, parser) in parsers.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{}", Repr(parser.as_ref()))?;
    }
    write!(f, ")")
}

/// Matches each parser in turn, failing as a whole if any fails.
pub struct Seq {
    id: ParserId,
    parsers: Vec<ParserRef>,
}

impl Seq {
    pub fn new(parsers: impl IntoIterator<Item = ParserRef>) -> Self {
        Seq {
            id: ParserId::fresh(),
            parsers: parsers.into_iter().collect(),
        }
    }
}

/// A sequence of `parsers`. The result's children are those of the parts, in order.
/// An empty sequence matches the empty string.
pub fn seq(parsers: impl IntoIterator<Item = ParserRef>) -> ParserRef {
    Arc::new(Seq::new(parsers))
}

impl Parser for Seq {
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
            Ok(run_sequence(&self.parsers, input, start, ctx)?
                .map(|(end, children)| Rc::new(Tree::node(input, start, end, children))))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        repr_all(&self.parsers, " ", f)
    }
}

/// Ordered choice: the first alternative to match wins, regardless of how much any later one
/// could have matched.
pub struct FirstOf {
    id: ParserId,
    alternatives: Vec<ParserRef>,
}

impl FirstOf {
    pub fn new(alternatives: impl IntoIterator<Item = ParserRef>) -> Self {
        FirstOf {
            id: ParserId::fresh(),
            alternatives: alternatives.into_iter().collect(),
        }
    }
}

pub fn first_of(alternatives: impl IntoIterator<Item = ParserRef>) -> ParserRef {
    Arc::new(FirstOf::new(alternatives))
}

impl Parser for FirstOf {
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
            for alternative in &self.alternatives {
                if let Some(tree) = alternative.parse(input, start, ctx)? {
                    return Ok(Some(tree));
                }
            }
            Ok(None)
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        repr_all(&self.alternatives, " | ", f)
    }
}

/// Matches its parser if possible, otherwise the empty string. Never fails.
pub struct Opt {
    id: ParserId,
    parser: ParserRef,
}

pub fn opt(parser: ParserRef) -> ParserRef {
    Arc::new(Opt {
        id: ParserId::fresh(),
        parser,
    })
}

impl Parser for Opt {
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
            let tree = self.parser.parse(input, start, ctx)?;
            Ok(Some(
                tree.unwrap_or_else(|| Rc::new(Tree::empty(input, start))),
            ))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}?", Repr(self.parser.as_ref()))
    }
}

/// Repeatedly matches a sequence of parsers.
///
/// Iteration stops at the first iteration that fails or consumes nothing, so a body that can
/// match the empty string still terminates. An empty iteration does not count towards `min`.
pub struct Repeat {
    id: ParserId,
    body: Vec<ParserRef>,
    min: usize,
}

impl Repeat {
    pub fn new(body: impl IntoIterator<Item = ParserRef>, min: usize) -> Self {
        Repeat {
            id: ParserId::fresh(),
            body: body.into_iter().collect(),
            min,
        }
    }
}

/// The sequence `body` zero or more times.
pub fn zero_or_more(body: impl IntoIterator<Item = ParserRef>) -> ParserRef {
    Arc::new(Repeat::new(body, 0))
}

/// The sequence `body` one or more times.
pub fn one_or_more(body: impl IntoIterator<Item = ParserRef>) -> ParserRef {
    Arc::new(Repeat::new(body, 1))
}

impl Parser for Repeat {
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
            let mut position = start;
            let mut children = Vec::new();
            let mut count = 0;
            while let Some((end, found)) = run_sequence(&self.body, input, position, ctx)? {
                if end == position {
                    break;
                }
                count += 1;
                position = end;
                children.extend(found);
            }
            if count < self.min {
                return Ok(None);
            }
            Ok(Some(Rc::new(Tree::node(input, start, position, children))))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let suffix = if self.min == 0 { "*" } else { "+" };
        match self.body.as_slice() {
            [single] => write!(f, "{}{suffix}", Repr(single.as_ref())),
            body => {
                repr_all(body, " ", f)?;
                write!(f, "{suffix}")
            }
        }
    }
}
