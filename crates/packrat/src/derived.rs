//! Parsers derived from the core matchers and combinators.

use crate::{
    context::{Context, Memo, ParserId},
    lookahead::not,
    matchers::{any, digit, exactly, letter},
    shaping::Token,
    structural::{first_of, seq, zero_or_more},
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    sync::Arc,
};

/// Matches only at the end of the input.
pub fn eoi() -> ParserRef {
    not(any())
}

/// `word` as a whole word: not followed by a letter or digit, so `keyword("if")` does not match
/// the start of `iffy`. The result is a leaf.
pub fn keyword(word: &str) -> ParserRef {
    Arc::new(Token::new(seq([
        exactly(word),
        not(first_of([letter(), digit()])),
    ])))
}

/// One or more `item`s separated by `sep`, with no trailing separator consumed.
/// ```text
/// I S I S I ... I
/// ```
pub fn separated(item: ParserRef, sep: ParserRef) -> ParserRef {
    seq([item.clone(), zero_or_more([sep, item])])
}

/// Fails where its parser matches the empty string.
pub struct NonEmpty {
    id: ParserId,
    parser: ParserRef,
}

pub fn non_empty(parser: ParserRef) -> ParserRef {
    Arc::new(NonEmpty {
        id: ParserId::fresh(),
        parser,
    })
}

impl Parser for NonEmpty {
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
                .parser
                .parse(input, start, ctx)?
                .filter(|tree| !tree.is_empty()))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}!", Repr(self.parser.as_ref()))
    }
}
