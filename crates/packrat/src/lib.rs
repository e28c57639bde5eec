//! A memoizing (packrat) parser combinator library.
//!
//! Grammars are assembled from [primitive matchers](matchers) and combinators, all sharing the
//! [Parser] capability. Every parser instance has a [ParserId], and a [Context] caches each
//! parser's result at each input position, so any parser is evaluated at most once per position
//! in a parse. A recursion guard in the [Context] turns unproductive left recursion into a
//! failure (or a [GrammarError]) instead of an infinite loop.
//!
//! ```
//! use packrat::{chars, digits, exactly, first_of, left, parse, seq, ParserExt};
//!
//! let num = digits().tagged("num");
//! let op = first_of([exactly("+"), exactly("-")]).tagged("op");
//! let sum = left(num.clone(), seq([op, num])).tagged("sum");
//!
//! let input = chars("1+2-3");
//! let tree = parse(sum.as_ref(), &input).unwrap().unwrap();
//! assert_eq!(
//!     tree.to_string(),
//!     r#"(sum (sum (num "1") (op "+") (num "2")) (op "-") (num "3"))"#
//! );
//! ```
//!
//! Only tagged results appear in the tree. An untagged result is transparent: its own retained
//! children are passed up to its parent. [omit](ParserExt::omit) hides a result entirely, and
//! [token](ParserExt::token) keeps the span but drops everything beneath it.
#![allow(internal_features)]
#![cfg_attr(feature = "nightly", feature(rustc_attrs))]
#![warn(clippy::style)]
#![warn(clippy::perf)]
#![warn(clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::{
    fmt::{Display, Error, Formatter},
    rc::Rc,
    sync::Arc,
};

pub mod context;
pub mod derived;
pub mod error;
pub mod indirect;
pub mod left;
pub mod lookahead;
pub mod macros;
pub mod matchers;
pub mod shaping;
pub mod structural;
pub mod tree;

pub use context::{CacheStats, Context, ContextConfig, LeftRecursionPolicy, ParserId};
pub use derived::{eoi, keyword, non_empty, separated, NonEmpty};
pub use error::GrammarError;
pub use indirect::{indirect, Indirect};
pub use left::{left, LeftAssoc};
pub use lookahead::{looking_at, not, LookingAt, Not};
pub use matchers::{
    any, digit, digits, exactly, ignore_case, letter, letters, matcher, one_of, space,
    whitespace, zero_or_more_of, Matcher,
};
pub use shaping::{Omit, Tagged, Token};
pub use structural::{first_of, one_or_more, opt, seq, zero_or_more, FirstOf, Opt, Repeat, Seq};
pub use tree::{Tag, Tree};

/// The outcome of one parser invocation.
/// - `Ok(Some(tree))` the parser matched `tree.span()`
/// - `Ok(None)` the parser did not match, an ordinary outcome
/// - `Err(_)` the grammar itself is broken, and the parse is aborted
pub type ParseResult<'i> = Result<Option<Rc<Tree<'i>>>, GrammarError>;

/// A shared, type-erased parser, the unit grammars are composed from.
pub type ParserRef = Arc<dyn Parser>;

/// The capability shared by every matcher and combinator.
///
/// Parsers are immutable once built and hold no per-parse state, all of which lives in the
/// [Context], so one grammar can serve any number of parses on any number of threads.
#[cfg_attr(
    feature = "nightly",
    rustc_on_unimplemented(
        message = "`{Self}` is not a `Parser` so cannot be composed into a grammar",
        label = "Not `Parser`",
    )
)]
pub trait Parser: Send + Sync {
    /// The identity this parser caches under. `None` only for an unbound [Indirect].
    fn id(&self) -> Option<ParserId>;

    /// Attempt to match a prefix of `input[start..]`.
    fn parse<'i>(&self, input: &'i [char], start: usize, ctx: &mut Context<'i>)
        -> ParseResult<'i>;

    /// Produces a representation of the parser for debugging.
    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error>;

    /// A new parser matching the same language whose results carry `tag`, for parsers that can
    /// tag their own output rather than being wrapped in [Tagged].
    fn retag(&self, _tag: &Tag) -> Option<ParserRef> {
        None
    }
}

/// A simple wrapper to allow the [Parser::repr] function to implement [Display]
pub struct Repr<T>(pub T);

impl<P: Parser + ?Sized> Display for Repr<&P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.repr(f)
    }
}

/// Builder methods for composing [ParserRef]s.
pub trait ParserExt {
    /// Stamp `tag` on every result, so parents retain it as a child.
    fn tagged(&self, tag: &str) -> ParserRef;
    /// Consume the match, but never appear in a parent's children.
    fn omit(&self) -> ParserRef;
    /// Present the match as a leaf, without any substructure.
    fn token(&self) -> ParserRef;
    fn opt(&self) -> ParserRef;
    fn star(&self) -> ParserRef;
    fn plus(&self) -> ParserRef;
    fn not(&self) -> ParserRef;
    fn looking_at(&self) -> ParserRef;
}

impl ParserExt for ParserRef {
    fn tagged(&self, tag: &str) -> ParserRef {
        let tag = Tag::from(tag);
        self.retag(&tag)
            .unwrap_or_else(|| Arc::new(Tagged::new(self.clone(), tag)))
    }

    fn omit(&self) -> ParserRef {
        Arc::new(Omit::new(self.clone()))
    }

    fn token(&self) -> ParserRef {
        Arc::new(Token::new(self.clone()))
    }

    fn opt(&self) -> ParserRef {
        opt(self.clone())
    }

    fn star(&self) -> ParserRef {
        zero_or_more([self.clone()])
    }

    fn plus(&self) -> ParserRef {
        one_or_more([self.clone()])
    }

    fn not(&self) -> ParserRef {
        not(self.clone())
    }

    fn looking_at(&self) -> ParserRef {
        looking_at(self.clone())
    }
}

/// Split text into the char sequence parsers operate on.
pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Parse `input` from the start with `root`, using a fresh [Context].
pub fn parse<'i>(root: &dyn Parser, input: &'i [char]) -> ParseResult<'i> {
    parse_with(root, input, ContextConfig::default())
}

/// As [parse], with a configured [Context].
pub fn parse_with<'i>(
    root: &dyn Parser,
    input: &'i [char],
    config: ContextConfig,
) -> ParseResult<'i> {
    let mut ctx = Context::with_config(config);
    tracing::trace!(parser = %Repr(root), len = input.len(), "parsing");
    let result = root.parse(input, 0, &mut ctx);
    let stats = ctx.stats();
    tracing::trace!(
        hits = stats.hits,
        evaluations = stats.evaluations,
        refused = stats.refused,
        matched = ?result.as_ref().map(|tree| tree.as_ref().map(|t| t.len())),
        "parsed"
    );
    result
}
