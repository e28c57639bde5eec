//! Forward references, for grammars that refer to themselves.
//!
//! An [Indirect] is created first, used inside the grammar wherever the recursive rule is
//! needed, and bound to the finished rule afterwards:
//! ```
//! use packrat::{chars, digits, exactly, first_of, indirect, parse, seq, ParserExt};
//!
//! let nested = indirect("nested");
//! let rule = first_of([
//!     seq([exactly("("), nested.parser(), exactly(")")]),
//!     digits().tagged("n"),
//! ]);
//! nested.bind(&rule).unwrap();
//!
//! let input = chars("((7))");
//! assert_eq!(parse(rule.as_ref(), &input).unwrap().unwrap().to_string(), r#"((n "7"))"#);
//! ```
//!
//! The binding is weak, so the grammar does not own itself. The bound rule must be kept alive
//! by whoever holds the grammar.

use crate::{
    context::{Context, ParserId},
    error::GrammarError,
    ParseResult, Parser, ParserRef, Repr,
};
use std::{
    fmt::{Error, Formatter},
    sync::{Arc, OnceLock, Weak},
};

struct Slot {
    name: String,
    target: OnceLock<Weak<dyn Parser>>,
}

/// A handle to a forward reference. Clones share the same binding.
#[derive(Clone)]
pub struct Indirect {
    slot: Arc<Slot>,
}

impl Indirect {
    pub fn new(name: &str) -> Self {
        Indirect {
            slot: Arc::new(Slot {
                name: name.to_owned(),
                target: OnceLock::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    /// A parser that forwards to whatever this is bound to.
    pub fn parser(&self) -> ParserRef {
        Arc::new(self.clone())
    }

    /// Bind to `target`. Only the first binding succeeds.
    pub fn bind(&self, target: &ParserRef) -> Result<(), GrammarError> {
        self.slot
            .target
            .set(Arc::downgrade(target))
            .map_err(|_| GrammarError::AlreadyBound {
                name: self.slot.name.clone(),
            })?;
        tracing::debug!(name = %self.slot.name, target = %Repr(target.as_ref()), "bound indirection");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.slot.target.get().is_some()
    }

    fn target(&self) -> Result<ParserRef, GrammarError> {
        let weak = self
            .slot
            .target
            .get()
            .ok_or_else(|| GrammarError::UnboundIndirection {
                name: self.slot.name.clone(),
            })?;
        weak.upgrade().ok_or_else(|| GrammarError::DroppedIndirection {
            name: self.slot.name.clone(),
        })
    }
}

/// A new unbound forward reference called `name`.
pub fn indirect(name: &str) -> Indirect {
    Indirect::new(name)
}

impl Parser for Indirect {
    fn id(&self) -> Option<ParserId> {
        self.target().ok().and_then(|target| target.id())
    }

    /// Forwards to the bound parser, which does its own memoization.
    fn parse<'i>(
        &self,
        input: &'i [char],
        start: usize,
        ctx: &mut Context<'i>,
    ) -> ParseResult<'i> {
        self.target()?.parse(input, start, ctx)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.slot.name)
    }
}
