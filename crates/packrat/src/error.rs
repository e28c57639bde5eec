//! Errors that abort a parse.
//!
//! An ordinary failure to match is `Ok(None)`, never a [GrammarError]. These are reserved for
//! mistakes in how a grammar was assembled, which no input can fix.

use crate::context::ParserId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("indirection `{name}` was invoked before being bound to a parser")]
    UnboundIndirection { name: String },

    #[error("indirection `{name}` was bound to a parser that has since been dropped")]
    DroppedIndirection { name: String },

    #[error("indirection `{name}` is already bound")]
    AlreadyBound { name: String },

    #[error("left recursion: parser {parser} re-entered at position {position} without consuming input")]
    LeftRecursion { parser: ParserId, position: usize },
}
