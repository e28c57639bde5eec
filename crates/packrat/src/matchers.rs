//! Primitive matchers: leaf parsers that inspect the input directly.
//!
//! Each is a pure function from the remaining input to a match length, wrapped in a [Matcher]
//! that gives it an identity and caches its result like any other parser.

use crate::{
    context::{Context, Memo, ParserId},
    tree::{Tag, Tree},
    ParseResult, Parser, ParserRef,
};
use std::{
    collections::BTreeSet,
    fmt::{Debug, Error, Formatter},
    rc::Rc,
    sync::Arc,
};

type MatchFn = dyn Fn(&[char]) -> Option<usize> + Send + Sync;

/// A parser driven by a matching function, which returns the length of the prefix of its input
/// that it matches.
#[derive(Clone)]
pub struct Matcher {
    id: ParserId,
    name: Arc<str>,
    tag: Option<Tag>,
    func: Arc<MatchFn>,
}

impl Debug for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl Matcher {
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[char]) -> Option<usize> + Send + Sync + 'static,
    {
        Matcher {
            id: ParserId::fresh(),
            name: name.into(),
            tag: None,
            func: Arc::new(func),
        }
    }

    /// Zero or more repetitions of this matcher, as a single matcher. Stops at the first failure
    /// or empty match.
    pub fn star(&self) -> Matcher {
        let func = self.func.clone();
        Matcher::new(format!("{}*", self.name), move |input: &[char]| {
            let mut len = 0;
            while let Some(step) = func(&input[len..]) {
                if step == 0 || len + step > input.len() {
                    break;
                }
                len += step;
            }
            Some(len)
        })
    }

    pub fn into_ref(self) -> ParserRef {
        Arc::new(self)
    }
}

impl Parser for Matcher {
    fn id(&self) -> Option<ParserId> {
        Some(self.id)
    }

    fn parse<'i>(
        &self,
        input: &'i [char],
        start: usize,
        ctx: &mut Context<'i>,
    ) -> ParseResult<'i> {
        ctx.memoize(self.id, input, start, Memo::Leaf, |_| {
            let Some(rest) = input.get(start..) else {
                return Ok(None);
            };
            Ok((self.func)(rest)
                .filter(|&len| len <= rest.len())
                .map(|len| Rc::new(Tree::leaf(input, start, len).with_tag(self.tag.clone()))))
        })
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match &self.tag {
            Some(tag) => write!(f, "{}:{tag}", self.name),
            None => write!(f, "{}", self.name),
        }
    }

    fn retag(&self, tag: &Tag) -> Option<ParserRef> {
        Some(Arc::new(Matcher {
            id: ParserId::fresh(),
            tag: Some(tag.clone()),
            ..self.clone()
        }))
    }
}

/// Length of the longest prefix whose chars all satisfy `pred`.
fn run_of(input: &[char], pred: impl Fn(char) -> bool) -> usize {
    input.iter().take_while(|&&c| pred(c)).count()
}

/// One char satisfying `pred`.
fn single(name: &str, pred: fn(char) -> bool) -> ParserRef {
    Matcher::new(name, move |input: &[char]| {
        input.first().filter(|&&c| pred(c)).map(|_| 1)
    })
    .into_ref()
}

/// A maximal, non-empty run of chars satisfying `pred`.
fn nonempty_run(name: &str, pred: fn(char) -> bool) -> ParserRef {
    Matcher::new(name, move |input: &[char]| {
        Some(run_of(input, pred)).filter(|&len| len > 0)
    })
    .into_ref()
}

/// A user-defined primitive.
pub fn matcher<F>(name: &str, func: F) -> ParserRef
where
    F: Fn(&[char]) -> Option<usize> + Send + Sync + 'static,
{
    Matcher::new(name, func).into_ref()
}

/// Any single char, fails only at the end of input.
pub fn any() -> ParserRef {
    Matcher::new("any", |input: &[char]| (!input.is_empty()).then_some(1)).into_ref()
}

pub fn letter() -> ParserRef {
    single("letter", char::is_alphabetic)
}

pub fn letters() -> ParserRef {
    nonempty_run("letter+", char::is_alphabetic)
}

pub fn digit() -> ParserRef {
    single("digit", char::is_numeric)
}

pub fn digits() -> ParserRef {
    nonempty_run("digit+", char::is_numeric)
}

/// A single whitespace char.
pub fn space() -> ParserRef {
    single("space", char::is_whitespace)
}

/// One or more whitespace chars.
pub fn whitespace() -> ParserRef {
    nonempty_run("space+", char::is_whitespace)
}

/// Exactly `text`, case sensitive.
pub fn exactly(text: &str) -> ParserRef {
    let target: Vec<char> = text.chars().collect();
    Matcher::new(format!("{text:?}"), move |input: &[char]| {
        input.starts_with(&target).then_some(target.len())
    })
    .into_ref()
}

/// `text` compared by lowercase forms.
pub fn ignore_case(text: &str) -> ParserRef {
    let target: Vec<char> = text.chars().collect();
    Matcher::new(format!("i{text:?}"), move |input: &[char]| {
        let matches = input.len() >= target.len()
            && input
                .iter()
                .zip(&target)
                .all(|(c, t)| c.to_lowercase().eq(t.to_lowercase()));
        matches.then_some(target.len())
    })
    .into_ref()
}

/// Any single char from `set`.
pub fn one_of(set: &str) -> ParserRef {
    let members: BTreeSet<char> = set.chars().collect();
    Matcher::new(format!("[{set}]"), move |input: &[char]| {
        input.first().filter(|&&c| members.contains(&c)).map(|_| 1)
    })
    .into_ref()
}

/// The longest run of chars from `set`, possibly empty.
pub fn zero_or_more_of(set: &str) -> ParserRef {
    let members: BTreeSet<char> = set.chars().collect();
    Matcher::new(format!("[{set}]*"), move |input: &[char]| {
        Some(run_of(input, |c| members.contains(&c)))
    })
    .into_ref()
}
