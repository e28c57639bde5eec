//! Per-parse state: the memo table, the recursion guard and configuration.
//!
//! A [Context] is created for one top-level parse and threaded by `&mut` through every parser
//! call. It must not be reused for a different input, and is never shared between parses.

use crate::{error::GrammarError, tree::Tree, ParseResult};
use rustc_hash::FxHashMap;
use std::{
    fmt::{Display, Formatter},
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

/// The identity of a parser instance, minted once when it is constructed.
///
/// Identity is not structural: two separately built `exactly("a")` parsers have different ids
/// and separate cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParserId(u64);

impl ParserId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ParserId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ParserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to do when a parser re-enters itself at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftRecursionPolicy {
    /// The re-entering branch fails, so enclosing alternatives are still tried. Each occurrence
    /// is recorded in [Context::left_recursions].
    #[default]
    Fail,
    /// Abort the whole parse with [GrammarError::LeftRecursion].
    Abort,
}

#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub left_recursion: LeftRecursionPolicy,
    /// Number of memo entries to allocate up front.
    pub cache_capacity: usize,
    /// When false only primitive matchers are cached, every combinator is re-evaluated.
    pub memoize: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            left_recursion: LeftRecursionPolicy::Fail,
            cache_capacity: 0,
            memoize: true,
        }
    }
}

impl ContextConfig {
    pub fn left_recursion(mut self, policy: LeftRecursionPolicy) -> Self {
        self.left_recursion = policy;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

/// Counters describing how a parse used the memo table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from the memo table.
    pub hits: usize,
    /// Calls that ran the parser.
    pub evaluations: usize,
    /// Calls refused by the recursion guard.
    pub refused: usize,
}

/// How a call takes part in memoization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Memo {
    /// A pure matcher: never recurses, result is always cacheable.
    Leaf,
    /// A combinator: evaluated under the recursion guard.
    Guarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    id: ParserId,
    start: usize,
    with_children: bool,
}

pub struct Context<'i> {
    cache: FxHashMap<CacheKey, Option<Rc<Tree<'i>>>>,
    active: Vec<(ParserId, usize)>,
    with_children: bool,

    /// Index into `active` of the outermost frame whose re-entry was refused. Results computed
    /// inside that frame depend on the refusal, so are not cached until it returns.
    tainted: Option<usize>,
    recursions: Vec<(ParserId, usize)>,
    stats: CacheStats,
    config: ContextConfig,
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'i> Context<'i> {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        Context {
            cache: FxHashMap::with_capacity_and_hasher(config.cache_capacity, Default::default()),
            active: Vec::new(),
            with_children: true,
            tainted: None,
            recursions: Vec::new(),
            stats: CacheStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether combinators should currently collect children.
    pub fn with_children(&self) -> bool {
        self.with_children
    }

    /// Every `(parser, position)` at which left recursion was detected and failed.
    pub fn left_recursions(&self) -> &[(ParserId, usize)] {
        &self.recursions
    }

    /// Whether `id` is currently being evaluated at `start`.
    pub fn is_active(&self, id: ParserId, start: usize) -> bool {
        self.active.contains(&(id, start))
    }

    /// Run `eval` with children collection disabled.
    pub(crate) fn without_children<F>(&mut self, eval: F) -> ParseResult<'i>
    where
        F: FnOnce(&mut Self) -> ParseResult<'i>,
    {
        let previous = std::mem::replace(&mut self.with_children, false);
        let result = eval(self);
        self.with_children = previous;
        result
    }

    /// The entry point for every parser call: answer from the memo table, or run `eval` (under
    /// the recursion guard for [Memo::Guarded]) and record its result.
    ///
    /// A `start` past the end of `input` is an ordinary failure. Errors are propagated without
    /// being cached.
    pub(crate) fn memoize<F>(
        &mut self,
        id: ParserId,
        input: &'i [char],
        start: usize,
        memo: Memo,
        eval: F,
    ) -> ParseResult<'i>
    where
        F: FnOnce(&mut Self) -> ParseResult<'i>,
    {
        if start > input.len() {
            return Ok(None);
        }
        // a matcher's result is the same with or without children
        let key = CacheKey {
            id,
            start,
            with_children: self.with_children || memo == Memo::Leaf,
        };
        let use_cache = memo == Memo::Leaf || self.config.memoize;
        if use_cache {
            if let Some(hit) = self.cache.get(&key) {
                self.stats.hits += 1;
                return Ok(hit.clone());
            }
        }

        let result = match memo {
            Memo::Leaf => eval(self)?,
            Memo::Guarded => {
                if let Some(frame) = self.active.iter().rposition(|&a| a == (id, start)) {
                    return self.refuse(id, start, frame);
                }
                self.active.push((id, start));
                let result = eval(self);
                self.active.pop();
                if self.tainted == Some(self.active.len()) {
                    self.tainted = None;
                }
                result?
            }
        };
        self.stats.evaluations += 1;

        let clean = memo == Memo::Leaf
            || self
                .tainted
                .map_or(true, |frame| frame >= self.active.len());
        if use_cache && clean {
            self.cache.insert(key, result.clone());
        }
        Ok(result)
    }

    fn refuse(&mut self, id: ParserId, start: usize, frame: usize) -> ParseResult<'i> {
        self.stats.refused += 1;
        match self.config.left_recursion {
            LeftRecursionPolicy::Abort => Err(GrammarError::LeftRecursion {
                parser: id,
                position: start,
            }),
            LeftRecursionPolicy::Fail => {
                tracing::warn!(parser = %id, position = start, "left recursion, failing branch");
                self.tainted = Some(self.tainted.map_or(frame, |t| t.min(frame)));
                if !self.recursions.contains(&(id, start)) {
                    self.recursions.push((id, start));
                }
                Ok(None)
            }
        }
    }
}
