//! Helper macros

/// Sequence of parsers, each cloned so named rules can be reused without `.clone()`.
/// ```
/// use packrat::{chars, digits, exactly, parse, ParserExt};
///
/// let num = digits().tagged("n");
/// let pair = packrat::seq!(num, exactly(","), num);
/// // is equivalent to
/// let same = packrat::seq([num.clone(), exactly(","), num.clone()]);
///
/// let input = chars("1,2");
/// assert_eq!(
///     parse(pair.as_ref(), &input).unwrap(),
///     parse(same.as_ref(), &input).unwrap()
/// );
/// ```
#[macro_export]
macro_rules! seq {
    ($($p:expr),* $(,)?) => {
        $crate::structural::seq(::std::vec![$($crate::ParserRef::clone(&$p)),*])
    };
}

pub use seq;

/// Ordered choice between parsers, cloned as in [seq!].
/// ```ignore
/// first_of([a.clone(), b.clone(), c.clone()])
/// // is equivalent to
/// first_of!(a, b, c)
/// ```
#[macro_export]
macro_rules! first_of {
    ($($p:expr),* $(,)?) => {
        $crate::structural::first_of(::std::vec![$($crate::ParserRef::clone(&$p)),*])
    };
}

pub use first_of;
