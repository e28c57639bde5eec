//! Benchmarks for the packrat engine, compared with others.
//! - each case is in [`cases`], and generates an expression whose text all parsers accept.
//! - every parser must produce the same [`cases::Expr`], checked before timing.
//!
//! | Method      | Reason for inclusion                                            |
//! |-------------|-----------------------------------------------------------------|
//! | Packrat     | is this library                                                 |
//! | Hand-Rolled | a recursive descent parser, the baseline for a fixed grammar    |
//! | Chumsky     | a widely used combinator library without memoization            |
//!
use std::fmt::Debug;

mod cases;
use cases::{DeepNesting, Expr, LongChain};
mod parsers;
use parsers::{chumsky_text::Chumsky, handrolled::HandRolled, packrat::Packrat};

trait Parseable: Eq + PartialEq + Debug + From<Expr> {
    type Param;
    fn generate_case(param: Self::Param) -> Self;
    fn generate_text(&self) -> String;
}

trait Parse<O> {
    fn parse(input: &str) -> O;
}

macro_rules! impl_cases {
    ($($case:ident as $name:ident for [ $($arg:tt)* ] ),* ) => {
        $(
            #[divan::bench(
                name = stringify!($name),
                types = [Packrat, HandRolled, Chumsky],
                args = [ $($arg)* ]
            )]
            fn $name<P: Parse<$case>>(bencher: divan::Bencher, param: <$case as Parseable>::Param) {
                let o = $case::generate_case(param);
                let text = o.generate_text();
                assert_eq!(P::parse(&text), o);
                bencher.bench_local(|| {
                    P::parse(&text)
                })
            }
        )*
    }
}

impl_cases! {
    LongChain as long_chain for [1, 100, 1000],
    DeepNesting as deep_nesting for [1, 16, 128]
}

fn main() {
    divan::main();
}
