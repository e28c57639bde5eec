use super::super::{Expr, Parse};
use chumsky::prelude::*;

pub struct Chumsky;

fn expr_parser() -> impl Parser<char, Expr, Error = Simple<char>> {
    recursive(|expr| {
        let atom = text::int(10)
            .map(|n: String| Expr::Num(n.parse().unwrap()))
            .or(text::ident().map(Expr::Var))
            .or(expr.delimited_by(just('('), just(')')));
        let product = atom
            .clone()
            .then(one_of("*/").then(atom).repeated())
            .foldl(|lhs, (op, rhs)| Expr::bin(lhs, op, rhs));
        product
            .clone()
            .then(one_of("+-").then(product).repeated())
            .foldl(|lhs, (op, rhs)| Expr::bin(lhs, op, rhs))
    })
    .then_ignore(end())
}

impl<O: From<Expr>> Parse<O> for Chumsky {
    fn parse(input: &str) -> O {
        expr_parser().parse(input).unwrap().into()
    }
}
