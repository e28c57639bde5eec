use super::super::{Expr, Parse};
use packrat::{
    chars, digits, eoi, exactly, first_of, indirect, left, letters, one_of, parse, seq,
    ParserExt, ParserRef, Tree,
};

pub struct Packrat;

fn grammar() -> ParserRef {
    let expr = indirect("expr");
    let factor = first_of([
        letters().tagged("var"),
        digits().tagged("num"),
        seq([exactly("(").omit(), expr.parser(), exactly(")").omit()]).tagged("parens"),
    ]);
    let term = left(factor.clone(), seq([one_of("*/").tagged("op"), factor])).tagged("bin");
    let sum = left(term.clone(), seq([one_of("+-").tagged("op"), term])).tagged("bin");
    expr.bind(&sum).unwrap();
    sum
}

fn to_expr(tree: &Tree) -> Expr {
    match (tree.tag(), tree.children()) {
        (Some("var"), _) => Expr::Var(tree.matched()),
        (Some("num"), _) => Expr::Num(tree.matched().parse().unwrap()),
        (Some("parens"), [inner]) => to_expr(inner),
        (Some("bin"), [lhs, op, rhs]) => {
            Expr::bin(to_expr(lhs), op.span()[0], to_expr(rhs))
        }
        _ => unreachable!("unexpected tree {tree}"),
    }
}

impl<O: From<Expr>> Parse<O> for Packrat {
    fn parse(input: &str) -> O {
        let whole = seq([grammar(), eoi()]);
        let input = chars(input);
        let tree = parse(whole.as_ref(), &input).unwrap().unwrap();
        let [root] = tree.children() else {
            unreachable!("expected a single expression, got {tree}")
        };
        to_expr(root).into()
    }
}
