use super::Parseable;
use std::fmt::{Display, Formatter};

/// The common output of every parser.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Expr {
    Var(String),
    Num(u64),
    Bin(Box<Expr>, char, Box<Expr>),
}

impl Expr {
    pub fn bin(lhs: Expr, op: char, rhs: Expr) -> Self {
        Expr::Bin(Box::new(lhs), op, Box::new(rhs))
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Bin(_, '+' | '-', _) => 1,
            Expr::Bin(..) => 2,
            _ => 3,
        }
    }
}

/// Minimal parentheses: operators are left associative, so a right operand of equal
/// precedence needs them.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(v) => write!(f, "{v}"),
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Bin(lhs, op, rhs) => {
                let prec = self.precedence();
                if lhs.precedence() < prec {
                    write!(f, "({lhs})")?;
                } else {
                    write!(f, "{lhs}")?;
                }
                write!(f, "{op}")?;
                if rhs.precedence() <= prec {
                    write!(f, "({rhs})")
                } else {
                    write!(f, "{rhs}")
                }
            }
        }
    }
}

fn var(i: usize) -> Expr {
    Expr::Var(char::from(b'a' + (i % 26) as u8).to_string())
}

const OPS: [char; 4] = ['+', '*', '-', '/'];

/// A left fold of `n` operators over alternating variables and numbers.
#[derive(PartialEq, Eq, Debug)]
pub struct LongChain(pub Expr);

impl From<Expr> for LongChain {
    fn from(e: Expr) -> Self {
        LongChain(e)
    }
}

impl Parseable for LongChain {
    type Param = usize;

    fn generate_case(param: Self::Param) -> Self {
        let mut case = var(0);
        for i in 1..=param {
            let operand = if i % 2 == 0 { var(i) } else { Expr::Num(i as u64) };
            case = Expr::bin(case, OPS[i % OPS.len()], operand);
        }
        LongChain(case)
    }

    fn generate_text(&self) -> String {
        self.0.to_string()
    }
}

/// `a-(b-(c-...0))`, nested `n` deep.
#[derive(PartialEq, Eq, Debug)]
pub struct DeepNesting(pub Expr);

impl From<Expr> for DeepNesting {
    fn from(e: Expr) -> Self {
        DeepNesting(e)
    }
}

impl Parseable for DeepNesting {
    type Param = usize;

    fn generate_case(param: Self::Param) -> Self {
        let mut case = Expr::Num(0);
        for i in 0..param {
            case = Expr::bin(var(i), '-', case);
        }
        DeepNesting(case)
    }

    fn generate_text(&self) -> String {
        self.0.to_string()
    }
}
