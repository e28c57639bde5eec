use super::super::{Expr, Parse};

pub struct HandRolled;

/// Recursive descent over the same grammar, one function per precedence level.
struct Descent<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Descent<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn sum(&mut self) -> Option<Expr> {
        let mut lhs = self.product()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            lhs = Expr::bin(lhs, op as char, self.product()?);
        }
        Some(lhs)
    }

    fn product(&mut self) -> Option<Expr> {
        let mut lhs = self.atom()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            lhs = Expr::bin(lhs, op as char, self.atom()?);
        }
        Some(lhs)
    }

    fn atom(&mut self) -> Option<Expr> {
        let start = self.pos;
        match self.peek()? {
            b'(' => {
                self.pos += 1;
                let inner = self.sum()?;
                if self.peek()? != b')' {
                    return None;
                }
                self.pos += 1;
                Some(inner)
            }
            c if c.is_ascii_digit() => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.input[start..self.pos]).ok()?;
                Some(Expr::Num(digits.parse().ok()?))
            }
            c if c.is_ascii_alphabetic() => {
                while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.pos += 1;
                }
                let name = std::str::from_utf8(&self.input[start..self.pos]).ok()?;
                Some(Expr::Var(name.to_owned()))
            }
            _ => None,
        }
    }
}

impl<O: From<Expr>> Parse<O> for HandRolled {
    fn parse(input: &str) -> O {
        let mut descent = Descent {
            input: input.as_bytes(),
            pos: 0,
        };
        let expr = descent.sum().unwrap();
        assert_eq!(descent.pos, input.len());
        expr.into()
    }
}
