//! Evaluador de expresiones enteras.
//!
//! Gramática (recursive descent, asociatividad a izquierda):
//!
//! ```text
//! expr   := term   (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | number | '(' expr ')'
//! ```
//!
//! Aritmética `i64` con chequeo de overflow; la división trunca hacia cero.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("empty expression")]
    Empty,

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

pub fn evaluate(input: &str) -> Result<i64, ArithError> {
    if input.trim().is_empty() {
        return Err(ArithError::Empty);
    }

    let mut parser = Parser {
        chars: input.char_indices().collect(),
        pos: 0,
    };
    let value = parser.expr()?;

    match parser.peek() {
        None => Ok(value),
        Some((pos, ch)) => Err(ArithError::UnexpectedChar { ch, pos }),
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    /// Próximo carácter que no sea espacio, sin consumirlo.
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.get(self.pos) {
            if !c.is_whitespace() {
                break;
            }
            self.pos += 1;
        }
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn expr(&mut self) -> Result<i64, ArithError> {
        let mut acc = self.term()?;
        while let Some((_, op @ ('+' | '-'))) = self.peek() {
            self.bump();
            let rhs = self.term()?;
            acc = match op {
                '+' => acc.checked_add(rhs),
                _ => acc.checked_sub(rhs),
            }
            .ok_or(ArithError::Overflow)?;
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<i64, ArithError> {
        let mut acc = self.factor()?;
        while let Some((_, op @ ('*' | '/'))) = self.peek() {
            self.bump();
            let rhs = self.factor()?;
            acc = match op {
                '*' => acc.checked_mul(rhs).ok_or(ArithError::Overflow)?,
                _ => {
                    if rhs == 0 {
                        return Err(ArithError::DivisionByZero);
                    }
                    // i64::MIN / -1
                    acc.checked_div(rhs).ok_or(ArithError::Overflow)?
                }
            };
        }
        Ok(acc)
    }

    fn factor(&mut self) -> Result<i64, ArithError> {
        match self.peek() {
            None => Err(ArithError::UnexpectedEnd),
            Some((_, '-')) => {
                self.bump();
                self.factor()?.checked_neg().ok_or(ArithError::Overflow)
            }
            Some((_, '(')) => {
                self.bump();
                let value = self.expr()?;
                match self.peek() {
                    Some((_, ')')) => {
                        self.bump();
                        Ok(value)
                    }
                    Some((pos, ch)) => Err(ArithError::UnexpectedChar { ch, pos }),
                    None => Err(ArithError::UnexpectedEnd),
                }
            }
            Some((_, c)) if c.is_ascii_digit() => self.number(),
            Some((pos, ch)) => Err(ArithError::UnexpectedChar { ch, pos }),
        }
    }

    fn number(&mut self) -> Result<i64, ArithError> {
        let mut value: i64 = 0;
        while let Some(&(_, c)) = self.chars.get(self.pos) {
            let Some(d) = c.to_digit(10) else { break };
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(d)))
                .ok_or(ArithError::Overflow)?;
            self.bump();
        }
        Ok(value)
    }
}
