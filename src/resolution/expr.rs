//! Restricted arithmetic evaluator for folding template arguments.
//!
//! Only numeric literals, unary `+`/`-`, the binary operators `+ - * /` and
//! parentheses are accepted; anything else is rejected rather than guessed
//! at. Parsing uses binding powers (Pratt parsing).
//!
//! Integer-only expressions are evaluated with checked `i64` arithmetic and
//! truncating division, the way a C++ compiler folds integral constants. A
//! single real operand makes the whole expression real.

use std::fmt;

use crate::core::error::{Error, Result};

/// Result of an evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    fn as_real(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Real(value) => value,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Real(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{value:.1}")
            }
            Number::Real(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_token(token: Token) -> Option<Self> {
        Some(match token {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            _ => return None,
        })
    }

    /// Left and right binding power; all operators are left-associative
    fn binding_power(self) -> (u8, u8) {
        match self {
            BinaryOp::Add | BinaryOp::Sub => (1, 2),
            BinaryOp::Mul | BinaryOp::Div => (3, 4),
        }
    }

    fn apply(self, lhs: Number, rhs: Number) -> std::result::Result<Number, String> {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                let value = match self {
                    BinaryOp::Add => a.checked_add(b),
                    BinaryOp::Sub => a.checked_sub(b),
                    BinaryOp::Mul => a.checked_mul(b),
                    BinaryOp::Div if b == 0 => return Err("division by zero".to_string()),
                    BinaryOp::Div => a.checked_div(b),
                };
                value
                    .map(Number::Int)
                    .ok_or_else(|| "integer overflow".to_string())
            }
            _ => {
                let (a, b) = (lhs.as_real(), rhs.as_real());
                let value = match self {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div if b == 0.0 => return Err("division by zero".to_string()),
                    BinaryOp::Div => a / b,
                };
                if value.is_finite() {
                    Ok(Number::Real(value))
                } else {
                    Err("result is not a finite number".to_string())
                }
            }
        }
    }
}

const UNARY_BINDING_POWER: u8 = 5;

/// Evaluate a literal arithmetic expression
pub fn evaluate(expression: &str) -> Result<Number> {
    let tokens = tokenize(expression).map_err(|reason| Error::expression(expression, reason))?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser
        .parse_expr(0)
        .and_then(|value| match parser.peek() {
            None => Ok(value),
            Some(token) => Err(format!("unexpected {token:?}")),
        })
        .map_err(|reason| Error::expression(expression, reason))?;
    Ok(value)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn parse_expr(&mut self, min_bp: u8) -> std::result::Result<Number, String> {
        let mut lhs = self.parse_prefix()?;

        while let Some(op) = self.peek().and_then(BinaryOp::from_token) {
            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(r_bp)?;
            lhs = op.apply(lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> std::result::Result<Number, String> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Plus) => self.parse_expr(UNARY_BINDING_POWER),
            Some(Token::Minus) => match self.parse_expr(UNARY_BINDING_POWER)? {
                Number::Int(value) => value
                    .checked_neg()
                    .map(Number::Int)
                    .ok_or_else(|| "integer overflow".to_string()),
                Number::Real(value) => Ok(Number::Real(-value)),
            },
            Some(Token::LeftParen) => {
                let value = self.parse_expr(0)?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(value),
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(token) => Err(format!("unexpected {token:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

fn tokenize(expression: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(index, c)) = chars.peek() {
                    let exponent_sign = matches!(c, '+' | '-')
                        && matches!(expression[..index].chars().next_back(), Some('e' | 'E'))
                        && !is_hex(&expression[start..index]);
                    if c.is_ascii_alphanumeric() || c == '.' || exponent_sign {
                        end = index + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(parse_literal(&expression[start..end])?));
                continue;
            }
            other => return Err(format!("unsupported character '{other}'")),
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

fn is_hex(literal: &str) -> bool {
    literal.starts_with("0x") || literal.starts_with("0X")
}

/// Parse a C++ numeric literal, ignoring `u`, `l` and `f` suffixes
fn parse_literal(literal: &str) -> std::result::Result<Number, String> {
    let invalid = || format!("invalid numeric literal '{literal}'");

    if is_hex(literal) {
        let digits = literal[2..].trim_end_matches(['u', 'U', 'l', 'L']);
        return i64::from_str_radix(digits, 16)
            .map(Number::Int)
            .map_err(|_| invalid());
    }

    let float_suffix = literal.ends_with(['f', 'F']);
    let body = literal.trim_end_matches(['u', 'U', 'l', 'L', 'f', 'F']);
    if body.is_empty() || body == "." {
        return Err(invalid());
    }

    let is_real = float_suffix || body.contains(['.', 'e', 'E']);
    if is_real {
        body.parse::<f64>()
            .map(Number::Real)
            .map_err(|_| invalid())
    } else {
        body.parse::<i64>().map(Number::Int).map_err(|_| invalid())
    }
}
