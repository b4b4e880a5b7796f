//! Recursive-descent parser producing a flat expression arena.
//!
//! Nodes reference their children by `ExprId` instead of boxing, so a
//! compiled expression is a single `Vec` that is cheap to keep around on
//! loop and condition nodes.

use std::fmt;

use crate::scanner::{scan, Token, TokenKind};
use crate::stack::ensure_sufficient_stack;
use crate::ExprError;

/// Index into an expression arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Number(f64),
    Text(String),
    Bool(bool),
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
}

/// A compiled expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    nodes: Vec<ExprKind>,
    root: ExprId,
}

impl Expr {
    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &ExprKind {
        &self.nodes[id.index()]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(expr: &Expr, id: ExprId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match expr.get(id) {
                ExprKind::Number(n) => write!(f, "{n}"),
                ExprKind::Text(s) => write!(f, "\"{s}\""),
                ExprKind::Bool(b) => write!(f, "{b}"),
                ExprKind::Variable(name) => f.write_str(name),
                ExprKind::Unary { op, operand } => {
                    write!(f, "{}", op.as_symbol())?;
                    write_node(expr, *operand, f)
                }
                ExprKind::Binary { op, left, right } => {
                    f.write_str("(")?;
                    write_node(expr, *left, f)?;
                    write!(f, " {} ", op.as_symbol())?;
                    write_node(expr, *right, f)?;
                    f.write_str(")")
                }
            }
        }
        write_node(self, self.root, f)
    }
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nodes: Vec<ExprKind>,
}

impl Parser {
    pub(crate) fn new(source: &str) -> Result<Self, ExprError> {
        Ok(Parser {
            tokens: scan(source)?,
            pos: 0,
            nodes: Vec::new(),
        })
    }

    pub(crate) fn parse(mut self) -> Result<Expr, ExprError> {
        if self.check(&TokenKind::Eof) {
            return Err(ExprError::Empty);
        }
        let root = self.parse_expr()?;
        if !self.check(&TokenKind::Eof) {
            return Err(self.unexpected("an operator or end of expression"));
        }
        Ok(Expr {
            nodes: self.nodes,
            root,
        })
    }

    fn current(&self) -> &Token {
        // The scanner always terminates the list with `Eof`, and `advance`
        // never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.current().kind.clone();
        if kind != TokenKind::Eof {
            self.pos += 1;
        }
        kind
    }

    fn unexpected(&self, expected: &'static str) -> ExprError {
        let token = self.current();
        ExprError::UnexpectedToken {
            found: token.kind.to_string(),
            expected,
            offset: token.offset,
        }
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(kind);
        id
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(ExprKind::Binary { op, left, right })
    }

    /// Parse an expression, growing the stack for deeply nested input.
    fn parse_expr(&mut self) -> Result<ExprId, ExprError> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    /// Parse || (lowest precedence).
    fn parse_or(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_and()?;
            left = self.binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// Parse &&
    fn parse_and(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = self.binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// Parse == and !=
    fn parse_equality(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = self.binary(op, left, right);
        }
    }

    /// Parse < <= > >=
    fn parse_comparison(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_additive()?;
            left = self.binary(op, left, right);
        }
    }

    /// Parse + and -
    fn parse_additive(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.binary(op, left, right);
        }
    }

    /// Parse * / %
    fn parse_multiplicative(&mut self) -> Result<ExprId, ExprError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = self.binary(op, left, right);
        }
    }

    /// Parse prefix - and !
    fn parse_unary(&mut self) -> Result<ExprId, ExprError> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(self.alloc(ExprKind::Unary { op, operand }))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ExprError> {
        let kind = match self.current().kind.clone() {
            TokenKind::Number(n) => ExprKind::Number(n),
            TokenKind::Str(s) => ExprKind::Text(s),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Ident(name) => ExprKind::Variable(name),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                if !self.check(&TokenKind::RParen) {
                    return Err(self.unexpected("`)`"));
                }
                self.advance();
                return Ok(inner);
            }
            _ => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(self.alloc(kind))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
