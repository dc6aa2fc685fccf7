use super::ast::{BinaryOp, Expression, LogicalOp, Program, Statement, UnaryOp};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive-descent parser for Scribble
///
/// Operator precedence, lowest first: assignment, `||`, `&&`, equality,
/// comparison, additive, multiplicative, unary, call. All binary operators
/// are left-associative; assignment is right-associative.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Creates a new parser over a scanned token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the tokens into a syntax tree
    ///
    /// Consumes every token up to end-of-input; trailing tokens that do not
    /// form a statement are a syntax error. No partial tree is returned on
    /// failure.
    pub fn parse(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::LeftBrace => self.parse_block(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_if(&mut self) -> Result<Statement> {
        self.consume(&TokenKind::If, "'if'")?;
        self.consume(&TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(&TokenKind::RightParen, "')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.advance_if(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Statement> {
        self.consume(&TokenKind::While, "'while'")?;
        self.consume(&TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(&TokenKind::RightParen, "')' after loop condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While { condition, body })
    }

    fn parse_block(&mut self) -> Result<Statement> {
        self.consume(&TokenKind::LeftBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.consume(&TokenKind::RightBrace, "'}' after block")?;

        Ok(Statement::Block { statements })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let expression = self.parse_expression()?;
        // The semicolon terminator is optional
        self.advance_if(&TokenKind::Semicolon);
        Ok(Statement::Expression(expression))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expression> {
        let expr = self.parse_or()?;

        if self.check(&TokenKind::Assign) {
            let equals = self.peek().clone();
            self.advance();
            let value = self.parse_assignment()?;

            return match expr {
                Expression::Variable(name) => Ok(Expression::Assign {
                    name,
                    value: Box::new(value),
                }),
                _ => Err(Error::InvalidAssignmentTarget {
                    line: equals.line,
                    column: equals.column,
                }),
            };
        }

        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut expr = self.parse_and()?;

        while self.advance_if(&TokenKind::Or) {
            let right = self.parse_and()?;
            expr = Expression::Logical {
                op: LogicalOp::Or,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut expr = self.parse_equality()?;

        while self.advance_if(&TokenKind::And) {
            let right = self.parse_equality()?;
            expr = Expression::Logical {
                op: LogicalOp::And,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        let mut expr = self.parse_comparison()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Eq, BinaryOp::Eq),
            (TokenKind::NotEq, BinaryOp::NotEq),
        ]) {
            let right = self.parse_comparison()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut expr = self.parse_term()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Lt, BinaryOp::Lt),
            (TokenKind::LtEq, BinaryOp::LtEq),
            (TokenKind::Gt, BinaryOp::Gt),
            (TokenKind::GtEq, BinaryOp::GtEq),
        ]) {
            let right = self.parse_term()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_factor()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Plus, BinaryOp::Add),
            (TokenKind::Minus, BinaryOp::Sub),
        ]) {
            let right = self.parse_factor()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expression> {
        let mut expr = self.parse_unary()?;

        while let Some(op) = self.match_binary_op(&[
            (TokenKind::Star, BinaryOp::Mul),
            (TokenKind::Slash, BinaryOp::Div),
            (TokenKind::Percent, BinaryOp::Mod),
        ]) {
            let right = self.parse_unary()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;

        while self.advance_if(&TokenKind::LeftParen) {
            let mut args = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    args.push(self.parse_expression()?);
                    if !self.advance_if(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.consume(&TokenKind::RightParen, "')' after arguments")?;

            expr = Expression::Call {
                callee: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expression::IntLiteral(n))
            }
            TokenKind::String(ref s) => {
                let s = s.clone();
                self.advance();
                Ok(Expression::StringLiteral(s))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::BoolLiteral(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::BoolLiteral(false))
            }
            TokenKind::Identifier(ref name) => {
                let name = name.clone();
                self.advance();
                Ok(Expression::Variable(name))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(&TokenKind::RightParen, "')' after grouping expression")?;
                Ok(Expression::Grouping(Box::new(expr)))
            }
            _ => Err(self.syntax_error("expression")),
        }
    }

    // Token plumbing

    fn match_binary_op(&mut self, pairs: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        for (kind, op) in pairs {
            if self.check(kind) {
                self.advance();
                return Some(*op);
            }
        }
        None
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind == *kind
    }

    fn advance_if(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: &TokenKind, expected: &str) -> Result<()> {
        if self.advance_if(kind) {
            Ok(())
        } else {
            Err(self.syntax_error(expected))
        }
    }

    fn syntax_error(&self, expected: &str) -> Error {
        let found = self.peek();
        Error::UnexpectedToken {
            line: found.line,
            column: found.column,
            expected: expected.to_string(),
            found: found.kind.to_string(),
        }
    }
}
