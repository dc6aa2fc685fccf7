use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete Scribble program
///
/// The root of the syntax tree. Immutable after a successful build; every
/// rebuild replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in the program
    pub statements: Vec<Statement>,
}

impl Program {
    /// Number of conditional nodes anywhere in the tree
    ///
    /// Used by the launcher to compare consecutive builds.
    pub fn conditional_count(&self) -> usize {
        self.statements.iter().map(Statement::conditional_count).sum()
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Expression statement; the value is evaluated and discarded
    Expression(Expression),

    /// Brace-delimited block introducing a nested scope
    Block {
        /// Statements executed in sequence inside the new scope
        statements: Vec<Statement>,
    },

    /// If statement
    If {
        /// Condition expression; must evaluate to a boolean
        condition: Expression,
        /// Statement to execute if the condition is true
        then_branch: Box<Statement>,
        /// Optional statement to execute if the condition is false
        else_branch: Option<Box<Statement>>,
    },

    /// While loop; the condition is re-tested before every iteration
    While {
        /// Loop condition expression; must evaluate to a boolean
        condition: Expression,
        /// Loop body
        body: Box<Statement>,
    },
}

impl Statement {
    fn conditional_count(&self) -> usize {
        match self {
            Statement::Expression(_) => 0,
            Statement::Block { statements } => {
                statements.iter().map(Statement::conditional_count).sum()
            }
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                1 + then_branch.conditional_count()
                    + else_branch
                        .as_ref()
                        .map(|s| s.conditional_count())
                        .unwrap_or(0)
            }
            Statement::While { body, .. } => body.conditional_count(),
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    // Literals
    /// Integer literal expression
    IntLiteral(i64),
    /// String literal expression
    StringLiteral(String),
    /// Boolean literal expression
    BoolLiteral(bool),

    // Variables
    /// Variable reference expression
    Variable(String),

    /// Assignment expression: name = value (right-associative)
    Assign {
        /// Name of the variable to assign to
        name: String,
        /// Expression value to assign
        value: Box<Expression>,
    },

    /// Binary operation expression; operands evaluate left-to-right
    Binary {
        /// Binary operator to apply
        op: BinaryOp,
        /// Left operand expression
        left: Box<Expression>,
        /// Right operand expression
        right: Box<Expression>,
    },

    /// Short-circuit logical expression
    Logical {
        /// Logical operator to apply
        op: LogicalOp,
        /// Left operand expression
        left: Box<Expression>,
        /// Right operand expression, evaluated only when needed
        right: Box<Expression>,
    },

    /// Unary operation expression
    Unary {
        /// Unary operator to apply
        op: UnaryOp,
        /// Operand expression
        operand: Box<Expression>,
    },

    /// Call expression; the callee must evaluate to a callable value
    Call {
        /// Expression producing the callable
        callee: Box<Expression>,
        /// Argument expressions, evaluated left-to-right
        args: Vec<Expression>,
    },

    /// Grouping expression with parentheses (expr)
    Grouping(Box<Expression>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition operator (+); also concatenates strings
    Add,
    /// Subtraction operator (-)
    Sub,
    /// Multiplication operator (*)
    Mul,
    /// Division operator (/)
    Div,
    /// Remainder operator (%)
    Mod,

    // Comparison
    /// Equality operator (==)
    Eq,
    /// Inequality operator (!=)
    NotEq,
    /// Less than operator (<)
    Lt,
    /// Greater than operator (>)
    Gt,
    /// Less than or equal operator (<=)
    LtEq,
    /// Greater than or equal operator (>=)
    GtEq,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation operator (-x)
    Neg,
    /// Logical NOT operator (!x)
    Not,
}

/// Short-circuit logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Logical AND operator (&&)
    And,
    /// Logical OR operator (||)
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "&&"),
            LogicalOp::Or => write!(f, "||"),
        }
    }
}
