//! Error types for the Scribble interpreter core

use thiserror::Error;

/// Scribble interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lex errors
    /// No token pattern matches the character at this position
    ///
    /// **Triggered by:** Characters outside the language alphabet
    /// **Example:** `x = 1 § 2`
    #[error("Unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Line number where the character appears (1-indexed)
        line: usize,
        /// Column number where the character appears (1-indexed)
        column: usize,
    },

    /// String literal with no closing quote before end of input
    #[error("Unterminated string starting at line {line}")]
    UnterminatedString {
        /// Line where the string started
        line: usize,
    },

    // Parse errors
    /// Token cannot extend the current grammar production
    ///
    /// **Triggered by:** Grammar violations, including trailing input after
    /// a complete program and premature end of input
    /// **Example:** `x = 1 + )`
    #[error("Syntax error at line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Line number of the offending token
        line: usize,
        /// Column number of the offending token
        column: usize,
        /// What the parser was prepared to accept
        expected: String,
        /// The token actually found
        found: String,
    },

    /// Left side of `=` is not an identifier
    #[error("Invalid assignment target at line {line}, column {column}")]
    InvalidAssignmentTarget {
        /// Line number of the `=` token
        line: usize,
        /// Column number of the `=` token
        column: usize,
    },

    // Runtime errors
    /// Reference to a variable no enclosing scope defines
    ///
    /// **Triggered by:** Reading an identifier before any assignment to it
    /// **Example:** `y + 1` (when y was never assigned)
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// Variable name
        name: String,
    },

    /// Operand or condition of an incompatible value kind
    ///
    /// **Triggered by:** Conditions that are not booleans, operands outside
    /// an operator's domain
    /// **Example:** `if (1 + 2) { ... }`, `!5`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected value kind
        expected: String,
        /// Actual value kind
        got: String,
    },

    /// Binary operator applied to an unsupported pair of value kinds
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operator symbol
        op: String,
        /// Left operand kind
        left_type: String,
        /// Right operand kind
        right_type: String,
    },

    /// Division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Attempt to assign over a builtin callable
    #[error("Cannot reassign builtin: {name}")]
    BuiltinReassignment {
        /// Builtin name
        name: String,
    },

    /// Attempt to call a non-callable value
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Kind of the non-callable value
        type_name: String,
    },

    /// Callable invoked with arguments it cannot accept
    #[error("Invalid arguments for {name}: {reason}")]
    InvalidArguments {
        /// Callable name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    // Launcher conditions
    /// Run requested while no valid syntax tree is held
    #[error("No syntax tree available to run")]
    NoProgram,

    /// Run requested while a previous run is still in progress
    #[error("Interpreter is busy")]
    Busy,

    /// General runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl Error {
    /// Create a runtime error with a message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::RuntimeError(msg.into())
    }

    /// True for errors produced while building the tree (lex and parse phase)
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedCharacter { .. }
                | Error::UnterminatedString { .. }
                | Error::UnexpectedToken { .. }
                | Error::InvalidAssignmentTarget { .. }
        )
    }
}

/// Result type for Scribble operations
pub type Result<T> = std::result::Result<T, Error>;
