//! # Scribble - an embeddable interpreter core
//!
//! Scribble is the interpreter behind a scratch-pad editor shell: the shell
//! owns the windows and widgets, Scribble owns everything between the source
//! text and the output pane. It parses the current editor contents into a
//! syntax tree and evaluates that tree on demand, streaming program output
//! through an injected sink.
//!
//! ## Quick Start
//!
//! Drive the pipeline directly:
//!
//! ```rust
//! use std::sync::Arc;
//! use scribble::{Evaluator, MemorySink, Parser, Scanner, Value};
//!
//! # fn main() -> scribble::Result<()> {
//! let code = r#"
//!     sum = 0
//!     i = 1
//!     while (i <= 10) {
//!         sum = sum + i
//!         i = i + 1
//!     }
//!     sum
//! "#;
//!
//! // Tokenize
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into a syntax tree
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//!
//! // Execute
//! let mut evaluator = Evaluator::new(Arc::new(MemorySink::new()));
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Int(55)); // Sum of 1-10
//! # Ok(())
//! # }
//! ```
//!
//! Or let the [`Launcher`] orchestrate the build/run lifecycle the way a
//! shell would, with source text and output pane injected as capabilities:
//!
//! ```rust
//! use std::sync::Arc;
//! use scribble::{Launcher, MemorySink};
//!
//! # fn main() -> scribble::Result<()> {
//! let sink = Arc::new(MemorySink::new());
//! let launcher = Launcher::new(
//!     Arc::new(|| "print(1 + 2)".to_string()),
//!     sink.clone(),
//! );
//!
//! launcher.build_syntax_tree()?;
//! launcher.run_interpreter()?;
//!
//! assert_eq!(sink.lines(), vec!["3"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! A small imperative language over integers, strings and booleans:
//!
//! - **Statements**: expression statements (optionally `;`-terminated),
//!   `{ ... }` blocks with their own scope, `if (cond) ... else ...`,
//!   `while (cond) ...`
//! - **Expressions**: `+ - * / %` on integers (`+` also concatenates
//!   strings), comparisons, `&& || !` on booleans (short-circuit),
//!   right-associative assignment `x = expr`, calls
//! - **Output**: the builtin `print(expr)` renders its argument and appends
//!   one line to the output sink
//!
//! Conditions must be booleans; assignment creates a variable in the current
//! scope when no enclosing scope defines it; reading an unassigned variable
//! is an error.
//!
//! ## Architecture
//!
//! ```text
//! Source Text -> Scanner -> Tokens -> Parser -> Syntax Tree -> Evaluator -> OutputSink
//!                                                  ^
//!                                       held by the Launcher between calls
//! ```
//!
//! ### Main Components
//!
//! - [`Scanner`] - Tokenizes source text into tokens
//! - [`Parser`] - Parses tokens into a syntax tree
//! - [`Evaluator`] - Walks the tree against an [`Environment`]
//! - [`Value`] - Runtime value representation
//! - [`Environment`] - Variable storage with nested scoping
//! - [`OutputSink`] - Append-only destination for program output
//! - [`Launcher`] - Build/run lifecycle exposed to the shell
//!
//! ## Error Handling
//!
//! Every failure is a structured [`Error`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use scribble::{Evaluator, MemorySink, Parser, Scanner};
//!
//! let mut scanner = Scanner::new("1 / 0");
//! let tokens = scanner.scan_tokens().unwrap();
//! let program = Parser::new(tokens).parse().unwrap();
//!
//! let mut evaluator = Evaluator::new(Arc::new(MemorySink::new()));
//! let err = evaluator.execute(&program).unwrap_err();
//! assert_eq!(err.to_string(), "Division by zero");
//! ```
//!
//! Build errors leave the launcher holding no tree (a stale tree never
//! runs); runtime errors are additionally reported through the sink, so a
//! fire-and-forget shell caller still surfaces them to the user.

/// Version of the Scribble interpreter core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod launcher;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use launcher::{Launcher, SourceProvider};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{BinaryOp, Expression, LogicalOp, Parser, Program, Statement, UnaryOp};
pub use runtime::{Builtin, Environment, Evaluator, MemorySink, OutputSink, StdoutSink, Value};
