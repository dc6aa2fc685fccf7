//! Runtime execution for Scribble programs
//!
//! Tree-walking evaluation over a scoped environment, with all program
//! output routed through an injected sink.

mod environment;
mod evaluator;
mod output;
mod value;

pub use environment::Environment;
pub use evaluator::Evaluator;
pub use output::{MemorySink, OutputSink, StdoutSink};
pub use value::{Builtin, Value};
