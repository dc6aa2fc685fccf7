//! Build/run orchestration for the surrounding shell
//!
//! The launcher owns the current syntax tree between calls and exposes the
//! two triggers the shell wires to its menu: build and run. Both are safe to
//! call from whichever thread the shell uses, and both are fire-and-forget
//! friendly: every failure ends up either stored as the build state or
//! written through the output sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lexer::Scanner;
use crate::parser::{Parser, Program};
use crate::runtime::{Evaluator, OutputSink};

/// Source of the text to interpret
///
/// Pulled synchronously at the start of every build; the shell typically
/// backs this with its editor pane.
pub trait SourceProvider: Send + Sync {
    /// Returns the current source text
    fn source_text(&self) -> String;
}

impl<F> SourceProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn source_text(&self) -> String {
        self()
    }
}

/// Build state held between calls
enum BuildState {
    /// No build has happened yet
    Empty,
    /// Last build succeeded; this tree is what a run executes
    Built(Arc<Program>),
    /// Last build failed; any previous tree has been discarded
    Failed(Error),
}

struct Inner {
    state: BuildState,
    /// Conditional count of the last successful build, for the rebuild notice
    last_conditionals: Option<usize>,
}

/// Orchestrates the interpreter lifecycle for a shell
///
/// State machine: `Empty -> Built | Failed` via [`build_syntax_tree`], and
/// `Built -> ran` via [`run_interpreter`]. A failed rebuild discards the
/// previous tree, so a stale tree never runs. Each run evaluates against a
/// fresh environment; no variables persist across runs.
///
/// [`build_syntax_tree`]: Launcher::build_syntax_tree
/// [`run_interpreter`]: Launcher::run_interpreter
pub struct Launcher {
    source: Arc<dyn SourceProvider>,
    sink: Arc<dyn OutputSink>,
    inner: Mutex<Inner>,
    running: AtomicBool,
}

/// Clears the running flag even when a run unwinds early
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Launcher {
    /// Creates a launcher over the injected source and sink capabilities
    pub fn new(source: Arc<dyn SourceProvider>, sink: Arc<dyn OutputSink>) -> Self {
        Launcher {
            source,
            sink,
            inner: Mutex::new(Inner {
                state: BuildState::Empty,
                last_conditionals: None,
            }),
            running: AtomicBool::new(false),
        }
    }

    /// Reads the current source text and rebuilds the syntax tree
    ///
    /// On success the new tree replaces any previous one. On failure the
    /// error is recorded, the previous tree is discarded, and the error is
    /// returned. When a rebuild contains more conditionals than the previous
    /// successful build, a one-line notice is written through the sink.
    pub fn build_syntax_tree(&self) -> Result<()> {
        let text = self.source.source_text();
        let parsed = Scanner::new(&text)
            .scan_tokens()
            .and_then(|tokens| Parser::new(tokens).parse());

        let mut inner = self.inner.lock();
        match parsed {
            Ok(program) => {
                let conditionals = program.conditional_count();
                if let Some(prev) = inner.last_conditionals {
                    if conditionals > prev {
                        self.sink.write("New conditional detected");
                    }
                }
                inner.last_conditionals = Some(conditionals);

                debug!(
                    statements = program.statements.len(),
                    conditionals, "syntax tree rebuilt"
                );
                inner.state = BuildState::Built(Arc::new(program));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "build failed");
                inner.state = BuildState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Evaluates the currently held syntax tree against a fresh environment
    ///
    /// With no valid tree (never built, or last build failed) this writes one
    /// explanatory report through the sink and returns [`Error::NoProgram`].
    /// A run requested while another is in progress is rejected with
    /// [`Error::Busy`]. A runtime failure is reported as exactly one sink
    /// write and also returned; it never propagates as a panic.
    pub fn run_interpreter(&self) -> Result<()> {
        let program = {
            let inner = self.inner.lock();
            match &inner.state {
                BuildState::Built(program) => Arc::clone(program),
                BuildState::Empty | BuildState::Failed(_) => {
                    let err = Error::NoProgram;
                    warn!("run requested without a valid syntax tree");
                    self.sink.write(&err.to_string());
                    return Err(err);
                }
            }
        };

        if self
            .running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            let err = Error::Busy;
            warn!("run rejected while a previous run is in progress");
            self.sink.write(&err.to_string());
            return Err(err);
        }
        let _guard = RunGuard(&self.running);

        let mut evaluator = Evaluator::new(Arc::clone(&self.sink));
        match evaluator.execute(&program) {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(error = %err, "run failed");
                self.sink.write(&err.to_string());
                Err(err)
            }
        }
    }

    /// Snapshot of the currently held tree, if the last build succeeded
    pub fn syntax_tree(&self) -> Option<Arc<Program>> {
        match &self.inner.lock().state {
            BuildState::Built(program) => Some(Arc::clone(program)),
            _ => None,
        }
    }

    /// The recorded error, if the last build failed
    pub fn last_build_error(&self) -> Option<Error> {
        match &self.inner.lock().state {
            BuildState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }
}
