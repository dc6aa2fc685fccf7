use parking_lot::Mutex;

/// Append-only destination for program-produced text
///
/// The evaluator performs one `write` per print operation, in program order.
/// The sink may be driven from whichever thread triggers a run, so
/// implementations must be safe to share; ordering follows the call order.
pub trait OutputSink: Send + Sync {
    /// Appends one logical line of output
    fn write(&self, text: &str);
}

/// Sink that captures output lines in memory
///
/// Used by tests, and by shells that poll the captured lines into a display
/// pane.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty capturing sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything written so far, in write order
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Discards all captured output
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl OutputSink for MemorySink {
    fn write(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

/// Sink that writes each line to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, text: &str) {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order() {
        let sink = MemorySink::new();
        sink.write("first");
        sink.write("second");

        assert_eq!(sink.lines(), vec!["first", "second"]);

        sink.clear();
        assert!(sink.lines().is_empty());
    }
}
