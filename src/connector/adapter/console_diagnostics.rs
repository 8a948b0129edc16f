use tracing::debug;

use crate::application::DiagnosticSink;

/// Prints each diagnostic on stdout and mirrors it to the log.
pub struct ConsoleDiagnostics;

impl ConsoleDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for ConsoleDiagnostics {
    fn emit(&self, line: &str) {
        debug!("diagnostic: {}", line);
        println!("{}", line);
    }
}
