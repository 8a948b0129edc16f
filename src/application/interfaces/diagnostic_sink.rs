/// Where subscription diagnostics go.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, line: &str);
}
