//! # Diagnostics
//!
//! Typed messages emitted while tessellating a shape, delivered to an
//! injected [`DiagnosticSink`].
//!
//! Nothing here prints on its own. The caller picks the sink: [`NullSink`]
//! discards everything, [`CollectingSink`] keeps messages for inspection and
//! [`StderrSink`] writes them out line by line.

use config::constants::{DEBUG_LEVEL_DEBUG, DEBUG_LEVEL_INFO, DEBUG_LEVEL_TRACE};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl Severity {
    /// Debug level needed for this severity to be reported.
    pub fn min_level(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning | Severity::Info => DEBUG_LEVEL_INFO,
            Severity::Debug => DEBUG_LEVEL_DEBUG,
            Severity::Trace => DEBUG_LEVEL_TRACE,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }
}

/// Pipeline step a diagnostic or timing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Options,
    Meshing,
    Faces,
    Edges,
    Vertices,
    Concatenation,
    Normals,
    EdgeSynthesis,
    Handoff,
    Total,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Options => "options",
            Stage::Meshing => "meshing",
            Stage::Faces => "faces",
            Stage::Edges => "edges",
            Stage::Vertices => "vertices",
            Stage::Concatenation => "concatenation",
            Stage::Normals => "normals",
            Stage::EdgeSynthesis => "edge synthesis",
            Stage::Handoff => "handoff",
            Stage::Total => "total",
        };
        f.write_str(name)
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    /// Face or edge index the message is about
    pub primitive: Option<usize>,
}

impl Diagnostic {
    /// Creates a diagnostic not tied to a primitive.
    pub fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
            primitive: None,
        }
    }

    /// Attaches a face or edge index.
    pub fn with_primitive(mut self, index: usize) -> Self {
        self.primitive = Some(index);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.severity.label(), self.stage)?;
        if let Some(index) = self.primitive {
            write!(f, "#{index}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// A stage timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub stage: Stage,
    pub label: String,
    pub elapsed: Duration,
    /// Nesting depth, for indentation
    pub depth: usize,
}

// =============================================================================
// SINKS
// =============================================================================

/// Receiver of diagnostics and timings.
pub trait DiagnosticSink {
    /// Receives one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Receives one stage timing. Ignored unless overridden.
    fn timing(&mut self, _stage: Stage, _label: &str, _elapsed: Duration, _depth: usize) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic and timing it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
    pub timings: Vec<Timing>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns diagnostics of the given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Returns true if any error was reported.
    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn timing(&mut self, stage: Stage, label: &str, elapsed: Duration, depth: usize) {
        self.timings.push(Timing {
            stage,
            label: label.to_string(),
            elapsed,
            depth,
        });
    }
}

/// Writes diagnostics and timings to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        eprintln!("{diagnostic}");
    }

    fn timing(&mut self, _stage: Stage, label: &str, elapsed: Duration, depth: usize) {
        eprintln!("{}", format_timing(label, elapsed, depth));
    }
}

/// Formats a timing line as `"   0.042 sec: | | label"`.
pub fn format_timing(label: &str, elapsed: Duration, depth: usize) -> String {
    format!(
        "{:8.3} sec: {}{}",
        elapsed.as_secs_f64(),
        "| ".repeat(depth),
        label
    )
}

// =============================================================================
// REPORTER
// =============================================================================

/// Level-gated front end over a sink, used by the orchestrator.
///
/// Errors always pass. Other severities pass when `debug` reaches their
/// [`Severity::min_level`]. Timings pass only when `timeit` is set.
pub(crate) struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    debug: u8,
    timeit: bool,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(sink: &'a mut dyn DiagnosticSink, debug: u8, timeit: bool) -> Self {
        Self {
            sink,
            debug,
            timeit,
        }
    }

    /// Returns true if messages of this severity would be delivered.
    pub(crate) fn enabled(&self, severity: Severity) -> bool {
        self.debug >= severity.min_level()
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if self.enabled(diagnostic.severity) {
            self.sink.report(diagnostic);
        }
    }

    pub(crate) fn error(&mut self, stage: Stage, message: impl Into<String>) {
        self.emit(Diagnostic::new(Severity::Error, stage, message));
    }

    /// Reports `error` and hands it back for propagation.
    pub(crate) fn fail<E: fmt::Display>(&mut self, stage: Stage, error: E) -> E {
        self.error(stage, error.to_string());
        error
    }

    pub(crate) fn info(&mut self, stage: Stage, message: impl Into<String>) {
        self.emit(Diagnostic::new(Severity::Info, stage, message));
    }

    pub(crate) fn warning_for(&mut self, stage: Stage, index: usize, message: impl Into<String>) {
        self.emit(Diagnostic::new(Severity::Warning, stage, message).with_primitive(index));
    }

    /// Starts a timer, or returns `None` when timings are off.
    pub(crate) fn start(&self) -> Option<Instant> {
        self.timeit.then(Instant::now)
    }

    /// Reports the time elapsed since `start`.
    pub(crate) fn finish(
        &mut self,
        start: Option<Instant>,
        stage: Stage,
        label: &str,
        depth: usize,
    ) {
        if let Some(start) = start {
            self.sink.timing(stage, label, start.elapsed(), depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(Severity::Warning, Stage::Faces, "triangulation is null")
            .with_primitive(3);
        assert_eq!(diag.to_string(), "[WARN] faces: #3: triangulation is null");

        let diag = Diagnostic::new(Severity::Info, Stage::EdgeSynthesis, "12 edges");
        assert_eq!(diag.to_string(), "[INFO] edge synthesis: 12 edges");
    }

    #[test]
    fn test_format_timing() {
        let line = format_timing("concatenate faces", Duration::from_millis(1500), 2);
        assert_eq!(line, "   1.500 sec: | | concatenate faces");
    }

    #[test]
    fn test_reporter_silent_level_passes_errors_only() {
        let mut sink = CollectingSink::new();
        {
            let mut reporter = Reporter::new(&mut sink, 0, false);
            reporter.error(Stage::Meshing, "failed");
            reporter.warning_for(Stage::Faces, 1, "missing");
            reporter.info(Stage::Total, "done");
        }
        assert_eq!(sink.diagnostics.len(), 1);
        assert!(sink.has_errors());
    }

    #[test]
    fn test_reporter_levels() {
        let mut sink = CollectingSink::new();
        {
            let mut reporter = Reporter::new(&mut sink, DEBUG_LEVEL_INFO, false);
            assert!(reporter.enabled(Severity::Info));
            assert!(reporter.enabled(Severity::Warning));
            assert!(!reporter.enabled(Severity::Debug));
            reporter.warning_for(Stage::Edges, 7, "no face polygon");
            reporter.emit(Diagnostic::new(Severity::Debug, Stage::Edges, "hidden"));
        }
        assert_eq!(sink.diagnostics.len(), 1);
        assert_eq!(sink.diagnostics[0].primitive, Some(7));

        let reporter = Reporter::new(&mut sink, DEBUG_LEVEL_TRACE, false);
        assert!(reporter.enabled(Severity::Trace));
    }

    #[test]
    fn test_reporter_timings_need_timeit() {
        let mut sink = CollectingSink::new();
        {
            let mut reporter = Reporter::new(&mut sink, 0, false);
            let start = reporter.start();
            assert!(start.is_none());
            reporter.finish(start, Stage::Total, "total", 0);
        }
        assert!(sink.timings.is_empty());

        {
            let mut reporter = Reporter::new(&mut sink, 0, true);
            let start = reporter.start();
            reporter.finish(start, Stage::Normals, "synthesize normals", 2);
        }
        assert_eq!(sink.timings.len(), 1);
        assert_eq!(sink.timings[0].stage, Stage::Normals);
        assert_eq!(sink.timings[0].depth, 2);
    }

    #[test]
    fn test_null_sink_ignores_timings() {
        let mut sink = NullSink;
        sink.report(Diagnostic::new(Severity::Error, Stage::Total, "x"));
        sink.timing(Stage::Total, "x", Duration::ZERO, 0);
    }
}
