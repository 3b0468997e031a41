use std::io::Write;

use parking_lot::Mutex;
use tags::TagSet;

/// Destination for admitted trace records.
///
/// A sink is only invoked after the emission gate admits a write; denied
/// writes never reach it. Sinks are fire-and-forget: `emit` returns
/// nothing, and a sink that fails internally must cope on its own rather
/// than unwind into the emission pipeline.
///
/// Implementations must be callable from the lock-free fast path: the
/// pipeline holds no configuration lock while emitting, so a slow sink
/// stalls only the writing call, never concurrent configuration.
pub trait Sink: Send + Sync {
    /// Delivers one rendered record and the tags of the call it came from.
    fn emit(&self, record: &str, tags: &TagSet);

    /// Flushes buffered records. Called when a context closes.
    fn flush(&self) {}
}

/// Sink that discards every record. The default for a fresh context.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn emit(&self, _record: &str, _tags: &TagSet) {}
}

/// Newline policy for [`WriterSink`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Each record is terminated with a newline.
    #[default]
    WithNewline,
    /// Records are written verbatim.
    WithoutNewline,
}

/// Sink that streams records into an [`std::io::Write`] implementor.
///
/// The writer sits behind a mutex so concurrent admitted writes interleave
/// whole records, never bytes. Write errors are swallowed, per the sink
/// contract.
///
/// # Examples
///
/// ```
/// use tags::tags;
/// use trace::{Sink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.emit("call setup started", &tags! { "leg" => "1" });
/// sink.emit("call setup done", &tags! { "leg" => "1" });
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output, "call setup started\ncall setup done\n");
/// ```
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W: Write + Send> WriterSink<W> {
    /// Creates a sink that terminates each record with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with an explicit newline policy.
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn emit(&self, record: &str, _tags: &TagSet) {
        let mut writer = self.writer.lock();
        let result = match self.line_mode {
            LineMode::WithNewline => writeln!(writer, "{record}"),
            LineMode::WithoutNewline => write!(writer, "{record}"),
        };
        // Sink failures stay inside the sink.
        let _ = result;
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}
