#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Shared test doubles for the trace workspace.
//!
//! [`RecordingSink`] and [`CountingFormatter`] are cheaply cloneable with
//! shared interiors, so a test can hand one clone to a context and keep
//! another to assert on afterwards. Their call counters back the
//! "a denied write never invokes the formatter or the sink" assertions.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tags::TagSet;
use trace::{Flag, Formatter, Sink};

/// Sink that captures every emitted record together with its tags.
///
/// # Examples
///
/// ```
/// use tags::tags;
/// use test_support::RecordingSink;
/// use trace::Sink;
///
/// let sink = RecordingSink::new();
/// let handle = sink.clone();
///
/// sink.emit("ringing", &tags! { "leg" => "1" });
///
/// assert_eq!(handle.emit_count(), 1);
/// assert_eq!(handle.records()[0].0, "ringing");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    inner: Arc<RecordingInner>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    records: Mutex<Vec<(String, TagSet)>>,
    flushes: AtomicUsize,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many records have been emitted.
    #[must_use]
    pub fn emit_count(&self) -> usize {
        self.inner.records.lock().len()
    }

    /// Returns how many times the sink has been flushed.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.inner.flushes.load(Ordering::Acquire)
    }

    /// Returns the captured `(record, tags)` pairs, in emission order.
    #[must_use]
    pub fn records(&self) -> Vec<(String, TagSet)> {
        self.inner.records.lock().clone()
    }
}

impl Sink for RecordingSink {
    fn emit(&self, record: &str, tags: &TagSet) {
        self.inner
            .records
            .lock()
            .push((record.to_owned(), tags.clone()));
    }

    fn flush(&self) {
        self.inner.flushes.fetch_add(1, Ordering::AcqRel);
    }
}

/// Formatter that counts its render calls.
///
/// Renders `component/flag: message` so tests can also assert on what the
/// sink received.
#[derive(Clone, Debug, Default)]
pub struct CountingFormatter {
    renders: Arc<AtomicUsize>,
}

impl CountingFormatter {
    /// Creates a formatter with a zero call count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many records have been rendered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::Acquire)
    }
}

impl Formatter for CountingFormatter {
    fn render(
        &self,
        _context: &str,
        flag: &Flag,
        _tags: &TagSet,
        args: fmt::Arguments<'_>,
    ) -> String {
        self.renders.fetch_add(1, Ordering::AcqRel);
        format!("{}/{}: {args}", flag.component(), flag.name())
    }
}
