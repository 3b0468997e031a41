use std::fmt;

use flags::Flag;
use tags::TagSet;

/// Renders an admitted write into the record handed to the sink.
///
/// Invoked only after the emission gate admits the write; the deny path
/// never formats. Header and footer decoration policy lives entirely in
/// the formatter, outside the core.
pub trait Formatter: Send + Sync {
    /// Renders one record.
    ///
    /// `context` is the owning context's name and `flag` the descriptor of
    /// the flag the write was tagged with, so a formatter can decorate the
    /// message with its origin without any extra lookups.
    fn render(&self, context: &str, flag: &Flag, tags: &TagSet, args: fmt::Arguments<'_>)
    -> String;
}

/// Formatter that renders the message text and nothing else.
///
/// The default for a fresh context.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn render(
        &self,
        _context: &str,
        _flag: &Flag,
        _tags: &TagSet,
        args: fmt::Arguments<'_>,
    ) -> String {
        args.to_string()
    }
}
