use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use filters::{FilterEngine, FilterKind, FilterRule};
use flags::{Flag, FlagId, FlagMap, FlagRegistry};
use tags::TagSet;

use crate::{Formatter, NullSink, PlainFormatter, Sink, TraceError, debug};

/// Directive token addressing every flag of a component.
const ALL_FLAGS: &str = "all";
/// Directive component addressing every registered component.
const ANY_COMPONENT: &str = "*";

/// A trace context: one flag registry, one filter engine, one global
/// enable switch, and the sink the admitted records go to.
///
/// Every write passes a three-way gate: the context must be enabled, the
/// write's flag must be enabled, and the write's tags must satisfy the
/// installed filters. All three default to "deny" (a fresh context is
/// disabled, flags start off, and an empty filter set admits nothing), so
/// tracing costs nothing until someone deliberately turns it on.
///
/// Contexts are explicit values with an explicit lifecycle. There is no
/// ambient process-wide context; a caller that wants several independent
/// trace domains opens several contexts.
///
/// # Examples
///
/// ```
/// use filters::FilterKind;
/// use tags::tags;
/// use trace::{TraceContext, trace_write};
///
/// let context = TraceContext::open("sip");
/// let map = context
///     .register_component("engine", &[("setup", "call setup")])
///     .unwrap();
/// let setup = map.get("setup").unwrap();
///
/// context.set_enabled(true);
/// context.set_flag(setup, true).unwrap();
/// context.add_filter(FilterKind::Exact, "all").unwrap();
///
/// let tags = tags! { "leg" => "1" };
/// assert!(context.should_emit(setup, &tags).unwrap());
/// trace_write!(context, setup, &tags, "leg {} ringing", 1).unwrap();
///
/// context.close();
/// ```
pub struct TraceContext {
    name: String,
    enabled: AtomicBool,
    registry: FlagRegistry,
    filters: FilterEngine,
    sink: Box<dyn Sink>,
    formatter: Box<dyn Formatter>,
}

impl fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContext")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("registry", &self.registry)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

impl TraceContext {
    /// Opens a context. It starts disabled, with no components, no
    /// filters, a [`NullSink`], and a [`PlainFormatter`].
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: AtomicBool::new(false),
            registry: FlagRegistry::new(),
            filters: FilterEngine::new(),
            sink: Box::new(NullSink),
            formatter: Box::new(PlainFormatter),
        }
    }

    /// Closes the context, flushing the sink.
    ///
    /// Dropping the context has the same effect; `close` exists so the end
    /// of a context's life reads explicitly at the call site.
    pub fn close(self) {
        // Drop flushes the sink.
    }

    /// The context's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the context-wide switch is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Sets the context-wide switch, returning the previous state.
    ///
    /// Independent of per-flag state: both must be on for any emission.
    pub fn set_enabled(&self, on: bool) -> bool {
        let previous = self.enabled.swap(on, Ordering::AcqRel);
        debug::context_toggled(&self.name, on, previous);
        previous
    }

    /// Registers `component` and its ordered `(name, description)` flags,
    /// returning the assigned ids.
    ///
    /// # Errors
    ///
    /// `DuplicateComponent` when the name is taken in this context,
    /// `DuplicateFlag` when two flags in the call share a name; nothing is
    /// committed on failure.
    pub fn register_component(
        &self,
        component: &str,
        flags: &[(&str, &str)],
    ) -> Result<FlagMap, TraceError> {
        Ok(self.registry.register(component, flags)?)
    }

    /// Sets one flag's state, returning the previous state.
    ///
    /// # Errors
    ///
    /// `UnknownFlag` when `id` was not issued by this context.
    pub fn set_flag(&self, id: FlagId, on: bool) -> Result<bool, TraceError> {
        let previous = self.registry.set(id, on)?;
        debug::flag_toggled(&self.name, id, on, previous);
        Ok(previous)
    }

    /// Returns an introspection handle for one flag.
    ///
    /// # Errors
    ///
    /// `UnknownFlag` when `id` was not issued by this context.
    pub fn flag(&self, id: FlagId) -> Result<Flag, TraceError> {
        Ok(self.registry.flag(id)?)
    }

    /// Returns the registered component names, in registration order.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        self.registry.components()
    }

    /// Returns handles for every flag `component` declared, or `None` when
    /// the component is not registered.
    #[must_use]
    pub fn flags_of(&self, component: &str) -> Option<Vec<Flag>> {
        self.registry.flags_of(component)
    }

    /// Parses `spec` and appends it to the filter rule set.
    ///
    /// The kind is selected by this call's `kind` argument, not by spec
    /// syntax; see the `filters` crate for the grammar.
    ///
    /// # Errors
    ///
    /// `MalformedFilterSpec` taxonomy ([`filters::FilterError`]): nothing
    /// is installed on failure.
    pub fn add_filter(&self, kind: FilterKind, spec: &str) -> Result<(), TraceError> {
        Ok(self.filters.add_spec(kind, spec)?)
    }

    /// Installs a prebuilt [`FilterRule`], for callers that need the
    /// non-default knobs such as [`FilterRule::anchored`].
    ///
    /// # Errors
    ///
    /// As [`add_filter`](Self::add_filter).
    pub fn install_filter(&self, rule: FilterRule) -> Result<(), TraceError> {
        Ok(self.filters.add(rule)?)
    }

    /// Clears the filter rule set, returning the context to deny-all.
    pub fn reset_filters(&self) {
        self.filters.reset();
    }

    /// Returns the number of installed filter rules.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Decides whether a write tagged with `id` and `tags` would emit.
    ///
    /// True iff the context is enabled AND the flag is enabled AND the
    /// filter engine admits `tags`. Lock-free; safe to call at any
    /// frequency.
    ///
    /// # Errors
    ///
    /// `UnknownFlag` when `id` was not issued by this context, whatever
    /// the switch states.
    pub fn should_emit(&self, id: FlagId, tags: &TagSet) -> Result<bool, TraceError> {
        let flag_enabled = self.registry.is_enabled(id)?;
        Ok(self.is_enabled() && flag_enabled && self.filters.evaluate(tags))
    }

    /// Writes one trace record through the emission gate.
    ///
    /// On admit, renders the record via the configured formatter and hands
    /// it to the sink together with `tags`; the sink is invoked with no
    /// configuration lock held. On deny this is a no-op: the formatter and
    /// the sink are never called, and `Ok(())` is returned, since a
    /// filtered-out write is expected steady-state behavior, not an error.
    ///
    /// Prefer the [`trace_write!`](crate::trace_write) macro at call
    /// sites; it also skips evaluating the format arguments while the
    /// context is disabled.
    ///
    /// # Errors
    ///
    /// `UnknownFlag` when `id` was not issued by this context.
    pub fn write(
        &self,
        id: FlagId,
        tags: &TagSet,
        args: fmt::Arguments<'_>,
    ) -> Result<(), TraceError> {
        if !self.should_emit(id, tags)? {
            return Ok(());
        }

        let flag = self.registry.flag(id)?;
        let record = self.formatter.render(&self.name, &flag, tags, args);
        debug::record_admitted(&self.name, flag.name());
        self.sink.emit(&record, tags);
        Ok(())
    }

    /// Replaces the sink. Configuration-time only, hence `&mut self`; the
    /// write fast path reads the handle without synchronization.
    pub fn set_sink(&mut self, sink: Box<dyn Sink>) {
        self.sink.flush();
        self.sink = sink;
    }

    /// Replaces the formatter. Configuration-time only.
    pub fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = formatter;
    }

    /// Applies a runtime flag-configuration command.
    ///
    /// Grammar: `component=[+|-]flag,...;component=...`. A bare or
    /// `+`-prefixed token enables its flag, `-` disables. The component
    /// `*` addresses every registered component and the flag token `all`
    /// every flag of its component, so `*=all` enables everything and
    /// `*=-all` disables everything. Empty directives are skipped, so a
    /// trailing `;` is harmless.
    ///
    /// Directives apply left to right: when a later directive fails,
    /// earlier ones have already taken effect.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` / `UnknownFlagName` for names this context does
    /// not know, and the malformed-directive variants of [`TraceError`]
    /// for grammar violations.
    pub fn configure(&self, command: &str) -> Result<(), TraceError> {
        for directive in command.split(';') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }
            let Some((component, tokens)) = directive.split_once('=') else {
                return Err(TraceError::MissingDirectiveSeparator {
                    directive: directive.to_owned(),
                });
            };

            let component = component.trim();
            if component == ANY_COMPONENT {
                for name in self.registry.components() {
                    self.apply_flag_tokens(&name, tokens, directive)?;
                }
            } else if self.registry.contains_component(component) {
                self.apply_flag_tokens(component, tokens, directive)?;
            } else {
                return Err(TraceError::UnknownComponent {
                    component: component.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn apply_flag_tokens(
        &self,
        component: &str,
        tokens: &str,
        directive: &str,
    ) -> Result<(), TraceError> {
        if tokens.trim().is_empty() {
            return Ok(());
        }
        let flags = self.registry.flags_of(component).unwrap_or_default();

        for token in tokens.split(',') {
            let token = token.trim();
            let (name, on) = match token.strip_prefix(['+', '-']) {
                Some(rest) => (rest, !token.starts_with('-')),
                None => (token, true),
            };
            if name.is_empty() {
                return Err(TraceError::EmptyFlagToken {
                    directive: directive.to_owned(),
                });
            }

            if name == ALL_FLAGS {
                for flag in &flags {
                    self.set_flag(flag.id(), on)?;
                }
            } else {
                let flag = flags.iter().find(|flag| flag.name() == name).ok_or_else(|| {
                    TraceError::UnknownFlagName {
                        component: component.to_owned(),
                        flag: name.to_owned(),
                    }
                })?;
                self.set_flag(flag.id(), on)?;
            }
        }
        Ok(())
    }
}

impl Drop for TraceContext {
    fn drop(&mut self) {
        self.sink.flush();
    }
}
