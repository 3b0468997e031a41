use regex::Regex;
use tags::TagSet;

use crate::{FilterError, FilterKind, FilterRule};

/// The reserved spec that matches unconditionally. Compared verbatim: the
/// wildcard is the whole spec, untrimmed, so `" all"` or `all=x` are
/// ordinary clause text.
pub(crate) const WILDCARD_SPEC: &str = "all";

/// One `key=pattern` test against the tag set.
#[derive(Clone, Debug)]
pub(crate) struct Clause {
    key: String,
    matcher: ClauseMatcher,
}

#[derive(Clone, Debug)]
enum ClauseMatcher {
    /// Tag value must equal the pattern exactly.
    Literal(String),
    /// Tag value must match the compiled pattern (unanchored search).
    Pattern(Regex),
}

impl Clause {
    /// A clause is satisfied when some tag carries the clause's key with a
    /// matching value. Duplicate keys each get a chance; a missing key fails
    /// the clause without being an error.
    fn matches(&self, tags: &TagSet) -> bool {
        tags.iter()
            .filter(|(key, _)| *key == self.key)
            .any(|(_, value)| match &self.matcher {
                ClauseMatcher::Literal(want) => value == want,
                ClauseMatcher::Pattern(regex) => regex.is_match(value),
            })
    }
}

/// How a compiled rule decides whether a tag set satisfies it.
#[derive(Clone, Debug)]
pub(crate) enum RuleMatcher {
    /// The reserved `all` wildcard: satisfied by every tag set.
    MatchAll,
    /// Conjunction of clauses: satisfied when every clause is.
    Clauses(Vec<Clause>),
}

/// A filter rule after parsing and pattern compilation.
///
/// Built once at install time; evaluation only walks the precompiled
/// clauses.
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    rule: FilterRule,
    matcher: RuleMatcher,
}

impl CompiledRule {
    /// Parses and compiles `rule`.
    ///
    /// The spec grammar is whitespace-separated `key=pattern` clauses.
    /// Whitespace is permitted around `=`, and a pattern may be quoted with
    /// `'` or `"` to include whitespace. The literal spec `all` compiles to
    /// the unconditional wildcard.
    pub(crate) fn new(rule: FilterRule) -> Result<Self, FilterError> {
        if rule.spec == WILDCARD_SPEC {
            return Ok(Self {
                rule,
                matcher: RuleMatcher::MatchAll,
            });
        }

        let clauses = parse_clauses(&rule.spec)?
            .into_iter()
            .map(|(key, pattern)| {
                let matcher = match rule.kind {
                    FilterKind::Exact => ClauseMatcher::Literal(pattern),
                    FilterKind::Regex => ClauseMatcher::Pattern(compile_pattern(
                        &pattern,
                        rule.anchored,
                    )?),
                };
                Ok(Clause { key, matcher })
            })
            .collect::<Result<Vec<_>, FilterError>>()?;

        Ok(Self {
            rule,
            matcher: RuleMatcher::Clauses(clauses),
        })
    }

    /// Returns whether `tags` satisfies the rule.
    pub(crate) fn matches(&self, tags: &TagSet) -> bool {
        match &self.matcher {
            RuleMatcher::MatchAll => true,
            RuleMatcher::Clauses(clauses) => clauses.iter().all(|clause| clause.matches(tags)),
        }
    }

    /// Returns the rule this was compiled from.
    pub(crate) const fn rule(&self) -> &FilterRule {
        &self.rule
    }

    /// Returns the number of clauses, with the wildcard counting as none.
    pub(crate) fn clause_count(&self) -> usize {
        match &self.matcher {
            RuleMatcher::MatchAll => 0,
            RuleMatcher::Clauses(clauses) => clauses.len(),
        }
    }
}

fn compile_pattern(pattern: &str, anchored: bool) -> Result<Regex, FilterError> {
    let source = if anchored {
        format!("^(?:{pattern})$")
    } else {
        pattern.to_owned()
    };
    Regex::new(&source).map_err(|source| FilterError::InvalidRegex {
        pattern: pattern.to_owned(),
        source,
    })
}

const fn is_spec_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Splits a spec into `(key, pattern)` clause pairs.
fn parse_clauses(spec: &str) -> Result<Vec<(String, String)>, FilterError> {
    let mut clauses = Vec::new();
    let mut rest = spec;

    loop {
        rest = rest.trim_start_matches(is_spec_space);
        if rest.is_empty() {
            break;
        }

        // The whitespace-delimited head of `rest`, for error reporting.
        let token = rest
            .split(is_spec_space)
            .next()
            .unwrap_or(rest)
            .to_owned();

        let key_end = rest
            .find(|c: char| is_spec_space(c) || c == '=')
            .unwrap_or(rest.len());
        let key = &rest[..key_end];

        let after_key = rest[key_end..].trim_start_matches(is_spec_space);
        let Some(after_sep) = after_key.strip_prefix('=') else {
            return Err(FilterError::MissingSeparator { token });
        };
        if key.is_empty() {
            return Err(FilterError::EmptyKey { token });
        }

        let after_sep = after_sep.trim_start_matches(is_spec_space);
        let (pattern, remainder) = match after_sep.chars().next() {
            Some(quote @ ('\'' | '"')) => {
                let body = &after_sep[1..];
                let Some(end) = body.find(quote) else {
                    return Err(FilterError::UnterminatedQuote { spec: spec.into() });
                };
                (body[..end].to_owned(), &body[end + 1..])
            }
            _ => {
                let end = after_sep.find(is_spec_space).unwrap_or(after_sep.len());
                (after_sep[..end].to_owned(), &after_sep[end..])
            }
        };

        clauses.push((key.to_owned(), pattern));
        rest = remainder;
    }

    if clauses.is_empty() {
        return Err(FilterError::EmptySpec);
    }
    Ok(clauses)
}
