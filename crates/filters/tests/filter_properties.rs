//! Property tests for the spec parser and evaluator.
//!
//! The parser must reject or accept arbitrary input without panicking, and
//! a handful of algebraic properties must hold for every tag set.

use filters::{FilterEngine, FilterKind, FilterRule, FilterSet};
use proptest::prelude::*;
use tags::TagSet;

fn arb_tag_set() -> impl Strategy<Value = TagSet> {
    proptest::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}"), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    /// Parsing arbitrary specs returns Ok or Err, never panics.
    #[test]
    fn parsing_never_panics(spec in "\\PC{0,64}") {
        let _ = FilterSet::from_rules([FilterRule::exact(&spec)]);
        let _ = FilterSet::from_rules([FilterRule::regex(&spec)]);
    }

    /// Evaluation of arbitrary tag sets never panics, whatever the rules.
    #[test]
    fn evaluation_never_panics(tags in arb_tag_set()) {
        let engine = FilterEngine::new();
        engine.add_spec(FilterKind::Exact, "i=10 j=7").unwrap();
        engine.add_spec(FilterKind::Regex, "k=^(a|b)").unwrap();
        let _ = engine.evaluate(&tags);
    }

    /// The installed wildcard admits every tag set.
    #[test]
    fn wildcard_admits_everything(tags in arb_tag_set()) {
        let engine = FilterEngine::new();
        engine.add_spec(FilterKind::Exact, "all").unwrap();
        prop_assert!(engine.evaluate(&tags));
    }

    /// The empty engine denies every tag set.
    #[test]
    fn empty_engine_denies_everything(tags in arb_tag_set()) {
        let engine = FilterEngine::new();
        prop_assert!(!engine.evaluate(&tags));
    }

    /// An exact rule built from a tag's own key and value admits any tag
    /// set containing that tag.
    #[test]
    fn exact_rule_admits_its_own_tag(
        key in "[a-z]{1,8}",
        value in "[a-zA-Z0-9]{1,12}",
        tags in arb_tag_set(),
    ) {
        let engine = FilterEngine::new();
        engine.add_spec(FilterKind::Exact, &format!("{key}={value}")).unwrap();

        let mut tags = tags;
        tags.insert(&key, &value);
        prop_assert!(engine.evaluate(&tags));
    }
}
