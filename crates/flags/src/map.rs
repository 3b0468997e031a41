use crate::FlagId;

/// Ordered mapping from flag name to [`FlagId`], returned by registration.
///
/// Entries appear in declaration order, which is also id-assignment order.
/// The map is immutable: a component's flags are fixed once registered.
///
/// # Examples
///
/// ```
/// use flags::FlagRegistry;
///
/// let registry = FlagRegistry::new();
/// let map = registry
///     .register("engine", &[("setup", ""), ("media", "")])
///     .unwrap();
///
/// assert_eq!(map.len(), 2);
/// assert!(map.get("setup").is_some());
/// assert!(map.get("teardown").is_none());
///
/// let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["setup", "media"]);
/// ```
#[derive(Clone, Debug)]
pub struct FlagMap {
    entries: Vec<(String, FlagId)>,
}

impl FlagMap {
    pub(crate) fn new(entries: Vec<(String, FlagId)>) -> Self {
        Self { entries }
    }

    /// Returns the id assigned to `name`, if the component declared it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FlagId> {
        self.entries
            .iter()
            .find(|(flag, _)| flag == name)
            .map(|(_, id)| *id)
    }

    /// Iterates `(name, id)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FlagId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Iterates the assigned ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.entries.iter().map(|(_, id)| *id)
    }

    /// Returns the number of flags the component declared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the component declared no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FlagMap {
    type Item = (&'a str, FlagId);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, FlagId)>,
        fn(&'a (String, FlagId)) -> (&'a str, FlagId),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }
}
