use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{FlagId, FlagMap, RegistryError};

/// Serial source for registry discriminants. Ids carry the serial of the
/// registry that issued them, so two registries never accept each other's
/// ids even when the slot indices line up.
static NEXT_SERIAL: AtomicU32 = AtomicU32::new(1);

/// One registered flag: owning component, description, and live state.
#[derive(Debug)]
struct FlagEntry {
    name: String,
    component: String,
    description: String,
    enabled: AtomicBool,
}

/// The published registry table. Replaced wholesale on registration;
/// individual enable bits flip in place through the shared entries.
#[derive(Debug, Default)]
struct FlagTable {
    entries: Vec<Arc<FlagEntry>>,
    /// Component name to the slot range of its flags, insertion-ordered.
    components: Vec<(String, std::ops::Range<usize>)>,
    by_component: FxHashMap<String, usize>,
}

/// Cheap introspection handle for one registered flag.
///
/// Holds a shared reference to the live entry: [`is_enabled`](Self::is_enabled)
/// reads the current state, not a snapshot taken when the handle was
/// created.
#[derive(Clone, Debug)]
pub struct Flag {
    id: FlagId,
    entry: Arc<FlagEntry>,
}

impl Flag {
    /// The flag's identifier.
    #[must_use]
    pub const fn id(&self) -> FlagId {
        self.id
    }

    /// The flag's name within its component.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The name of the component that declared the flag.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.entry.component
    }

    /// The human description supplied at registration.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.entry.description
    }

    /// The flag's current state.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.entry.enabled.load(Ordering::Acquire)
    }
}

/// Registry of components and the flags they declared.
///
/// Registration resolves names to opaque [`FlagId`]s once; every later
/// state test is an index into an atomically published table. See the
/// crate docs for the concurrency model.
#[derive(Debug)]
pub struct FlagRegistry {
    serial: u32,
    table: ArcSwap<FlagTable>,
    writer: Mutex<()>,
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            table: ArcSwap::from_pointee(FlagTable::default()),
            writer: Mutex::new(()),
        }
    }

    /// Registers `component` and its ordered `(name, description)` flags.
    ///
    /// Ids are fresh, never reused, and assigned in input order. All flags
    /// start disabled.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateComponent`] when the component name is
    /// taken, [`RegistryError::DuplicateFlag`] when two flags in this call
    /// share a name. Either way nothing is committed: no ids are allocated
    /// and the registry is unchanged.
    pub fn register(
        &self,
        component: &str,
        flags: &[(&str, &str)],
    ) -> Result<FlagMap, RegistryError> {
        let guard = self.writer.lock();
        let current = self.table.load_full();

        if current.by_component.contains_key(component) {
            return Err(RegistryError::DuplicateComponent {
                component: component.to_owned(),
            });
        }
        for (i, (name, _)) in flags.iter().enumerate() {
            if flags[..i].iter().any(|(seen, _)| seen == name) {
                return Err(RegistryError::DuplicateFlag {
                    component: component.to_owned(),
                    flag: (*name).to_owned(),
                });
            }
        }

        let start = current.entries.len();
        let mut entries = current.entries.clone();
        let mut map = Vec::with_capacity(flags.len());
        for (name, description) in flags {
            let id = FlagId::new(self.serial, entries.len());
            entries.push(Arc::new(FlagEntry {
                name: (*name).to_owned(),
                component: component.to_owned(),
                description: (*description).to_owned(),
                enabled: AtomicBool::new(false),
            }));
            map.push(((*name).to_owned(), id));
        }

        let mut components = current.components.clone();
        components.push((component.to_owned(), start..entries.len()));
        let mut by_component = current.by_component.clone();
        by_component.insert(component.to_owned(), components.len() - 1);

        self.table.store(Arc::new(FlagTable {
            entries,
            components,
            by_component,
        }));
        drop(guard);

        Ok(FlagMap::new(map))
    }

    /// Sets the flag's state, returning the previous state.
    ///
    /// A no-op when the flag is already in the requested state. The change
    /// is visible to every subsequent [`is_enabled`](Self::is_enabled)
    /// call, registry-wide.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownFlag`] when `id` was not issued by this
    /// registry.
    pub fn set(&self, id: FlagId, on: bool) -> Result<bool, RegistryError> {
        let table = self.table.load();
        let entry = self.lookup(&table, id)?;
        Ok(entry.enabled.swap(on, Ordering::AcqRel))
    }

    /// Returns the flag's current state. Lock-free.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownFlag`] when `id` was not issued by this
    /// registry.
    pub fn is_enabled(&self, id: FlagId) -> Result<bool, RegistryError> {
        let table = self.table.load();
        let entry = self.lookup(&table, id)?;
        Ok(entry.enabled.load(Ordering::Acquire))
    }

    /// Returns an introspection handle for the flag.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownFlag`] when `id` was not issued by this
    /// registry.
    pub fn flag(&self, id: FlagId) -> Result<Flag, RegistryError> {
        let table = self.table.load();
        let entry = self.lookup(&table, id)?;
        Ok(Flag {
            id,
            entry: Arc::clone(entry),
        })
    }

    /// Returns the registered component names, in registration order.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        self.table
            .load()
            .components
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Returns handles for every flag `component` declared, in declaration
    /// order, or `None` when the component is not registered.
    #[must_use]
    pub fn flags_of(&self, component: &str) -> Option<Vec<Flag>> {
        let table = self.table.load();
        let index = *table.by_component.get(component)?;
        let (_, range) = &table.components[index];
        Some(
            range
                .clone()
                .map(|slot| Flag {
                    id: FlagId::new(self.serial, slot),
                    entry: Arc::clone(&table.entries[slot]),
                })
                .collect(),
        )
    }

    /// Returns whether `component` is registered.
    #[must_use]
    pub fn contains_component(&self, component: &str) -> bool {
        self.table.load().by_component.contains_key(component)
    }

    /// Returns the total number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.load().entries.len()
    }

    /// Returns whether no flags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.load().entries.is_empty()
    }

    fn lookup<'t>(
        &self,
        table: &'t FlagTable,
        id: FlagId,
    ) -> Result<&'t Arc<FlagEntry>, RegistryError> {
        if id.serial() != self.serial {
            return Err(RegistryError::UnknownFlag { id });
        }
        table
            .entries
            .get(id.slot())
            .ok_or(RegistryError::UnknownFlag { id })
    }
}
