/// Opaque identifier for one registered flag.
///
/// Ids are issued by [`FlagRegistry::register`](crate::FlagRegistry::register)
/// in declaration order and are unique within their registry. An id also
/// encodes which registry issued it, so presenting it to another registry
/// fails with [`RegistryError::UnknownFlag`](crate::RegistryError::UnknownFlag)
/// instead of addressing an unrelated flag that happens to share the slot.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagId {
    serial: u32,
    slot: usize,
}

impl FlagId {
    pub(crate) const fn new(serial: u32, slot: usize) -> Self {
        Self { serial, slot }
    }

    /// The issuing registry's serial.
    pub(crate) const fn serial(self) -> u32 {
        self.serial
    }

    /// The flag's index in the issuing registry's table.
    pub(crate) const fn slot(self) -> usize {
        self.slot
    }
}
