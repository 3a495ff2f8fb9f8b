//! Element identity.
//!
//! Hosts, scenarios and logs all refer to elements by name. Names are
//! interned once, so an [`ElementId`] is a 4-byte `Copy` key for the
//! controller's maps while still resolving back to the name the host gave.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Key for behavior records, handler registrations and drag sessions.
///
/// Equality and hashing use the interned key. Ordering follows the name,
/// so reports keyed by element come out alphabetically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(name: &str) -> Self {
        Self(NAMES.get_or_intern(name))
    }

    /// The host-facing name. Lives as long as the process.
    pub fn name(self) -> &'static str {
        NAMES.resolve(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::intern(name)
    }
}

impl Ord for ElementId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.name().cmp(other.name())
    }
}

impl PartialOrd for ElementId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name())
    }
}

// Serialized as the bare name, so ids work as JSON map keys.
impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::intern(&name))
    }
}
