//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Construction-time settings for a [`Registry`](crate::Registry).
///
/// Derives serde so an embedding application can carry it in its own
/// configuration file; this crate never reads files itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Number of entries to reserve space for in both tables.
    pub initial_capacity: usize,
}

impl RegistryConfig {
    /// Returns a config reserving room for `initial_capacity` entries.
    #[must_use]
    pub const fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}
