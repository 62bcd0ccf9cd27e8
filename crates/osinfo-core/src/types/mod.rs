//! # Core Type Definitions
//!
//! Small value types shared by every layer of the catalog:
//! - Entity kind tags (`EntityKind`)
//! - OS relationship verbs (`Relationship`)
//! - Property value scoping for aggregate queries (`ValueScope`)
//! - Error types (`CatalogError`)
//!
//! ## Determinism Guarantees
//!
//! Every enum here implements `Ord` so it can key a `BTreeMap`/`BTreeSet`
//! and iterate in a stable order.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ENTITY KINDS
// =============================================================================

/// The closed set of entity kinds held by the catalog.
///
/// Every collection holds exactly one kind; the kind is carried by the
/// element type, this tag only exists for diagnostics and introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Os,
    Platform,
    Hypervisor,
    Device,
    DeviceLink,
    Media,
    Tree,
    Resources,
    Deployment,
}

impl EntityKind {
    /// Stable lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Os => "os",
            Self::Platform => "platform",
            Self::Hypervisor => "hypervisor",
            Self::Device => "device",
            Self::DeviceLink => "device-link",
            Self::Media => "media",
            Self::Tree => "tree",
            Self::Resources => "resources",
            Self::Deployment => "deployment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RELATIONSHIPS
// =============================================================================

/// Verb of a directed OS-to-OS relationship.
///
/// "A upgrades B" is stored with A as subject and B as object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relationship {
    DerivesFrom,
    Upgrades,
    Clones,
}

impl Relationship {
    /// All verbs, in declaration order.
    pub const ALL: [Self; 3] = [Self::DerivesFrom, Self::Upgrades, Self::Clones];

    /// Name used by data files for this verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DerivesFrom => "derives-from",
            Self::Upgrades => "upgrades",
            Self::Clones => "clones",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidVerb(s.to_string()))
    }
}

// =============================================================================
// VALUE SCOPE
// =============================================================================

/// Which values of a multi-valued property an aggregate query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueScope {
    /// Only the first value of each entity.
    #[default]
    First,
    /// Every value of each entity.
    All,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the catalog core.
///
/// Lookup misses are reported as `Option::None` or empty collections by the
/// query APIs; `NotFound` only surfaces from strict typed accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A strict lookup found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A typed property accessor could not parse the stored string.
    #[error("Type mismatch for '{key}': '{value}' is not a valid {expected}")]
    TypeMismatch {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// A caller passed a value the core cannot accept (e.g. an empty id).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A relationship verb string did not name a known verb.
    #[error("Invalid relationship verb: '{0}'")]
    InvalidVerb(String),

    /// The same (subject, verb, object) edge was inserted twice.
    #[error("Duplicate edge: {subject} {verb} {object}")]
    DuplicateEdge {
        subject: String,
        verb: Relationship,
        object: String,
    },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
