//! # osinfo-core
//!
//! An in-memory catalog of operating systems, platforms, hypervisors,
//! devices, install media and deployments.
//!
//! The crate covers the entity/property model, the collection algebra
//! (copy, filter, intersection, union), the constraint-matching filters and
//! the OS relationship graph. Populating the catalog from data files is left
//! to an external loader that drives the mutation API.
//!
//! ## Architectural Constraints
//!
//! - Single-threaded: records are `Rc`-shared with interior mutability, and
//!   callers serialize access.
//! - Shared records: every collection, device link and catalog slot holding
//!   an entity points at the same record, so writes are visible everywhere.
//! - Deterministic: `BTreeMap`/`BTreeSet` only, no `HashMap`.
//! - No I/O outside configuration loading.

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod collection;
pub mod config;
pub mod deployment;
pub mod device;
pub mod entity;
pub mod filter;
pub mod keys;
pub mod media;
pub mod os;
pub mod product;
pub mod record;
pub mod relationship;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CatalogError, EntityKind, Relationship, ValueScope};

// =============================================================================
// RE-EXPORTS: Entity Model
// =============================================================================

pub use collection::Collection;
pub use entity::{Entity, ParamMap};
pub use record::{Record, Shared};

// =============================================================================
// RE-EXPORTS: Entity Kinds
// =============================================================================

pub use deployment::{Deployment, DeploymentList, DeploymentRecord};
pub use device::{
    Device, DeviceHost, DeviceLink, DeviceLinkList, DeviceLinkRecord, DeviceList, DeviceRecord,
};
pub use media::{
    Media, MediaList, MediaRecord, Resources, ResourcesList, ResourcesRecord, Tree, TreeList,
    TreeRecord,
};
pub use os::{Os, OsList, OsRecord};
pub use product::{
    Hypervisor, HypervisorList, HypervisorRecord, Platform, PlatformList, PlatformRecord, Product,
};

// =============================================================================
// RE-EXPORTS: Queries
// =============================================================================

pub use catalog::Catalog;
pub use config::{CatalogConfig, DUPLICATE_EDGES_ENV};
pub use filter::{BoundOsFilter, DeviceLinkFilter, Filter, Matcher, OsFilter, ProductFilter};
pub use relationship::{DuplicateEdgePolicy, Edge, RelationshipGraph};
