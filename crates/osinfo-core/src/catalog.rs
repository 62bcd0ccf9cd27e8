//! # Catalog
//!
//! The top-level store: canonical collections of every top-level kind plus
//! the OS relationship graph.
//!
//! A loader fills the catalog through the `add_*` methods; readers derive
//! filtered collections from the canonical ones and run the cross-cutting
//! queries below. Lookups by id scan linearly and return the first match.

use crate::config::CatalogConfig;
use crate::deployment::{Deployment, DeploymentList};
use crate::device::{Device, DeviceList};
use crate::filter::OsFilter;
use crate::os::{Os, OsList};
use crate::product::{Hypervisor, HypervisorList, Platform, PlatformList};
use crate::relationship::RelationshipGraph;
use crate::{CatalogError, Relationship, ValueScope};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    oses: OsList,
    platforms: PlatformList,
    hypervisors: HypervisorList,
    devices: DeviceList,
    deployments: DeploymentList,
    relationships: RelationshipGraph,
}

impl Catalog {
    /// Empty catalog with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            relationships: RelationshipGraph::with_policy(config.duplicate_edges),
            ..Self::default()
        }
    }

    // =========================================================================
    // LOADER SURFACE
    // =========================================================================

    pub fn add_os(&mut self, os: Os) {
        debug!(id = %os.id(), "os registered");
        self.oses.add(os);
    }

    pub fn add_platform(&mut self, platform: Platform) {
        debug!(id = %platform.id(), "platform registered");
        self.platforms.add(platform);
    }

    pub fn add_hypervisor(&mut self, hypervisor: Hypervisor) {
        debug!(id = %hypervisor.id(), "hypervisor registered");
        self.hypervisors.add(hypervisor);
    }

    pub fn add_device(&mut self, device: Device) {
        debug!(id = %device.id(), "device registered");
        self.devices.add(device);
    }

    pub fn add_deployment(&mut self, deployment: Deployment) {
        debug!(id = %deployment.id(), "deployment registered");
        self.deployments.add(deployment);
    }

    /// Record "`subject` `verb` `other_id`" in the catalog graph.
    pub fn add_relationship(
        &mut self,
        subject: &Os,
        other_id: &str,
        verb: Relationship,
    ) -> Result<(), CatalogError> {
        self.relationships.add_relationship(subject, other_id, verb)
    }

    /// Remove all edges from `subject` to `other_id`.
    pub fn clear_relationships(&mut self, subject: &Os, other_id: &str) -> usize {
        self.relationships.clear_relationships(subject, other_id)
    }

    /// Remove all edges whose subject is `subject`.
    pub fn clear_all_relationships(&mut self, subject: &Os) -> usize {
        self.relationships.clear_all_relationships(subject)
    }

    // =========================================================================
    // CANONICAL COLLECTIONS
    // =========================================================================

    #[must_use]
    pub fn os_list(&self) -> &OsList {
        &self.oses
    }

    #[must_use]
    pub fn platform_list(&self) -> &PlatformList {
        &self.platforms
    }

    #[must_use]
    pub fn hypervisor_list(&self) -> &HypervisorList {
        &self.hypervisors
    }

    #[must_use]
    pub fn device_list(&self) -> &DeviceList {
        &self.devices
    }

    #[must_use]
    pub fn deployment_list(&self) -> &DeploymentList {
        &self.deployments
    }

    #[must_use]
    pub fn relationships(&self) -> &RelationshipGraph {
        &self.relationships
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    #[must_use]
    pub fn os(&self, id: &str) -> Option<Os> {
        self.oses.find_by_id(id)
    }

    #[must_use]
    pub fn platform(&self, id: &str) -> Option<Platform> {
        self.platforms.find_by_id(id)
    }

    #[must_use]
    pub fn hypervisor(&self, id: &str) -> Option<Hypervisor> {
        self.hypervisors.find_by_id(id)
    }

    #[must_use]
    pub fn device(&self, id: &str) -> Option<Device> {
        self.devices.find_by_id(id)
    }

    #[must_use]
    pub fn deployment(&self, id: &str) -> Option<Deployment> {
        self.deployments.find_by_id(id)
    }

    /// First deployment binding `os` to `platform`.
    #[must_use]
    pub fn find_deployment(&self, os: &Os, platform: &Platform) -> Option<Deployment> {
        self.deployments
            .iter()
            .find(|deployment| deployment.binds(os, platform))
            .cloned()
    }

    // =========================================================================
    // AGGREGATE QUERIES
    // =========================================================================

    /// Distinct first values of `key` across all OSes, sorted.
    #[must_use]
    pub fn unique_values_for_property_in_os(&self, key: &str) -> Vec<String> {
        self.oses.unique_values(key, ValueScope::First)
    }

    #[must_use]
    pub fn unique_values_for_property_in_platform(&self, key: &str) -> Vec<String> {
        self.platforms.unique_values(key, ValueScope::First)
    }

    #[must_use]
    pub fn unique_values_for_property_in_hypervisor(&self, key: &str) -> Vec<String> {
        self.hypervisors.unique_values(key, ValueScope::First)
    }

    #[must_use]
    pub fn unique_values_for_property_in_device(&self, key: &str) -> Vec<String> {
        self.devices.unique_values(key, ValueScope::First)
    }

    /// OSes that `os` relates to by `verb` (edge objects).
    #[must_use]
    pub fn related_oses(&self, os: &Os, verb: Relationship) -> OsList {
        self.resolve_oses(self.relationships.related(&os.id(), verb))
    }

    /// OSes that relate to `other_id` by `verb` (edge subjects).
    #[must_use]
    pub fn oses_related_to(&self, other_id: &str, verb: Relationship) -> OsList {
        self.resolve_oses(self.relationships.related_to(other_id, verb))
    }

    /// Canonical OSes that are the subject of at least one `verb` edge, in
    /// OS list order.
    #[must_use]
    pub fn unique_values_for_os_relationship(&self, verb: Relationship) -> OsList {
        self.oses
            .iter()
            .filter(|os| !self.relationships.related(&os.id(), verb).is_empty())
            .cloned()
            .collect()
    }

    /// Canonical OSes accepted by `filter`, evaluated against this catalog's
    /// relationship graph.
    #[must_use]
    pub fn oses_matching(&self, filter: &OsFilter) -> OsList {
        OsList::new_filtered(&self.oses, &filter.bind(&self.relationships))
    }

    fn resolve_oses(&self, ids: Vec<String>) -> OsList {
        ids.into_iter()
            .filter_map(|id| {
                let found = self.os(&id);
                if found.is_none() {
                    trace!(%id, "edge refers to unknown os, skipped");
                }
                found
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
