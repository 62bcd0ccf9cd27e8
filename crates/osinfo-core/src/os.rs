//! # Operating Systems
//!
//! The OS is a product and a device host. Beyond its plain device links it
//! keeps links scoped to a platform ("on platform P this OS uses device D"),
//! stored apart from the unscoped ones, and owns its install media, install
//! trees and resource requirement lists.
//!
//! OS-to-OS relationships are not stored here; see
//! [`crate::relationship::RelationshipGraph`].

use crate::collection::Collection;
use crate::device::{Device, DeviceHost, DeviceLink, DeviceLinkList, DeviceList};
use crate::entity::Entity;
use crate::filter::{DeviceLinkFilter, Filter};
use crate::keys::{OS_DISTRO, OS_FAMILY};
use crate::media::{Media, MediaList, Resources, ResourcesList, Tree, TreeList};
use crate::product::{Platform, Product};
use crate::record::{Record, Shared};
use crate::{CatalogError, EntityKind};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct OsRecord {
    entity: Entity,
    links: DeviceLinkList,
    /// Platform id -> links that apply on that platform only.
    platform_links: BTreeMap<String, DeviceLinkList>,
    media: MediaList,
    trees: TreeList,
    minimum: ResourcesList,
    recommended: ResourcesList,
}

impl Record for OsRecord {
    const KIND: EntityKind = EntityKind::Os;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Product for OsRecord {}

impl DeviceHost for OsRecord {
    fn link_list(&self) -> &DeviceLinkList {
        &self.links
    }

    fn link_list_mut(&mut self) -> &mut DeviceLinkList {
        &mut self.links
    }
}

/// Shared handle to an operating system.
pub type Os = Shared<OsRecord>;

pub type OsList = Collection<OsRecord>;

impl Shared<OsRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(OsRecord {
            entity: Entity::new(id)?,
            links: DeviceLinkList::new(),
            platform_links: BTreeMap::new(),
            media: MediaList::new(),
            trees: TreeList::new(),
            minimum: ResourcesList::new(),
            recommended: ResourcesList::new(),
        }))
    }

    /// OS family, e.g. `linux` or `winnt`.
    #[must_use]
    pub fn family(&self) -> Option<String> {
        self.param_value(OS_FAMILY)
    }

    /// Distribution, e.g. `fedora`.
    #[must_use]
    pub fn distro(&self) -> Option<String> {
        self.param_value(OS_DISTRO)
    }

    // =========================================================================
    // PLATFORM-SCOPED DEVICES
    // =========================================================================

    /// Link `device` for use on `platform` only.
    ///
    /// Scoped links never show up in [`Shared::devices`] or
    /// [`Shared::device_links`].
    pub fn add_device_for_platform(&self, platform: &Platform, device: &Device) -> DeviceLink {
        let link = DeviceLink::new(device);
        let platform_id = platform.id();
        debug!(
            os = %self.id(),
            platform = %platform_id,
            device = %device.id(),
            "platform device link added"
        );
        self.record_mut()
            .platform_links
            .entry(platform_id)
            .or_default()
            .add(link.clone());
        link
    }

    /// Devices linked for `platform` passing `filter`, in link order.
    #[must_use]
    pub fn devices_for_platform(
        &self,
        platform: &Platform,
        filter: Option<&Filter>,
    ) -> DeviceList {
        self.record()
            .platform_links
            .get(&platform.id())
            .map(|links| links.devices(filter))
            .unwrap_or_default()
    }

    /// Links scoped to `platform` whose device passes `filter`.
    #[must_use]
    pub fn device_links_for_platform(
        &self,
        platform: &Platform,
        filter: Option<&Filter>,
    ) -> DeviceLinkList {
        let record = self.record();
        let Some(links) = record.platform_links.get(&platform.id()) else {
            return DeviceLinkList::new();
        };
        match filter {
            Some(filter) => {
                let by_target = DeviceLinkFilter::new(filter.clone());
                DeviceLinkList::new_filtered(links, &by_target)
            }
            None => DeviceLinkList::new_copy(links),
        }
    }

    /// First link passing `filter`, taken from the platform-scoped links when
    /// `platform` is given and from the unscoped links otherwise.
    #[must_use]
    pub fn preferred_device_link(
        &self,
        platform: Option<&Platform>,
        filter: Option<&Filter>,
    ) -> Option<DeviceLink> {
        let links = match platform {
            Some(platform) => self.device_links_for_platform(platform, filter),
            None => self.device_links(filter),
        };
        links.get_nth(0)
    }

    /// Target of [`Shared::preferred_device_link`].
    #[must_use]
    pub fn preferred_device(
        &self,
        platform: Option<&Platform>,
        filter: Option<&Filter>,
    ) -> Option<Device> {
        self.preferred_device_link(platform, filter).map(|link| link.target())
    }

    // =========================================================================
    // MEDIA, TREES, RESOURCES
    // =========================================================================

    pub fn add_media(&self, media: &Media) {
        self.record_mut().media.add(media.clone());
    }

    #[must_use]
    pub fn media_list(&self) -> MediaList {
        MediaList::new_copy(&self.record().media)
    }

    pub fn add_tree(&self, tree: &Tree) {
        self.record_mut().trees.add(tree.clone());
    }

    #[must_use]
    pub fn tree_list(&self) -> TreeList {
        TreeList::new_copy(&self.record().trees)
    }

    pub fn add_minimum_resources(&self, resources: &Resources) {
        self.record_mut().minimum.add(resources.clone());
    }

    #[must_use]
    pub fn minimum_resources(&self) -> ResourcesList {
        ResourcesList::new_copy(&self.record().minimum)
    }

    pub fn add_recommended_resources(&self, resources: &Resources) {
        self.record_mut().recommended.add(resources.clone());
    }

    #[must_use]
    pub fn recommended_resources(&self) -> ResourcesList {
        ResourcesList::new_copy(&self.record().recommended)
    }
}

// =============================================================================
// TESTS
// =============================================================================
