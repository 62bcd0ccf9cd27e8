//! # Products
//!
//! OSes, platforms and hypervisors share a product surface: name, vendor,
//! version and lifecycle dates. Platforms and hypervisors are defined here;
//! the OS lives in [`crate::os`].

use crate::collection::Collection;
use crate::device::{DeviceHost, DeviceLinkList};
use crate::entity::Entity;
use crate::keys::{
    PRODUCT_CODENAME, PRODUCT_EOL_DATE, PRODUCT_NAME, PRODUCT_RELEASE_DATE, PRODUCT_SHORT_ID,
    PRODUCT_VENDOR, PRODUCT_VERSION,
};
use crate::record::{Record, Shared};
use crate::{CatalogError, EntityKind};
use chrono::NaiveDate;

// =============================================================================
// PRODUCT TRAIT
// =============================================================================

/// Marker for record kinds that describe a product.
pub trait Product: Record {}

impl<R: Product> Shared<R> {
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.param_value(PRODUCT_NAME)
    }

    /// Short identifier used on command lines, e.g. `fedora11`.
    #[must_use]
    pub fn short_id(&self) -> Option<String> {
        self.param_value(PRODUCT_SHORT_ID)
    }

    #[must_use]
    pub fn vendor(&self) -> Option<String> {
        self.param_value(PRODUCT_VENDOR)
    }

    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.param_value(PRODUCT_VERSION)
    }

    #[must_use]
    pub fn codename(&self) -> Option<String> {
        self.param_value(PRODUCT_CODENAME)
    }

    /// Release date; `None` when missing or not `YYYY-MM-DD`.
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.entity().param_value_date(PRODUCT_RELEASE_DATE).ok()
    }

    /// End-of-life date; `None` when missing or not `YYYY-MM-DD`.
    #[must_use]
    pub fn eol_date(&self) -> Option<NaiveDate> {
        self.entity().param_value_date(PRODUCT_EOL_DATE).ok()
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

#[derive(Debug, Clone)]
pub struct PlatformRecord {
    entity: Entity,
    links: DeviceLinkList,
}

impl Record for PlatformRecord {
    const KIND: EntityKind = EntityKind::Platform;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Product for PlatformRecord {}

impl DeviceHost for PlatformRecord {
    fn link_list(&self) -> &DeviceLinkList {
        &self.links
    }

    fn link_list_mut(&mut self) -> &mut DeviceLinkList {
        &mut self.links
    }
}

/// Shared handle to a virtualization platform.
pub type Platform = Shared<PlatformRecord>;

pub type PlatformList = Collection<PlatformRecord>;

impl Shared<PlatformRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(PlatformRecord {
            entity: Entity::new(id)?,
            links: DeviceLinkList::new(),
        }))
    }
}

// =============================================================================
// HYPERVISOR
// =============================================================================

#[derive(Debug, Clone)]
pub struct HypervisorRecord {
    entity: Entity,
    links: DeviceLinkList,
}

impl Record for HypervisorRecord {
    const KIND: EntityKind = EntityKind::Hypervisor;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Product for HypervisorRecord {}

impl DeviceHost for HypervisorRecord {
    fn link_list(&self) -> &DeviceLinkList {
        &self.links
    }

    fn link_list_mut(&mut self) -> &mut DeviceLinkList {
        &mut self.links
    }
}

/// Shared handle to a hypervisor.
pub type Hypervisor = Shared<HypervisorRecord>;

pub type HypervisorList = Collection<HypervisorRecord>;

impl Shared<HypervisorRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(HypervisorRecord {
            entity: Entity::new(id)?,
            links: DeviceLinkList::new(),
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Device;

    #[test]
    fn product_accessors() {
        let hv = Hypervisor::new("http://qemu.org/qemu-kvm-0.11.0").expect("hypervisor");
        hv.set_param(PRODUCT_NAME, "KVM");
        hv.set_param(PRODUCT_SHORT_ID, "kvm");
        hv.set_param(PRODUCT_VENDOR, "Red Hat");
        hv.set_param(PRODUCT_VERSION, "0.11.0");

        assert_eq!(hv.name().as_deref(), Some("KVM"));
        assert_eq!(hv.short_id().as_deref(), Some("kvm"));
        assert_eq!(hv.vendor().as_deref(), Some("Red Hat"));
        assert_eq!(hv.version().as_deref(), Some("0.11.0"));
        assert_eq!(hv.codename(), None);
        assert_eq!(hv.kind(), EntityKind::Hypervisor);
    }

    #[test]
    fn lifecycle_dates_parse_or_vanish() {
        let platform = Platform::new("magical").expect("platform");
        platform.set_param(PRODUCT_RELEASE_DATE, "2011-02-28");
        platform.set_param(PRODUCT_EOL_DATE, "soon");

        assert_eq!(platform.release_date(), NaiveDate::from_ymd_opt(2011, 2, 28));
        assert_eq!(platform.eol_date(), None);
    }

    #[test]
    fn platform_hosts_devices() {
        let platform = Platform::new("magical").expect("platform");
        let dev = Device::new("virtio-net").expect("device");
        let link = platform.add_device(&dev);
        link.set_param("driver", "virtio_net");

        let links = platform.device_links(None);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links.get_nth(0).expect("nth").driver().as_deref(),
            Some("virtio_net")
        );
        assert_eq!(platform.devices(None).ids(), vec!["virtio-net"]);
    }
}
