//! # Devices and Device Links
//!
//! A [`DeviceLink`] ties a parent entity to a shared [`Device`] and carries
//! its own link-scoped properties such as `driver`. Its id is the target
//! device's id.
//!
//! Parents implement [`DeviceHost`]; the generic methods on `Shared<R>` give
//! every host the same `add_device` / `devices` / `device_links` surface.
//! Filters passed to those methods are evaluated against the target device,
//! never against the link.

use crate::collection::Collection;
use crate::entity::Entity;
use crate::filter::{DeviceLinkFilter, Filter};
use crate::keys::{
    DEVICE_BUS_TYPE, DEVICE_CLASS, DEVICE_LINK_DRIVER, DEVICE_NAME, DEVICE_PRODUCT,
    DEVICE_PRODUCT_ID, DEVICE_SUBSYSTEM, DEVICE_VENDOR, DEVICE_VENDOR_ID,
};
use crate::record::{Record, Shared};
use crate::{CatalogError, EntityKind};
use tracing::debug;

// =============================================================================
// DEVICE
// =============================================================================

#[derive(Debug, Clone)]
pub struct DeviceRecord {
    entity: Entity,
}

impl Record for DeviceRecord {
    const KIND: EntityKind = EntityKind::Device;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Shared handle to a hardware device description.
pub type Device = Shared<DeviceRecord>;

pub type DeviceList = Collection<DeviceRecord>;

impl Shared<DeviceRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(DeviceRecord {
            entity: Entity::new(id)?,
        }))
    }

    #[must_use]
    pub fn vendor(&self) -> Option<String> {
        self.param_value(DEVICE_VENDOR)
    }

    /// Bus-specific vendor id, e.g. `0x8086` for PCI.
    #[must_use]
    pub fn vendor_id(&self) -> Option<String> {
        self.param_value(DEVICE_VENDOR_ID)
    }

    #[must_use]
    pub fn product(&self) -> Option<String> {
        self.param_value(DEVICE_PRODUCT)
    }

    #[must_use]
    pub fn product_id(&self) -> Option<String> {
        self.param_value(DEVICE_PRODUCT_ID)
    }

    #[must_use]
    pub fn bus_type(&self) -> Option<String> {
        self.param_value(DEVICE_BUS_TYPE)
    }

    #[must_use]
    pub fn class(&self) -> Option<String> {
        self.param_value(DEVICE_CLASS)
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.param_value(DEVICE_NAME)
    }

    #[must_use]
    pub fn subsystem(&self) -> Option<String> {
        self.param_value(DEVICE_SUBSYSTEM)
    }
}

// =============================================================================
// DEVICE LINK
// =============================================================================

#[derive(Debug, Clone)]
pub struct DeviceLinkRecord {
    entity: Entity,
    target: Device,
}

impl Record for DeviceLinkRecord {
    const KIND: EntityKind = EntityKind::DeviceLink;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Shared handle to a parent-to-device association.
pub type DeviceLink = Shared<DeviceLinkRecord>;

pub type DeviceLinkList = Collection<DeviceLinkRecord>;

impl Shared<DeviceLinkRecord> {
    /// Link to `target` with no link-scoped properties.
    #[must_use]
    pub fn new(target: &Device) -> Self {
        let entity = Entity::sharing_id(&target.entity());
        Self::from_record(DeviceLinkRecord {
            entity,
            target: target.clone(),
        })
    }

    /// The linked device.
    #[must_use]
    pub fn target(&self) -> Device {
        self.record().target.clone()
    }

    /// Driver the parent uses for the device.
    #[must_use]
    pub fn driver(&self) -> Option<String> {
        self.param_value(DEVICE_LINK_DRIVER)
    }
}

impl Collection<DeviceLinkRecord> {
    /// Targets of the links whose device passes `filter`, in link order.
    #[must_use]
    pub fn devices(&self, filter: Option<&Filter>) -> DeviceList {
        self.iter()
            .map(|link| link.target())
            .filter(|device| filter.is_none_or(|f| f.matches(&device.entity())))
            .collect()
    }
}

// =============================================================================
// DEVICE HOST
// =============================================================================

/// A record kind that owns a list of device links.
pub trait DeviceHost: Record {
    fn link_list(&self) -> &DeviceLinkList;

    fn link_list_mut(&mut self) -> &mut DeviceLinkList;
}

impl<R: DeviceHost> Shared<R> {
    /// Append a link to `device` and return it for link-scoped properties.
    ///
    /// Adding the same device twice yields two links.
    pub fn add_device(&self, device: &Device) -> DeviceLink {
        let link = DeviceLink::new(device);
        debug!(
            parent = %self.id(),
            kind = %R::KIND,
            device = %device.id(),
            "device link added"
        );
        self.record_mut().link_list_mut().add(link.clone());
        link
    }

    /// Linked devices passing `filter`, in link order.
    #[must_use]
    pub fn devices(&self, filter: Option<&Filter>) -> DeviceList {
        self.record().link_list().devices(filter)
    }

    /// Links whose target device passes `filter`, in link order.
    #[must_use]
    pub fn device_links(&self, filter: Option<&Filter>) -> DeviceLinkList {
        let record = self.record();
        match filter {
            Some(filter) => {
                let by_target = DeviceLinkFilter::new(filter.clone());
                DeviceLinkList::new_filtered(record.link_list(), &by_target)
            }
            None => DeviceLinkList::new_copy(record.link_list()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
