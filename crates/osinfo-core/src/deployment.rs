//! # Deployments
//!
//! A deployment pairs one OS with one platform and carries the device links
//! that apply to that pairing.

use crate::collection::Collection;
use crate::device::{DeviceHost, DeviceLinkList};
use crate::entity::Entity;
use crate::os::Os;
use crate::product::Platform;
use crate::record::{Record, Shared};
use crate::{CatalogError, EntityKind};

#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    entity: Entity,
    os: Os,
    platform: Platform,
    links: DeviceLinkList,
}

impl Record for DeploymentRecord {
    const KIND: EntityKind = EntityKind::Deployment;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl DeviceHost for DeploymentRecord {
    fn link_list(&self) -> &DeviceLinkList {
        &self.links
    }

    fn link_list_mut(&mut self) -> &mut DeviceLinkList {
        &mut self.links
    }
}

/// Shared handle to an OS-on-platform deployment.
pub type Deployment = Shared<DeploymentRecord>;

pub type DeploymentList = Collection<DeploymentRecord>;

impl Shared<DeploymentRecord> {
    pub fn new(
        id: impl Into<String>,
        os: &Os,
        platform: &Platform,
    ) -> Result<Self, CatalogError> {
        Ok(Self::from_record(DeploymentRecord {
            entity: Entity::new(id)?,
            os: os.clone(),
            platform: platform.clone(),
            links: DeviceLinkList::new(),
        }))
    }

    #[must_use]
    pub fn os(&self) -> Os {
        self.record().os.clone()
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.record().platform.clone()
    }

    /// True when this deployment binds exactly `os` and `platform`.
    #[must_use]
    pub fn binds(&self, os: &Os, platform: &Platform) -> bool {
        let record = self.record();
        record.os.id() == os.id() && record.platform.id() == platform.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::Device;

    #[test]
    fn deployment_binds_os_and_platform() {
        let os = Os::new("fedora-16").expect("os");
        let platform = Platform::new("qemu-kvm").expect("platform");
        let other = Platform::new("xen").expect("platform");
        let deployment = Deployment::new("f16-on-kvm", &os, &platform).expect("deployment");

        assert!(deployment.os().same_entity(&os));
        assert!(deployment.platform().same_entity(&platform));
        assert!(deployment.binds(&os, &platform));
        assert!(!deployment.binds(&os, &other));
    }

    #[test]
    fn deployment_hosts_its_own_links() {
        let os = Os::new("fedora-16").expect("os");
        let platform = Platform::new("qemu-kvm").expect("platform");
        let deployment = Deployment::new("f16-on-kvm", &os, &platform).expect("deployment");

        let disk = Device::new("virtio-block").expect("device");
        disk.set_param("class", "block");
        deployment.add_device(&disk).set_param("driver", "virtio_blk");

        let mut block = Filter::new();
        block.add_constraint("class", "block");
        assert_eq!(deployment.devices(Some(&block)).ids(), vec!["virtio-block"]);
        assert!(os.devices(None).is_empty());
        assert!(platform.devices(None).is_empty());
    }
}
