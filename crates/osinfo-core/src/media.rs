//! # Installation Sources and Resources
//!
//! Install media, install trees and hardware resource requirements. All
//! three are owned by an OS through its lists.

use crate::collection::Collection;
use crate::entity::Entity;
use crate::keys::{
    MEDIA_ARCH, MEDIA_INITRD, MEDIA_INSTALLER, MEDIA_KERNEL, MEDIA_LIVE, MEDIA_PUBLISHER_ID,
    MEDIA_SYSTEM_ID, MEDIA_URL, MEDIA_VOLUME_ID, RESOURCES_ARCH, RESOURCES_CPU, RESOURCES_N_CPUS,
    RESOURCES_RAM, RESOURCES_STORAGE, TREE_ARCH, TREE_TREEINFO_FAMILY, TREE_URL,
};
use crate::record::{Record, Shared};
use crate::{CatalogError, EntityKind};

// =============================================================================
// MEDIA
// =============================================================================

#[derive(Debug, Clone)]
pub struct MediaRecord {
    entity: Entity,
}

impl Record for MediaRecord {
    const KIND: EntityKind = EntityKind::Media;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Shared handle to an installation image.
pub type Media = Shared<MediaRecord>;

pub type MediaList = Collection<MediaRecord>;

impl Shared<MediaRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(MediaRecord {
            entity: Entity::new(id)?,
        }))
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.param_value(MEDIA_URL)
    }

    #[must_use]
    pub fn architecture(&self) -> Option<String> {
        self.param_value(MEDIA_ARCH)
    }

    /// ISO volume id pattern used to recognize the image.
    #[must_use]
    pub fn volume_id(&self) -> Option<String> {
        self.param_value(MEDIA_VOLUME_ID)
    }

    #[must_use]
    pub fn system_id(&self) -> Option<String> {
        self.param_value(MEDIA_SYSTEM_ID)
    }

    #[must_use]
    pub fn publisher_id(&self) -> Option<String> {
        self.param_value(MEDIA_PUBLISHER_ID)
    }

    /// Path of the kernel image relative to the media root.
    #[must_use]
    pub fn kernel_path(&self) -> Option<String> {
        self.param_value(MEDIA_KERNEL)
    }

    /// Path of the initrd relative to the media root.
    #[must_use]
    pub fn initrd_path(&self) -> Option<String> {
        self.param_value(MEDIA_INITRD)
    }

    /// Whether the media boots an installer. Defaults to `true`.
    #[must_use]
    pub fn installer(&self) -> bool {
        self.entity().param_value_bool_with_default(MEDIA_INSTALLER, true)
    }

    /// Whether the media boots a live system. Defaults to `false`.
    #[must_use]
    pub fn live(&self) -> bool {
        self.entity().param_value_bool_with_default(MEDIA_LIVE, false)
    }
}

// =============================================================================
// TREE
// =============================================================================

#[derive(Debug, Clone)]
pub struct TreeRecord {
    entity: Entity,
}

impl Record for TreeRecord {
    const KIND: EntityKind = EntityKind::Tree;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Shared handle to a network install tree.
pub type Tree = Shared<TreeRecord>;

pub type TreeList = Collection<TreeRecord>;

impl Shared<TreeRecord> {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self::from_record(TreeRecord {
            entity: Entity::new(id)?,
        }))
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.param_value(TREE_URL)
    }

    #[must_use]
    pub fn architecture(&self) -> Option<String> {
        self.param_value(TREE_ARCH)
    }

    #[must_use]
    pub fn treeinfo_family(&self) -> Option<String> {
        self.param_value(TREE_TREEINFO_FAMILY)
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Debug, Clone)]
pub struct ResourcesRecord {
    entity: Entity,
}

impl Record for ResourcesRecord {
    const KIND: EntityKind = EntityKind::Resources;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Shared handle to a set of hardware requirements for one architecture.
pub type Resources = Shared<ResourcesRecord>;

pub type ResourcesList = Collection<ResourcesRecord>;

impl Shared<ResourcesRecord> {
    /// Requirements named `id` that apply to `arch`.
    pub fn new(id: impl Into<String>, arch: impl Into<String>) -> Result<Self, CatalogError> {
        let mut entity = Entity::new(id)?;
        entity.set_param(RESOURCES_ARCH, arch);
        Ok(Self::from_record(ResourcesRecord { entity }))
    }

    #[must_use]
    pub fn architecture(&self) -> Option<String> {
        self.param_value(RESOURCES_ARCH)
    }

    /// CPU frequency in Hz; `None` when unset or unparsable.
    #[must_use]
    pub fn cpu(&self) -> Option<i64> {
        self.entity().param_value_i64(RESOURCES_CPU).ok()
    }

    pub fn set_cpu(&self, hz: i64) {
        self.entity_mut().set_param_i64(RESOURCES_CPU, hz);
    }

    #[must_use]
    pub fn n_cpus(&self) -> Option<i64> {
        self.entity().param_value_i64(RESOURCES_N_CPUS).ok()
    }

    pub fn set_n_cpus(&self, count: i64) {
        self.entity_mut().set_param_i64(RESOURCES_N_CPUS, count);
    }

    /// RAM in bytes.
    #[must_use]
    pub fn ram(&self) -> Option<i64> {
        self.entity().param_value_i64(RESOURCES_RAM).ok()
    }

    pub fn set_ram(&self, bytes: i64) {
        self.entity_mut().set_param_i64(RESOURCES_RAM, bytes);
    }

    /// Storage in bytes.
    #[must_use]
    pub fn storage(&self) -> Option<i64> {
        self.entity().param_value_i64(RESOURCES_STORAGE).ok()
    }

    pub fn set_storage(&self, bytes: i64) {
        self.entity_mut().set_param_i64(RESOURCES_STORAGE, bytes);
    }
}

// =============================================================================
// TESTS
// =============================================================================
