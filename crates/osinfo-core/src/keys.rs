//! # Well-Known Property Keys
//!
//! Property names the data files use for each entity kind.
//!
//! Entities accept any key; these constants only back the typed accessors
//! so that loader and readers agree on spelling.

// =============================================================================
// PRODUCT (OS / PLATFORM / HYPERVISOR)
// =============================================================================

/// Human readable product name.
pub const PRODUCT_NAME: &str = "name";

/// Short identifier, e.g. `fedora11`.
pub const PRODUCT_SHORT_ID: &str = "short-id";

/// Vendor name. May carry several values.
pub const PRODUCT_VENDOR: &str = "vendor";

/// Version string.
pub const PRODUCT_VERSION: &str = "version";

/// Release code name.
pub const PRODUCT_CODENAME: &str = "codename";

/// First day of general availability, `YYYY-MM-DD`.
pub const PRODUCT_RELEASE_DATE: &str = "release-date";

/// Last day of vendor support, `YYYY-MM-DD`.
pub const PRODUCT_EOL_DATE: &str = "eol-date";

// =============================================================================
// OS
// =============================================================================

/// OS family, e.g. `linux`, `winnt`.
pub const OS_FAMILY: &str = "family";

/// Distribution name, e.g. `fedora`.
pub const OS_DISTRO: &str = "distro";

// =============================================================================
// DEVICE
// =============================================================================

pub const DEVICE_VENDOR: &str = "vendor";
pub const DEVICE_VENDOR_ID: &str = "vendor-id";
pub const DEVICE_PRODUCT: &str = "product";
pub const DEVICE_PRODUCT_ID: &str = "product-id";
pub const DEVICE_BUS_TYPE: &str = "bus-type";
pub const DEVICE_CLASS: &str = "class";
pub const DEVICE_NAME: &str = "name";
pub const DEVICE_SUBSYSTEM: &str = "subsystem";

// =============================================================================
// DEVICE LINK
// =============================================================================

/// Driver the parent uses for the linked device.
pub const DEVICE_LINK_DRIVER: &str = "driver";

// =============================================================================
// INSTALL MEDIA / TREES / RESOURCES
// =============================================================================

pub const MEDIA_URL: &str = "url";
pub const MEDIA_ARCH: &str = "arch";
pub const MEDIA_VOLUME_ID: &str = "volume-id";
pub const MEDIA_SYSTEM_ID: &str = "system-id";
pub const MEDIA_PUBLISHER_ID: &str = "publisher-id";
/// Kernel path inside the image.
pub const MEDIA_KERNEL: &str = "kernel";
/// Initrd path inside the image.
pub const MEDIA_INITRD: &str = "initrd";
/// `true` when the media boots an installer.
pub const MEDIA_INSTALLER: &str = "installer";
/// `true` when the media boots a live system.
pub const MEDIA_LIVE: &str = "live";

pub const TREE_URL: &str = "url";
pub const TREE_ARCH: &str = "arch";
pub const TREE_TREEINFO_FAMILY: &str = "treeinfo-family";

pub const RESOURCES_ARCH: &str = "arch";
/// CPU frequency in Hz.
pub const RESOURCES_CPU: &str = "cpu";
pub const RESOURCES_N_CPUS: &str = "n-cpus";
/// RAM in bytes.
pub const RESOURCES_RAM: &str = "ram";
/// Storage in bytes.
pub const RESOURCES_STORAGE: &str = "storage";

/// Date format used by date-valued properties.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
