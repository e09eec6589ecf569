// Mediated device (mdev) management
//
// This module holds the data model shared by the catalog reader and the
// lifecycle controller. All state lives in the host kernel's device
// tree; everything here is a projection of sysfs text at read time.

pub mod catalog;
pub mod lifecycle;

use std::path::PathBuf;

use serde::Serialize;

/// Default sysfs root under which PCI devices live
pub const PCI_ROOT: &str = "/sys/devices/pci0000:00";

/// Default enumeration root for active mediated devices
pub const MDEV_ROOT: &str = "/sys/bus/mdev/devices";

/// Sysfs roots used by every catalog and lifecycle operation.
///
/// Held in an explicit context so tests can point the operations at a
/// fake device tree instead of the live host.
#[derive(Debug, Clone)]
pub struct MdevPaths {
    pub pci_root: PathBuf,
    pub mdev_root: PathBuf,
}

impl Default for MdevPaths {
    fn default() -> Self {
        Self {
            pci_root: PathBuf::from(PCI_ROOT),
            mdev_root: PathBuf::from(MDEV_ROOT),
        }
    }
}

impl MdevPaths {
    /// Directory holding the supported vGPU modes for a graphics device
    pub fn supported_types_dir(&self, address: &str) -> PathBuf {
        self.pci_root.join(address).join("mdev_supported_types")
    }

    /// Sysfs directory of an active mediated device
    pub fn device_dir(&self, identifier: &str) -> PathBuf {
        self.mdev_root.join(identifier)
    }
}

/// Capacity and resolution attributes parsed from a descriptor file.
///
/// Purely a projection of whatever key/value lines exist in the source
/// text at read time; fields are absent when the corresponding line is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub capacity: Option<String>,
    pub max_resolution: Option<String>,
}

impl DeviceDescriptor {
    /// Capacity attribute, or an explicit "not available" marker
    pub fn capacity_label(&self) -> &str {
        self.capacity.as_deref().unwrap_or("N/A")
    }

    /// Resolution attribute, or an explicit "not available" marker
    pub fn resolution_label(&self) -> &str {
        self.max_resolution.as_deref().unwrap_or("N/A")
    }
}

/// One host-offered vGPU mode together with its parsed descriptor
#[derive(Debug, Clone, Serialize)]
pub struct ModeEntry {
    pub mode: String,
    pub descriptor: DeviceDescriptor,
}

impl ModeEntry {
    /// Human-readable catalog line, e.g.
    /// `i915-GVTg_V5_4 | resolution: 1920x1200 / vram: 512MB`
    pub fn display_line(&self) -> String {
        format!(
            "{} | {} / {}",
            self.mode,
            self.descriptor.resolution_label(),
            self.descriptor.capacity_label()
        )
    }
}

/// Detail view of one active mediated device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDetails {
    pub identifier: String,
    pub descriptor: DeviceDescriptor,
    pub device_path: PathBuf,
}

/// A freshly read snapshot of the whole catalog.
///
/// The presentation layer re-renders from a new snapshot after every
/// mutation instead of keeping implicit shared state.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    /// PCI bus address of the host graphics device
    pub address: String,
    /// vGPU modes the host offers for new devices
    pub modes: Vec<ModeEntry>,
    /// Identifiers of the currently active devices
    pub devices: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_as_unavailable() {
        let descriptor = DeviceDescriptor::default();
        assert_eq!(descriptor.capacity_label(), "N/A");
        assert_eq!(descriptor.resolution_label(), "N/A");
    }

    #[test]
    fn mode_display_line_format() {
        let entry = ModeEntry {
            mode: "i915-GVTg_V5_4".to_string(),
            descriptor: DeviceDescriptor {
                capacity: Some("vram: 512MB".to_string()),
                max_resolution: Some("resolution: 1920x1200".to_string()),
            },
        };
        assert_eq!(
            entry.display_line(),
            "i915-GVTg_V5_4 | resolution: 1920x1200 / vram: 512MB"
        );
    }

    #[test]
    fn default_paths_point_at_sysfs() {
        let paths = MdevPaths::default();
        assert_eq!(
            paths.supported_types_dir("0000:00:02.0"),
            PathBuf::from("/sys/devices/pci0000:00/0000:00:02.0/mdev_supported_types")
        );
        assert_eq!(
            paths.device_dir("abc"),
            PathBuf::from("/sys/bus/mdev/devices/abc")
        );
    }
}
