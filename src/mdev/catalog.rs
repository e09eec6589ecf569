// Device catalog reading
//
// Enumerates active mediated devices and parses the small line-oriented
// descriptor files the kernel exposes per mode and per device. Nothing
// here mutates the host; every function is a blocking read.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mdev::{CatalogSnapshot, DeviceDescriptor, DeviceDetails, MdevPaths, ModeEntry};

/// Lists the identifiers of the currently active mediated devices.
///
/// A missing enumeration root means no devices, not an error: the mdev
/// bus directory only appears once the first device exists.
pub fn list_devices(paths: &MdevPaths) -> Vec<String> {
    let entries = match fs::read_dir(&paths.mdev_root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

/// Reads and parses the `description` file under `base`.
///
/// Returns a descriptor with whichever fields were found; fails with a
/// read error when the file is unreadable or the base path is gone
/// (e.g. the device was removed concurrently).
pub fn read_descriptor(base: &Path) -> Result<DeviceDescriptor> {
    let path = base.join("description");
    let text = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    Ok(parse_descriptor(&text))
}

/// Extracts the resolution and capacity attributes from descriptor text.
///
/// The first line containing "resolution" is taken verbatim (trimmed);
/// the first line containing "high_gm_size" is taken with that token
/// replaced by the display label "vram". All other lines are ignored.
fn parse_descriptor(text: &str) -> DeviceDescriptor {
    let mut descriptor = DeviceDescriptor::default();
    for line in text.lines() {
        if descriptor.max_resolution.is_none() && line.contains("resolution") {
            descriptor.max_resolution = Some(line.trim().to_string());
        }
        if descriptor.capacity.is_none() && line.contains("high_gm_size") {
            descriptor.capacity = Some(line.replace("high_gm_size", "vram").trim().to_string());
        }
    }
    descriptor
}

/// Enumerates the vGPU modes the host offers for the graphics device.
///
/// Order is filesystem enumeration order. A descriptor parse failure
/// for one mode does not abort the rest; the failing entry keeps its
/// fields unavailable so the mode can still be selected.
pub fn enumerate_modes(paths: &MdevPaths, address: &str) -> Result<Vec<ModeEntry>> {
    let dir = paths.supported_types_dir(address);
    let entries = fs::read_dir(&dir).map_err(|source| Error::Read {
        path: dir.clone(),
        source,
    })?;

    let mut modes = Vec::new();
    for entry in entries.filter_map(|entry| entry.ok()) {
        if !entry.path().is_dir() {
            continue;
        }
        let mode = entry.file_name().to_string_lossy().into_owned();
        let descriptor = read_descriptor(&entry.path()).unwrap_or_default();
        modes.push(ModeEntry { mode, descriptor });
    }
    Ok(modes)
}

/// Builds the detail view for one active device.
///
/// Existing device names are trusted as-is; validation only guards the
/// mutating operations.
pub fn inspect_device(paths: &MdevPaths, identifier: &str) -> Result<DeviceDetails> {
    let device_path = paths.device_dir(identifier);
    let descriptor = read_descriptor(&device_path.join("mdev_type"))?;
    Ok(DeviceDetails {
        identifier: identifier.to_string(),
        descriptor,
        device_path,
    })
}

/// Reads a complete catalog snapshot for the given graphics device
pub fn snapshot(paths: &MdevPaths, address: &str) -> Result<CatalogSnapshot> {
    Ok(CatalogSnapshot {
        address: address.to_string(),
        modes: enumerate_modes(paths, address)?,
        devices: list_devices(paths),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const DESCRIPTION: &str = "low_gm_size: 128MB\nhigh_gm_size: 512MB\nfence: 4\nresolution: 1920x1200\nweight: 4\n";

    fn fake_paths(root: &Path) -> MdevPaths {
        MdevPaths {
            pci_root: root.join("pci0000:00"),
            mdev_root: root.join("mdev"),
        }
    }

    #[test]
    fn parse_extracts_resolution_and_renames_capacity() {
        let descriptor = parse_descriptor(DESCRIPTION);
        assert_eq!(descriptor.max_resolution.as_deref(), Some("resolution: 1920x1200"));
        assert_eq!(descriptor.capacity.as_deref(), Some("vram: 512MB"));
    }

    #[test]
    fn parse_takes_first_matching_line() {
        let text = "resolution: 1024x768\nresolution: 1920x1200\n";
        let descriptor = parse_descriptor(text);
        assert_eq!(descriptor.max_resolution.as_deref(), Some("resolution: 1024x768"));
    }

    #[test]
    fn parse_tolerates_missing_attributes() {
        let descriptor = parse_descriptor("weight: 4\nfence: 2\n");
        assert_eq!(descriptor, DeviceDescriptor::default());
    }

    #[test]
    fn list_devices_on_missing_root_is_empty() {
        let paths = MdevPaths {
            pci_root: PathBuf::from("/nonexistent"),
            mdev_root: PathBuf::from("/nonexistent/mdev"),
        };
        assert!(list_devices(&paths).is_empty());
    }

    #[test]
    fn read_descriptor_on_missing_base_is_read_error() {
        let dir = tempdir().expect("tempdir");
        let err = read_descriptor(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn enumerate_modes_isolates_broken_entries() {
        let dir = tempdir().expect("tempdir");
        let paths = fake_paths(dir.path());
        let types = paths.supported_types_dir("0000:00:02.0");

        let good = types.join("i915-GVTg_V5_4");
        fs::create_dir_all(&good).expect("mode dir");
        fs::write(good.join("description"), DESCRIPTION).expect("description");

        // No description file at all for this one
        fs::create_dir_all(types.join("i915-GVTg_V5_8")).expect("mode dir");

        let mut modes = enumerate_modes(&paths, "0000:00:02.0").expect("enumerate");
        modes.sort_by(|a, b| a.mode.cmp(&b.mode));

        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].display_line(), "i915-GVTg_V5_4 | resolution: 1920x1200 / vram: 512MB");
        assert_eq!(modes[1].display_line(), "i915-GVTg_V5_8 | N/A / N/A");
    }

    #[test]
    fn enumerate_modes_on_missing_catalog_is_read_error() {
        let dir = tempdir().expect("tempdir");
        let paths = fake_paths(dir.path());
        let err = enumerate_modes(&paths, "0000:00:02.0").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn inspect_device_reads_mdev_type_descriptor() {
        let dir = tempdir().expect("tempdir");
        let paths = fake_paths(dir.path());
        let device = paths.device_dir("12345678-90ab-4cde-89ab-1234567890ab");
        fs::create_dir_all(device.join("mdev_type")).expect("device dir");
        fs::write(device.join("mdev_type/description"), DESCRIPTION).expect("description");

        let details =
            inspect_device(&paths, "12345678-90ab-4cde-89ab-1234567890ab").expect("inspect");
        assert_eq!(details.descriptor.capacity.as_deref(), Some("vram: 512MB"));
        assert_eq!(details.device_path, device);
    }
}
