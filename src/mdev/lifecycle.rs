// Device lifecycle control
//
// Validates proposed device identifiers, issues create/remove requests
// against the kernel's mdev endpoints, and formats the QEMU passthrough
// flag for a device. A device has exactly two states, absent and
// present; a failed write leaves it in its prior state and is reported,
// never retried here.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::mdev::{MdevPaths, MDEV_ROOT};

/// Canonical uuid4 format: 32 hex digits grouped 8-4-4-4-12, version
/// nibble 4, variant nibble 8/9/a/b, case-insensitive
const IDENTIFIER_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$";

static IDENTIFIER_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Returns true iff `candidate` matches the canonical uuid4 format.
///
/// Pure and total: never fails, for any input. The pattern is compiled
/// once; the TUI wizard calls this on every keystroke.
pub fn validate_identifier(candidate: &str) -> bool {
    IDENTIFIER_REGEX
        .get_or_init(|| Regex::new(IDENTIFIER_PATTERN).ok())
        .as_ref()
        .map(|pattern| pattern.is_match(candidate))
        .unwrap_or(false)
}

/// Generates a fresh random identifier suitable for `create_device`
pub fn generate_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// Creates a new mediated device by writing the identifier to the
/// per-mode creation endpoint.
///
/// Success is implicit (no read-back); the caller must refresh the
/// catalog afterwards to pick up the new device.
pub fn create_device(
    paths: &MdevPaths,
    identifier: &str,
    mode: &str,
    address: &str,
) -> Result<()> {
    if !validate_identifier(identifier) {
        return Err(Error::Validation {
            identifier: identifier.to_string(),
        });
    }

    let create_path = paths.supported_types_dir(address).join(mode).join("create");
    write_control(&create_path, identifier)
}

/// Removes a mediated device by writing `1` to its removal endpoint.
///
/// The caller must refresh the catalog afterwards.
pub fn delete_device(paths: &MdevPaths, identifier: &str) -> Result<()> {
    let remove_path = paths.device_dir(identifier).join("remove");
    write_control(&remove_path, "1")
}

/// Produces the QEMU command-line fragment that attaches the device to
/// a guest. Deterministic, no I/O.
pub fn format_passthrough_flag(identifier: &str) -> String {
    format!(
        "-device vfio-pci,sysfsdev={}/{},display=on,x-igd-opregion=on,ramfb=on,driver=vfio-pci-nohotplug",
        MDEV_ROOT, identifier
    )
}

/// Writes a value to a kernel control file, mapping any failure to a
/// write error carrying the privilege hint
fn write_control(path: &Path, value: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    write!(file, "{}", value).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn accepts_canonical_uuid4() {
        assert!(validate_identifier("12345678-90ab-4cde-89ab-1234567890ab"));
        assert!(validate_identifier("12345678-90AB-4CDE-89AB-1234567890AB"));
        assert!(validate_identifier("12345678-90ab-4cde-B9ab-1234567890ab"));
    }

    #[test]
    fn rejects_wrong_version_nibble() {
        assert!(!validate_identifier("12345678-90ab-1cde-89ab-1234567890ab"));
    }

    #[test]
    fn rejects_wrong_variant_nibble() {
        assert!(!validate_identifier("12345678-90ab-4cde-79ab-1234567890ab"));
    }

    #[test]
    fn total_over_arbitrary_input() {
        assert!(!validate_identifier(""));
        assert!(!validate_identifier("pumpkin"));
        assert!(!validate_identifier("12345678-90ab-4cde-89ab-1234567890aβ"));
        assert!(!validate_identifier(&"f".repeat(4096)));
    }

    #[test]
    fn repeated_validation_reuses_the_compiled_pattern() {
        for _ in 0..3 {
            assert!(validate_identifier("12345678-90ab-4cde-89ab-1234567890ab"));
            assert!(!validate_identifier("12345678-90ab-1cde-89ab-1234567890ab"));
        }
    }

    #[test]
    fn generated_identifiers_validate() {
        for _ in 0..32 {
            assert!(validate_identifier(&generate_identifier()));
        }
    }

    #[test]
    fn passthrough_flag_embeds_device_path_and_options() {
        let flag = format_passthrough_flag("abc");
        assert!(flag.contains("sysfsdev=/sys/bus/mdev/devices/abc,"));
        for option in [
            "display=on",
            "x-igd-opregion=on",
            "ramfb=on",
            "driver=vfio-pci-nohotplug",
        ] {
            assert_eq!(flag.matches(option).count(), 1, "option {}", option);
        }
    }

    #[test]
    fn create_rejects_invalid_identifier_before_any_write() {
        let paths = MdevPaths::default();
        let err = create_device(&paths, "not-a-uuid", "i915-GVTg_V5_4", "0000:00:02.0").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn create_on_missing_endpoint_is_write_error() {
        let dir = tempdir().expect("tempdir");
        let paths = MdevPaths {
            pci_root: dir.path().to_path_buf(),
            mdev_root: dir.path().join("mdev"),
        };
        let err = create_device(
            &paths,
            "12345678-90ab-4cde-89ab-1234567890ab",
            "i915-GVTg_V5_4",
            "0000:00:02.0",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn delete_on_missing_device_is_write_error() {
        let dir = tempdir().expect("tempdir");
        let paths = MdevPaths {
            pci_root: dir.path().to_path_buf(),
            mdev_root: dir.path().join("mdev"),
        };
        let err = delete_device(&paths, "12345678-90ab-4cde-89ab-1234567890ab").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
