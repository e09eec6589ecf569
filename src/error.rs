// Error types for vGPU Manager
//
// Every filesystem and subprocess failure is caught at the operation
// boundary and converted into one of these kinds with the underlying
// cause preserved. Nothing in this crate is allowed to panic or
// terminate the process on an operational failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All failure kinds surfaced by catalog and lifecycle operations
#[derive(Debug, Error)]
pub enum Error {
    /// The proposed device identifier does not match the uuid4 format.
    /// Recoverable: the user must correct the input, no state changed.
    #[error("vGPU name '{identifier}' does not match the uuid4 format (hint: use the `uuidgen` command)")]
    Validation { identifier: String },

    /// No graphics device address could be resolved on the PCI bus.
    /// Fatal to every dependent operation: the host is unsupported.
    #[error("no Display or VGA controller found on the PCI bus")]
    DeviceNotFound,

    /// A descriptor or enumeration path could not be read.
    /// Recoverable: callers degrade to a "no data" display.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A create/remove endpoint rejected the write, typically a
    /// privilege problem.
    #[error("failed to write {path}: {source} (hint: you probably need to run this tool as root)")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The PCI enumeration utility is missing or failed to run.
    /// Treated like DeviceNotFound by callers.
    #[error("failed to run {tool}: {reason}")]
    ExternalTool { tool: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_hints_at_privileges() {
        let err = Error::Write {
            path: PathBuf::from("/sys/bus/mdev/devices/x/remove"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn validation_error_names_the_identifier() {
        let err = Error::Validation {
            identifier: "pumpkin".to_string(),
        };
        assert!(err.to_string().contains("pumpkin"));
        assert!(err.to_string().contains("uuidgen"));
    }
}
