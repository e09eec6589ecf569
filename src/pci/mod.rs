// PCI bus resolution
//
// Finds the host graphics device by scanning `lspci` output. The
// design assumes a single graphics device on a fixed PCI domain; every
// other operation in this tool hangs off the address resolved here.

use std::process::Command;

use crate::error::{Error, Result};

/// Resolves the domain-qualified PCI address of the host graphics
/// device, e.g. "0000:00:02.0".
///
/// Invokes `lspci -D -nn` and takes the first line describing a
/// Display or VGA controller. Both a missing utility and a bus without
/// a graphics device are hard failures: nothing else in this tool can
/// work without the address.
pub fn resolve_graphics_device_address() -> Result<String> {
    let output = Command::new("lspci")
        .args(["-D", "-nn"])
        .output()
        .map_err(|e| Error::ExternalTool {
            tool: "lspci".to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::ExternalTool {
            tool: "lspci".to_string(),
            reason: format!("exited with status {:?}", output.status.code()),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    find_display_controller(&stdout)
        .map(|(address, _)| address)
        .ok_or(Error::DeviceNotFound)
}

/// Scans captured `lspci` output for the first Display/VGA controller
/// line and returns its bus address plus the rest of the line.
pub fn find_display_controller(lspci_output: &str) -> Option<(String, String)> {
    for line in lspci_output.lines() {
        if line.contains("Display") || line.contains("VGA") {
            let mut fields = line.split_whitespace();
            let address = fields.next()?.to_string();
            let description = fields.collect::<Vec<_>>().join(" ");
            return Some((address, description));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSPCI_OUTPUT: &str = "\
0000:00:00.0 Host bridge [0600]: Intel Corporation Device [8086:9b61]
0000:00:02.0 VGA compatible controller [0300]: Intel Corporation UHD Graphics [8086:9b41]
0000:00:14.0 USB controller [0c03]: Intel Corporation Device [8086:02ed]
0000:01:00.0 Display controller [0380]: Advanced Micro Devices [1002:7340]
";

    #[test]
    fn picks_first_display_or_vga_line() {
        let (address, description) = find_display_controller(LSPCI_OUTPUT).expect("controller");
        assert_eq!(address, "0000:00:02.0");
        assert!(description.contains("UHD Graphics"));
    }

    #[test]
    fn no_graphics_device_yields_none() {
        let output = "0000:00:00.0 Host bridge [0600]: Intel Corporation Device\n";
        assert!(find_display_controller(output).is_none());
        assert!(find_display_controller("").is_none());
    }
}
