// vGPU Manager
//
// A terminal tool for creating, listing, inspecting, and deleting mediated
// GPU virtualization devices (vGPUs) exposed through the kernel's mdev
// sysfs interface

// Error types shared by all operations
pub mod error;

// Mediated device catalog and lifecycle operations
pub mod mdev;

// PCI bus resolution for the host graphics device
pub mod pci;

// User interface
pub mod ui;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
