use std::env;

use vgpu_manager::error::Result;
use vgpu_manager::mdev::{catalog, lifecycle, MdevPaths};
use vgpu_manager::pci;
use vgpu_manager::ui;

fn main() -> std::io::Result<()> {
    // Check if CLI mode is explicitly requested
    let args: Vec<String> = env::args().collect();
    let use_cli_flag = args.iter().any(|arg| arg == "--cli");

    if use_cli_flag {
        let json = args.iter().any(|arg| arg == "--json");
        let command: Vec<&str> = args
            .iter()
            .skip(1)
            .filter(|arg| !arg.starts_with("--"))
            .map(|arg| arg.as_str())
            .collect();

        if let Err(e) = run_cli_mode(&command, json) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Ok(())
    } else {
        // Default to the ratatui-based UI
        ui::run_tui()
    }
}

/// Run the command-line interface mode
fn run_cli_mode(command: &[&str], json: bool) -> Result<()> {
    let paths = MdevPaths::default();

    match command.first().copied() {
        Some("list") => {
            let devices = catalog::list_devices(&paths);
            if json {
                println!("{}", to_json(&devices));
            } else if devices.is_empty() {
                println!("No vGPUs detected.");
            } else {
                for device in devices {
                    println!("{}", device);
                }
            }
        }
        Some("modes") => {
            let address = pci::resolve_graphics_device_address()?;
            let modes = catalog::enumerate_modes(&paths, &address)?;
            if json {
                println!("{}", to_json(&modes));
            } else {
                for entry in modes {
                    println!("{}", entry.display_line());
                }
            }
        }
        Some("inspect") => {
            let identifier = expect_arg(command, 1, "inspect <uuid>")?;
            let details = catalog::inspect_device(&paths, identifier)?;
            if json {
                println!("{}", to_json(&details));
            } else {
                println!("UUID: {}", details.identifier);
                println!("VRAM size: {}", details.descriptor.capacity_label());
                println!("Max resolution: {}", details.descriptor.resolution_label());
                println!("Device path: {}", details.device_path.display());
            }
        }
        Some("create") => {
            // `create <mode>` generates a fresh identifier;
            // `create <uuid> <mode>` uses the given one.
            let (identifier, mode) = match (command.get(1), command.get(2)) {
                (Some(mode), None) => (lifecycle::generate_identifier(), mode.to_string()),
                (Some(identifier), Some(mode)) => (identifier.to_string(), mode.to_string()),
                _ => {
                    print_usage();
                    return Ok(());
                }
            };
            let address = pci::resolve_graphics_device_address()?;
            lifecycle::create_device(&paths, &identifier, &mode, &address)?;
            println!("Created vGPU {} with mode {}", identifier, mode);
        }
        Some("delete") => {
            let identifier = expect_arg(command, 1, "delete <uuid>")?;
            lifecycle::delete_device(&paths, identifier)?;
            println!("Deleted vGPU {}", identifier);
        }
        Some("flag") => {
            let identifier = expect_arg(command, 1, "flag <uuid>")?;
            println!("{}", lifecycle::format_passthrough_flag(identifier));
        }
        _ => print_usage(),
    }

    Ok(())
}

/// Fetches a required positional argument or prints usage
fn expect_arg<'a>(command: &[&'a str], index: usize, usage: &str) -> Result<&'a str> {
    match command.get(index) {
        Some(arg) => Ok(*arg),
        None => {
            eprintln!("Usage: vgpu-manager --cli {}", usage);
            std::process::exit(2);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn print_usage() {
    println!("vGPU Manager {} (CLI Mode)", vgpu_manager::VERSION);
    println!();
    println!("Usage: vgpu-manager --cli <command> [--json]");
    println!();
    println!("Commands:");
    println!("  list                    List active vGPU identifiers");
    println!("  modes                   List vGPU modes offered by the host");
    println!("  inspect <uuid>          Show details for an active vGPU");
    println!("  create [<uuid>] <mode>  Create a vGPU (generates a uuid if omitted)");
    println!("  delete <uuid>           Remove an active vGPU");
    println!("  flag <uuid>             Print the QEMU passthrough flag");
}
