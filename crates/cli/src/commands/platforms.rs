use anyhow::Result;
use swig_runner_core::{Platform, ToolTable};

pub fn platforms_command() -> Result<()> {
    let tools = ToolTable::default();
    let host = Platform::host();

    println!("📦 {}", tools.coordinate);
    for entry in tools.entries {
        let marker = if entry.matches(&host) { " (host)" } else { "" };
        println!("   • {}{}", entry.aol(), marker);
    }

    if tools.lookup(&host).is_err() {
        println!("\n❌ No SWIG build for this host ({host}); pass --architecture/--os");
    }
    Ok(())
}
