//! Navigating a loaded file without a schema.
//!
//! Run with: cargo run --example dynamic_nodes

use serde_ini::load;
use std::error::Error;
use std::time::Duration;

const CONFIG: &str = "
# service settings
name = gateway
retries = 3
timeout = 1m30s

[upstream]
hosts = 10.0.0.1, 10.0.0.2
weights = 3, 1
tls = true
";

fn main() -> Result<(), Box<dyn Error>> {
    let root = load(CONFIG)?;

    println!("name:    {}", root["name"].value()?);
    println!("retries: {}", root["retries"].int()?);
    println!("timeout: {:?}", root["timeout"].duration()?);

    let upstream = &root["upstream"];
    println!("hosts:   {:?}", upstream["hosts"].values()?);
    println!("weights: {:?}", upstream["weights"].ints()?);
    println!("tls:     {}", upstream["tls"].bool()?);

    // Missing keys are empty nodes; the must_* accessors fall back to a default.
    let missing = root.get_path(["upstream", "keepalive"]);
    println!("\nkeepalive present: {}", !missing.is_empty());
    println!(
        "keepalive:         {:?}",
        missing.must_duration(Duration::from_secs(15))
    );

    if let Some(children) = root.children() {
        println!("\nTop-level keys:");
        for (key, node) in children {
            let kind = if node.is_section() { "section" } else { "value" };
            println!("  {:<8} {}", key, kind);
        }
    }

    Ok(())
}
