//! Building node trees with the ini! macro.
//!
//! Run with: cargo run --example macro

use serde::Deserialize;
use serde_ini::{from_node, ini, to_string};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Cache {
    size: u32,
    backends: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let leaf = ini!(42);
    let list = ini!(["alpha", "beta", "gamma"]);

    println!("Leaves:");
    println!("  number: {}", leaf.value()?);
    println!("  list:   {:?}\n", list.values()?);

    let root = ini!({
        "name": "MyApp",
        "debug": true,
        "cache": {
            "size": 512,
            "backends": ["memory", "disk"]
        }
    });

    println!("Dumped:\n{}", to_string(&root)?);

    let cache: Cache = from_node(&root["cache"])?;
    println!("Typed cache section: {:?}", cache);

    Ok(())
}
