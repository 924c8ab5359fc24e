//! Dump a typed configuration to INI text and load it back.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ini::{from_str, to_string};
use std::error::Error;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    timeout: Duration,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    workers: u8,
    tags: Vec<String>,
    server: Server,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "inventory".to_string(),
        workers: 4,
        tags: vec!["api".to_string(), "eu-west".to_string()],
        server: Server {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timeout: Duration::from_secs(90),
        },
    };

    let ini = to_string(&config)?;
    println!("INI output:\n{}", ini);

    let config_back: Config = from_str(&ini)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
