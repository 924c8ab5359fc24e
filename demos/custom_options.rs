//! Customizing INI output with IniOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_ini::{to_string_with_options, IniOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Limits {
    requests: u32,
    burst: u32,
}

#[derive(Debug, Serialize)]
struct Config {
    #[serde(rename = "listen")]
    listen_addr: String,
    allowed: Vec<String>,
    #[serde(skip)]
    secret: String,
    limits: Limits,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        listen_addr: "127.0.0.1:9000".to_string(),
        allowed: vec!["10.0.0.0/8".to_string(), "192.168.0.0/16".to_string()],
        secret: "never written".to_string(),
        limits: Limits {
            requests: 100,
            burst: 20,
        },
    };

    println!("Default options (secret of {} bytes skipped):", config.secret.len());
    println!("{}", serde_ini::to_string(&config)?);

    println!("With comments:");
    let commented = IniOptions::new()
        .with_comments("Config", "listen", "address and port to bind")
        .with_comments("Config", "limits", "per-client rate limits")
        .with_comments("Limits", "burst", "extra requests allowed; reset every second");
    println!("{}", to_string_with_options(&config, commented)?);

    println!("Compact lists:");
    let compact = IniOptions::new().with_list_separator(",");
    println!("{}", to_string_with_options(&config, compact)?);

    Ok(())
}
