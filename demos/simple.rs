//! Basic XML encoding of JSON payloads and Rust structs.
//!
//! Run with: cargo run --example simple

use map2xml::{from_json_str, to_string, to_string_with_root, to_value};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Order {
    #[serde(rename = "-id")]
    id: u32,
    customer: String,
    item: Vec<Item>,
}

#[derive(Debug, Serialize)]
struct Item {
    #[serde(rename = "-sku")]
    sku: String,
    #[serde(rename = "#text")]
    quantity: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    // A JSON payload with attributes and inline text
    let payload = from_json_str(
        r##"{"reading": {"-sensor": "t1", "-unit": "C", "#text": 23.5}}"##,
    )?;
    println!("Inferred root:\n{}\n", to_string(&payload)?);

    // Several top-level keys end up under the default root
    let status = from_json_str(r#"{"state": "running", "uptime": 3600, "alarm": null}"#)?;
    println!("Default root:\n{}\n", to_string(&status)?);

    // Rust types go through serde
    let order = Order {
        id: 1001,
        customer: "Alice & Co".to_string(),
        item: vec![
            Item {
                sku: "A-1".to_string(),
                quantity: 2,
            },
            Item {
                sku: "B-7".to_string(),
                quantity: 1,
            },
        ],
    };
    let value = to_value(&order)?;
    println!("Explicit root:\n{}", to_string_with_root(&value, "order")?);

    Ok(())
}
