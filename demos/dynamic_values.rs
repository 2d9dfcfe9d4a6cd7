//! Working with Value trees built at runtime.
//!
//! Run with: cargo run --example dynamic_values

use map2xml::{to_string, to_string_with_root, to_value, value, Map, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Device {
    #[serde(rename = "-id")]
    id: String,
    model: String,
    ports: Vec<u16>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a tree with the value! macro
    let station = value!({
        "station": {
            "-name": "north",
            "sensor": [
                { "-kind": "temp", "#text": 21.5 },
                { "-kind": "humidity", "#text": 48 }
            ],
            "maintenance": null
        }
    });
    println!("Station:\n{}\n", to_string(&station)?);

    // Inspect values dynamically
    if let Some(Value::Object(inner)) = station.as_object().and_then(|m| m.get("station")) {
        if let Some(name) = inner.get("-name").and_then(Value::as_str) {
            println!("Station name attribute: {}\n", name);
        }
    }

    // Build a map by hand; key order does not affect the output
    let mut map = Map::new();
    map.insert("zone".to_string(), Value::from("B"));
    map.insert("-rev".to_string(), Value::from(3));
    map.insert("alarm".to_string(), Value::from(false));
    println!("Manual:\n{}\n", to_string_with_root(&Value::Object(map), "cfg")?);

    // Convert a struct, then extend it
    let device = Device {
        id: "gw-1".to_string(),
        model: "X200".to_string(),
        ports: vec![502, 1883],
    };
    let mut tree = to_value(&device)?;
    if let Value::Object(map) = &mut tree {
        map.insert("seen".to_string(), Value::from(chrono::Utc::now()));
    }
    println!("Device:\n{}", to_string_with_root(&tree, "device")?);

    Ok(())
}
