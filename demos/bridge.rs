//! Feeding MQTT-style messages through the bridge with a printing sink.
//!
//! Run with: RUST_LOG=debug cargo run --example bridge [config.json]
//!
//! With `file_log.enable` set in the configuration, log lines go to the
//! rolling file instead of stderr.

use map2xml::bridge::{Bridge, EntryPointCall, Sink};
use map2xml::config::BridgeConfig;
use map2xml::logging;
use std::error::Error;

struct PrintSink;

impl Sink for PrintSink {
    fn call_entry_point(&self, call: &EntryPointCall<'_>) -> map2xml::Result<()> {
        println!(
            "EXEC {} @topic = '{}', @payload = '{}'  (timeout {:?})",
            call.entry_point, call.topic, call.payload, call.timeout
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).unwrap_or_default();
    let mut config = BridgeConfig::load(&path)?;
    let _guard = logging::init(&config)?;
    if config.database.entry_point.is_empty() {
        config.database.entry_point = "dbo.ingest".to_string();
        config.database.to_xml = true;
    }
    println!("broker:   {}", config.mqtt.broker_url());
    println!("database: {}\n", config.database.connection_string());

    let bridge = Bridge::new(&config, PrintSink);
    let messages: [(&str, &[u8]); 3] = [
        ("plant/line1/temp", br#"{"-unit": "C", "value": 23.5}"#),
        ("plant/line1/batch", br#"{"item": [{"id": 1}, {"id": 2}]}"#),
        ("plant/line1/raw", b"not json"),
    ];
    for (topic, payload) in messages {
        if let Err(e) = bridge.handle_message(topic, payload) {
            println!("skipped {}: {}", topic, e);
        }
    }

    Ok(())
}
