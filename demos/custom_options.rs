//! Customizing XML output with EncoderOptions.
//!
//! Run with: cargo run --example custom_options

use map2xml::{from_json_str, to_string_with_options, EncoderOptions, ErrorMode, FloatMode};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_json_str(
        r#"{"pressure": 1013250.0, "ratio": 0.00042, "note": "<ok>", "spare": null}"#,
    )?;

    // Default options
    println!(
        "Default:\n{}\n",
        to_string_with_options(&doc, EncoderOptions::default(), None)?
    );

    // Fixed-point floats, long empty elements and a declaration
    let options = EncoderOptions::new()
        .with_float_mode(FloatMode::Fixed)
        .with_empty_element_long_form(true)
        .with_declaration(true);
    println!("Fixed, long form:\n{}\n", to_string_with_options(&doc, options, None)?);

    // Scientific floats, raw text and a custom default root
    let options = EncoderOptions::new()
        .with_float_mode(FloatMode::Scientific)
        .with_escape_text(false)
        .with_default_root_tag("sample");
    println!("Scientific, unescaped:\n{}\n", to_string_with_options(&doc, options, None)?);

    // A nested attribute holding an object fails the whole document by default...
    let broken = from_json_str(r#"{"good": 1, "bad": {"-meta": {"x": 1}}}"#)?;
    match to_string_with_options(&broken, EncoderOptions::default(), None) {
        Ok(xml) => println!("Unexpected success: {}", xml),
        Err(e) => println!("Strict: {}", e),
    }

    // ...or is dropped in best-effort mode
    let options = EncoderOptions::new().with_error_mode(ErrorMode::BestEffort);
    println!("Best effort:\n{}", to_string_with_options(&broken, options, None)?);

    Ok(())
}
