//! Generate the JSON Schema for the page effects configuration
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > www/config.schema.json

use lumen::config::Config;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Failed to serialize schema: {}", e);
            std::process::exit(1);
        }
    }
}
