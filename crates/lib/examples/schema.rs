//! Builds the invoice schema registry and prints the schema tree the way an
//! extraction provider receives it.
//!
//! Run with: `cargo run --example schema`

use anyextract::invoice::invoice_schema;

fn main() -> anyhow::Result<()> {
    let schema = invoice_schema()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
