//! Resolving the parameters of a training script.
//!
//! Loads `vesselseg.yaml`, reads flags from the command line and prints the
//! resolved parameter tree. With no flags, a sample invocation is used.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parschema-demos --example vesselseg
//! cargo run -p parschema-demos --example vesselseg -- --help 2
//! cargo run -p parschema-demos --example vesselseg -- -t data/ --loss cce --optim-lr 0.01
//! ```

use std::error::Error;
use std::fs;

use parschema_core::{FlagDescriptor, find_help};
use parschema_loader::load_schema;
use serde_json::json;

const SCHEMA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/vesselseg.yaml");

fn main() -> Result<(), Box<dyn Error>> {
    let schema = load_schema(SCHEMA_PATH)?;
    println!(
        "{} ({} flags)",
        schema.title().unwrap_or("vesselseg"),
        schema.flags().len()
    );

    let mut tokens: Vec<String> = std::env::args().skip(1).collect();
    if let Some(level) = find_help(&tokens) {
        print_flags(schema.flags().visible(level));
        return Ok(());
    }

    // Sample run: everything lands in a scratch directory.
    let scratch = std::env::temp_dir().join("parschema_vesselseg_demo");
    let config = if tokens.is_empty() {
        let images = scratch.join("images");
        fs::create_dir_all(&images)?;
        tokens = ["--train", path_str(&images)?, "--loss", "dice+cce", "--verbose"]
            .map(String::from)
            .to_vec();
        Some(json!({
            "optim": {"lr": 0.01},
            "save": {"folder": path_str(&scratch.join("runs"))?}
        }))
    } else {
        None
    };

    println!("tokens: {}", tokens.join(" "));
    if let Some(config) = &config {
        println!("config: {config}");
    }

    let params = schema.resolve(config.as_ref(), Some(&tokens))?;
    println!();
    print!("{}", serde_yaml::to_string(&params)?);
    Ok(())
}

fn print_flags<'a>(flags: impl Iterator<Item = &'a FlagDescriptor>) {
    for flag in flags {
        let default = flag.default.as_deref().unwrap_or("required");
        println!("  {:<28} {:<22} {default}", flag.tags.join(", "), flag.type_summary);
    }
}

fn path_str(path: &std::path::Path) -> Result<&str, Box<dyn Error>> {
    path.to_str()
        .ok_or_else(|| format!("non UTF-8 path: {}", path.display()).into())
}
