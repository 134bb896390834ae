//! Subcommands from a directory of schemas.
//!
//! Writes two schema documents to a temporary directory, loads them as a
//! `CommandSet`, and dispatches a few token lists.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parschema-demos --example command_set
//! ```

use std::error::Error;
use std::fs;

use parschema_loader::CommandSet;

const TRAIN: &str = include_str!("vesselseg.yaml");

const EVAL: &str = r#"{
  "title": "Evaluate a checkpoint",
  "properties": {
    "checkpoint": {"type": "string", "default": "last.ckpt"},
    "metrics": {
      "type": "array",
      "items": {"enum": ["dice", "hausdorff", "auc"]},
      "default": ["dice"]
    },
    "batch": {"type": "integer", "default": 1}
  }
}"#;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join("parschema_command_set_demo");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("train.yaml"), TRAIN)?;
    fs::write(dir.join("eval.json"), EVAL)?;

    let commands = CommandSet::from_dir(&dir)?;
    println!(
        "Loaded {} command(s) from {}",
        commands.len(),
        commands.dir().display()
    );
    for name in commands.names() {
        let schema = commands.get(name).ok_or("command disappeared")?;
        println!("  {name}: {}", schema.title().unwrap_or(""));
    }
    println!();

    let runs = [
        vec!["eval", "--metrics", "dice", "auc", "--batch", "4"],
        vec!["eval", "--metrics"],
        vec!["eval", "--metrics", "iou"],
        vec!["predict"],
    ];
    for run in runs {
        let tokens: Vec<String> = run.iter().map(|t| t.to_string()).collect();
        println!("$ {}", run.join(" "));
        let outcome = commands
            .dispatch(&tokens)
            .map_err(|e| e.to_string())
            .and_then(|(_, schema, rest)| {
                schema.resolve(None, Some(rest)).map_err(|e| e.to_string())
            });
        match outcome {
            Ok(params) => println!("{params}"),
            Err(err) => println!("error: {err}"),
        }
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}
