//! Plain-text help rendering.
//!
//! Flags are printed in schema order, one aligned row each, under a heading
//! for every first-level group. Root-level flags that follow a group go
//! under `Options`. A trailing row documents `-h, --help`.

use parschema_core::{FlagDescriptor, Schema};
use parschema_loader::CommandSet;

use crate::output::value_summary;

const COLUMN_GAP: usize = 2;

/// One help row. The three columns are aligned across the whole page.
type Row = [String; 3];

enum Line {
    Heading(String),
    Row(Row),
}

/// Renders help for `schema` at help level `level`.
pub fn render_help(schema: &Schema, level: u32, command: Option<&str>) -> String {
    let mut lines = Vec::new();
    let mut current_group: Option<&str> = None;
    for flag in schema.flags().visible(level) {
        let group = flag.group.as_deref();
        if group != current_group {
            let heading = match group {
                Some(name) => schema.group_description(name).unwrap_or(name),
                None => "Options",
            };
            lines.push(Line::Heading(heading.to_string()));
            current_group = group;
        }
        lines.push(Line::Row(flag_row(flag)));
    }
    lines.push(Line::Heading("Display help".to_string()));
    lines.push(Line::Row(help_row(schema.flags().max_help_level())));

    let mut out = String::new();
    match (command, schema.title()) {
        (Some(command), Some(title)) => out.push_str(&format!("{command}: {title}\n")),
        (Some(command), None) => out.push_str(&format!("{command}\n")),
        (None, Some(title)) => out.push_str(&format!("{title}\n")),
        (None, None) => {}
    }
    if let Some(desc) = schema.description() {
        out.push_str(&format!("    {}\n", collapse_whitespace(desc)));
    }

    let widths = column_widths(&lines);
    for line in &lines {
        match line {
            Line::Heading(heading) => out.push_str(&format!("\n{heading}:\n")),
            Line::Row([tags, value, desc]) => {
                let row = format!(
                    "  {tags:<tw$}{gap}{value:<vw$}{gap}{desc}",
                    tw = widths[0],
                    vw = widths[1],
                    gap = " ".repeat(COLUMN_GAP),
                );
                out.push_str(row.trim_end());
                out.push('\n');
            }
        }
    }
    out
}

/// Renders the list of subcommands of a command set.
pub fn render_commands(program: &str, commands: &CommandSet) -> String {
    let mut out = format!("Usage: {program} <command> [flags...]\n\nCommands:\n");
    let width = commands.names().map(str::len).max().unwrap_or(4);
    for name in commands.names() {
        let title = commands.get(name).and_then(Schema::title).unwrap_or("");
        let row = format!("  {name:<width$}{}{title}", " ".repeat(COLUMN_GAP));
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn flag_row(flag: &FlagDescriptor) -> Row {
    let mut desc = flag
        .description
        .as_deref()
        .map(collapse_whitespace)
        .unwrap_or_default();
    if let Some(default) = &flag.default {
        if !desc.is_empty() {
            desc.push(' ');
        }
        desc.push_str(&format!("(default: {default})"));
    }
    [flag.tags.join(", "), value_summary(flag), desc]
}

fn help_row(max_level: u32) -> Row {
    let mut desc = "Display this help.".to_string();
    let value = match max_level {
        0 => "[bool]",
        1 => {
            desc.push_str(" Value 1 shows more advanced options.");
            "[int]"
        }
        n => {
            let levels = (1..=n).map(|l| l.to_string()).collect::<Vec<_>>();
            desc.push_str(&format!(" Values in {{{}}} show more advanced options.", levels.join(", ")));
            "[int]"
        }
    };
    ["-h, --help".to_string(), value.to_string(), desc]
}

fn column_widths(lines: &[Line]) -> [usize; 2] {
    lines.iter().fold([0, 0], |[tw, vw], line| match line {
        Line::Row([tags, value, _]) => [tw.max(tags.len()), vw.max(value.len())],
        Line::Heading(_) => [tw, vw],
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema::from_value(&json!({
            "title": "Train a segmentation network",
            "description": "Trains a UNet\n   on vessel images.",
            "properties": {
                "data": {
                    "description": "Data options",
                    "properties": {
                        "train": {"type": "array", "items": {"type": "string"}, "default": []},
                        "split": {"type": "number", "default": 0.2, "x-help": 2, "description": "Validation fraction"}
                    }
                },
                "optim": {
                    "properties": {"lr": {"type": "number", "default": 0.001}}
                },
                "verbose": {"type": "boolean", "default": false}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_groups_use_descriptions() {
        let help = render_help(&schema(), 0, Some("train"));
        assert!(help.starts_with("train: Train a segmentation network\n    Trains a UNet on vessel images.\n"));
        assert!(help.contains("\nData options:\n  --train"));
        assert!(help.contains("\noptim:\n  --lr"));
        assert!(!help.contains("--split"));
        assert!(help.contains("\nOptions:\n  --verbose"));
    }

    #[test]
    fn test_rows_are_aligned() {
        let help = render_help(&schema(), 2, None);
        let train = help.lines().find(|l| l.starts_with("  --train")).unwrap();
        let split = help.lines().find(|l| l.starts_with("  --split")).unwrap();
        assert_eq!(train.find("[str] ..."), split.find("float"));
        assert!(split.ends_with("Validation fraction (default: 0.2)"));
    }

    #[test]
    fn test_help_row_lists_levels() {
        let help = render_help(&schema(), 0, None);
        assert!(help.contains("Values in {1, 2} show more advanced options."));

        let flat = Schema::from_value(&json!({"properties": {"a": {"default": 1}}})).unwrap();
        let help = render_help(&flat, 0, None);
        let last = help.lines().last().unwrap();
        assert!(last.starts_with("  -h, --help  [bool]"));
        assert!(last.ends_with("Display this help."));
    }

    #[test]
    fn test_render_commands() {
        let set = CommandSet::from_schemas([
            ("train".to_string(), schema()),
            ("eval".to_string(), Schema::from_value(&json!({"properties": {}})).unwrap()),
        ]);
        let text = render_commands("parschema run", &set);
        assert!(text.contains("\n  eval\n"));
        assert!(text.contains("\n  train  Train a segmentation network\n"));
    }
}
