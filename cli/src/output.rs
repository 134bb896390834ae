//! Output formatting for resolved parameters and flag tables.

use parschema_core::{FlagDescriptor, Schema};
use serde_json::Value;

/// Formats for a resolved parameter tree.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ParamsFormat {
    Json,
    Yaml,
}

/// Formats for a flag table.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FlagsFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a resolved parameter tree.
pub fn format_params(params: &Value, format: ParamsFormat) -> Result<String, String> {
    match format {
        ParamsFormat::Json => serde_json::to_string_pretty(params)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        ParamsFormat::Yaml => {
            serde_yaml::to_string(params).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Formats the flags of `schema` visible at `level` (all flags when `None`).
pub fn format_flags(
    schema: &Schema,
    level: Option<u32>,
    format: FlagsFormat,
) -> Result<String, String> {
    let level = level.unwrap_or(u32::MAX);
    let flags: Vec<&FlagDescriptor> = schema.flags().visible(level).collect();
    match format {
        FlagsFormat::Json => serde_json::to_string_pretty(&flags)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        FlagsFormat::Yaml => {
            serde_yaml::to_string(&flags).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        FlagsFormat::Markdown => Ok(flags_to_markdown(schema, &flags)),
        FlagsFormat::Table => Ok(flags_to_table(&flags)),
    }
}

fn flags_to_markdown(schema: &Schema, flags: &[&FlagDescriptor]) -> String {
    let mut out = String::new();

    if let Some(title) = schema.title() {
        out.push_str(&format!("# {title}\n\n"));
    }
    if let Some(desc) = schema.description() {
        out.push_str(&format!("{desc}\n\n"));
    }

    if !flags.is_empty() {
        out.push_str("| Flag | Type | Default | Parameter | Description |\n");
        out.push_str("|------|------|---------|-----------|-------------|\n");
        for flag in flags {
            let tags = flag
                .tags
                .iter()
                .map(|tag| format!("`{tag}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let default = flag
                .default
                .as_deref()
                .map(|d| format!("`{d}`"))
                .unwrap_or_else(|| "required".to_string());
            let desc = flag.description.as_deref().unwrap_or("");
            out.push_str(&format!(
                "| {tags} | `{}` | {default} | `{}` | {desc} |\n",
                value_summary(flag),
                flag.dotted_path()
            ));
        }
        out.push('\n');
    }

    out
}

fn flags_to_table(flags: &[&FlagDescriptor]) -> String {
    let rows: Vec<[String; 4]> = flags
        .iter()
        .map(|flag| {
            [
                flag.tags.join(", "),
                value_summary(flag),
                flag.dotted_path(),
                flag.default.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let header = ["FLAG", "TYPE", "PARAMETER", "DEFAULT"].map(String::from);

    let mut widths = [0usize; 4];
    for row in std::iter::once(&header).chain(&rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders the value column: choices, type, and `[...]` for values that may
/// be omitted.
pub fn value_summary(flag: &FlagDescriptor) -> String {
    let summary = if flag.choices.is_empty() {
        flag.type_summary.clone()
    } else {
        format!("{{{}}}", flag.choices.join(", "))
    };
    if flag.optional_value {
        format!("[{summary}]")
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema::from_value(&json!({
            "title": "train",
            "properties": {
                "data": {
                    "properties": {
                        "train": {"type": "array", "items": {"type": "string"}, "description": "Images"},
                        "split": {"type": "number", "default": 0.2, "x-help": 1}
                    }
                },
                "optim": {"enum": ["adam", "sgd"], "default": "adam"},
                "verbose": {"type": "boolean", "default": false, "x-alias": "-v"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_value_summary() {
        let schema = schema();
        let flags = schema.flags();
        assert_eq!(value_summary(flags.find("--train").unwrap()), "[str] ...");
        assert_eq!(value_summary(flags.find("--optim").unwrap()), "{adam, sgd}");
        assert_eq!(value_summary(flags.find("-v").unwrap()), "[bool]");
    }

    #[test]
    fn test_table_aligns_columns() {
        let table = format_flags(&schema(), None, FlagsFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("FLAG"));
        let type_column = lines[0].find("TYPE").unwrap();
        assert_eq!(lines[1].find("[str] ..."), Some(type_column));
        assert!(lines[4].starts_with("--verbose, -v"));
    }

    #[test]
    fn test_level_filters_flags() {
        let table = format_flags(&schema(), Some(0), FlagsFormat::Table).unwrap();
        assert!(!table.contains("--split"));
        let table = format_flags(&schema(), Some(1), FlagsFormat::Table).unwrap();
        assert!(table.contains("--split"));
    }

    #[test]
    fn test_markdown_lists_parameters() {
        let md = format_flags(&schema(), None, FlagsFormat::Markdown).unwrap();
        assert!(md.starts_with("# train\n"));
        assert!(md.contains("| `--train` | `[str] ...` | required | `data.train` | Images |"));
    }

    #[test]
    fn test_json_flags_are_an_array() {
        let raw = format_flags(&schema(), Some(0), FlagsFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["path"], json!(["data", "train"]));
    }

    #[test]
    fn test_params_yaml() {
        let yaml = format_params(&json!({"split": 0.2}), ParamsFormat::Yaml).unwrap();
        assert_eq!(yaml, "split: 0.2\n");
    }
}
