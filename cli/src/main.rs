use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use parschema_core::{HELP_TAGS, Schema, find_help};
use parschema_loader::{CommandSet, Format, load_config, load_schema};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod help;
mod output;

use help::{render_commands, render_help};
use output::{FlagsFormat, ParamsFormat, format_flags, format_params};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "PARSCHEMA_LOG";

#[derive(Debug, Parser)]
#[command(name = "parschema", version)]
#[command(about = "Schema-driven parameter resolution")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log more (-v info, -vv debug). Overridden by PARSCHEMA_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve parameters from a schema, a config document and flags.
    Resolve(ResolveArgs),
    /// List the flags derived from a schema.
    Flags(FlagsArgs),
    /// Print the help text of a schema.
    Help(HelpArgs),
    /// Validate schema documents.
    Validate(ValidateArgs),
    /// Resolve parameters for one command of a directory of schemas.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Config document mirroring the schema.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: ParamsFormat,
    /// Parameter flags, e.g. `--train a b --split 0.1`. Start with `--` to
    /// pass `-h`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct FlagsArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Only list flags up to this help level (default: all).
    #[arg(long)]
    level: Option<u32>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: FlagsFormat,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Help level; higher levels show more advanced flags.
    #[arg(long, default_value_t = 0)]
    level: u32,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files and/or directories containing schema documents.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Directory with one schema document per command.
    #[arg(long)]
    commands: PathBuf,
    /// Config document mirroring the command's schema.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: ParamsFormat,
    /// Command name followed by its parameter flags.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Flags(args) => run_flags(args),
        Command::Help(args) => run_help(args),
        Command::Validate(args) => run_validate(args),
        Command::Run(args) => run_command(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let schema = read_schema(&args.schema)?;
    if let Some(level) = find_help(&args.tokens) {
        print!("{}", render_help(&schema, level, None));
        return Ok(());
    }
    let config = read_config(args.config.as_deref())?;
    resolve_and_print(&schema, config.as_ref(), &args.tokens, args.format)
}

fn run_flags(args: FlagsArgs) -> Result<(), String> {
    let schema = read_schema(&args.schema)?;
    emit(&format_flags(&schema, args.level, args.format)?);
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let schema = read_schema(&args.schema)?;
    print!("{}", render_help(&schema, args.level, None));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let paths = collect_schema_paths(&args.inputs)?;
    if paths.is_empty() {
        return Err("No schema documents found".to_string());
    }

    let mut failed = 0usize;
    let mut flags = 0usize;
    for path in &paths {
        match load_schema(path) {
            Ok(schema) => {
                debug!(path = %path.display(), flags = schema.flags().len(), "Schema is valid");
                flags += schema.flags().len();
            }
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} schema file(s) failed validation",
            paths.len()
        ));
    }
    println!(
        "Validated {} schema file(s) with {flags} flag(s).",
        paths.len()
    );
    Ok(())
}

fn run_command(args: RunArgs) -> Result<(), String> {
    let commands = CommandSet::from_dir(&args.commands).map_err(|err| {
        format!(
            "Failed to load commands from '{}': {err}",
            args.commands.display()
        )
    })?;

    let wants_overview = args
        .tokens
        .first()
        .is_none_or(|token| HELP_TAGS.contains(&token.as_str()));
    if wants_overview {
        print!("{}", render_commands("parschema run", &commands));
        return Ok(());
    }

    let (name, schema, rest) = commands.dispatch(&args.tokens).map_err(|e| e.to_string())?;
    if let Some(level) = find_help(rest) {
        print!("{}", render_help(schema, level, Some(name)));
        return Ok(());
    }
    info!(command = name, "Running command");
    let config = read_config(args.config.as_deref())?;
    resolve_and_print(schema, config.as_ref(), rest, args.format)
}

fn resolve_and_print(
    schema: &Schema,
    config: Option<&Value>,
    tokens: &[String],
    format: ParamsFormat,
) -> Result<(), String> {
    let params = schema
        .resolve(config, Some(tokens))
        .map_err(|e| e.to_string())?;
    info!(tokens = tokens.len(), "Resolved parameters");
    emit(&format_params(&params, format)?);
    Ok(())
}

fn read_schema(path: &Path) -> Result<Schema, String> {
    load_schema(path).map_err(|err| format!("Failed to load schema '{}': {err}", path.display()))
}

fn read_config(path: Option<&Path>) -> Result<Option<Value>, String> {
    match path {
        None => Ok(None),
        Some(path) => load_config(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
    }
}

/// Expands directories into the schema documents they contain.
fn collect_schema_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let entries = fs::read_dir(input)
                .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?;
            let mut found = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?
                    .path();
                if path.is_file() && Format::from_path(&path).is_some() {
                    found.push(path);
                }
            }
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}
