//! Memlay CLI - prints struct member layout dumps as an indented tree.
//!
//! This is the main entry point for the Memlay command-line application.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memlay::prelude::*;
use memlay::tree::DEFAULT_INDENT;
use memlay::LoadError;

/// Memlay - struct member layout viewer
#[derive(Parser)]
#[command(name = "memlay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layout dump to print; nothing happens when omitted
    input: Option<PathBuf>,

    /// Spaces per nesting level
    #[arg(long, env = "MEMLAY_INDENT", default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Also show member sizes and array dimensions
    #[arg(short, long)]
    detailed: bool,

    /// Only print the members below this dotted path (e.g. "header.flags")
    #[arg(short, long)]
    select: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented text, one member per line
    Text,
    /// Nested JSON objects
    #[cfg(feature = "json")]
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let Some(input) = &cli.input else {
        return Ok(());
    };

    cmd_print(cli, input)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn cmd_print(cli: &Cli, input: &Path) -> Result<()> {
    let start = Instant::now();
    let tree = memlay::load_tree(input).map_err(|e| describe_load_error(e, input))?;

    info!(
        input = %input.display(),
        records = tree.record_count(),
        max_level = tree.max_level(),
        elapsed = ?start.elapsed(),
        "Loaded member tree"
    );

    let from = match cli.select.as_deref() {
        Some(path) => tree
            .find_path(path)
            .with_context(|| format!("No member at path '{}'", path))?,
        None => NodeId::ROOT,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.format {
        Format::Text => {
            let options = RenderOptions {
                indent: cli.indent,
                detailed: cli.detailed,
            };
            write_text_from(&tree, from, &mut out, &options).context("Failed to write output")?;
        }
        #[cfg(feature = "json")]
        Format::Json => {
            let json = to_json_string(&tree, from).context("Failed to serialize tree")?;
            writeln!(out, "{}", json).context("Failed to write output")?;
        }
    }

    out.flush().context("Failed to write output")?;

    Ok(())
}

/// Attach a message telling apart unopenable, undecodable and badly nested input.
fn describe_load_error(error: LoadError, input: &Path) -> anyhow::Error {
    let message = match &error {
        LoadError::Open { .. } => format!("Could not open {}", input.display()),
        LoadError::Tree(e) if e.is_depth_violation() => {
            format!("Malformed member nesting in {}", input.display())
        }
        LoadError::Tree(_) => format!("Failed to decode {}", input.display()),
    };
    anyhow::Error::new(error).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("memlay-cli-{}-{}.bin", std::process::id(), name))
    }

    fn load_error(path: &Path) -> anyhow::Error {
        let err = memlay::load_tree(path).unwrap_err();
        describe_load_error(err, path)
    }

    #[test]
    fn test_no_input_is_noop() {
        let cli = Cli::try_parse_from(["memlay"]).unwrap();
        assert!(cli.input.is_none());
        assert!(run(&cli).is_ok());
    }

    #[test]
    fn test_unopenable_input() {
        let path = temp_path("missing");
        let cli = Cli::try_parse_from([OsStr::new("memlay"), path.as_os_str()]).unwrap();

        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), format!("Could not open {}", path.display()));
    }

    #[test]
    fn test_truncated_input_is_decode_failure() {
        let path = temp_path("truncated");
        fs::write(&path, [0u8; 10]).unwrap();

        let err = load_error(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(err.to_string(), format!("Failed to decode {}", path.display()));
    }

    #[test]
    fn test_depth_jump_is_nesting_failure() {
        let path = temp_path("jump");
        let mut writer = RecordWriter::new(fs::File::create(&path).unwrap());
        writer.write_record(&FieldRecord::new(0, "a", 0)).unwrap();
        writer.write_record(&FieldRecord::new(2, "b", 0)).unwrap();
        drop(writer.into_inner().unwrap());

        let err = load_error(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(
            err.to_string(),
            format!("Malformed member nesting in {}", path.display())
        );
    }

    #[test]
    fn test_error_chain_has_no_repeats() {
        let path = temp_path("chain");
        fs::write(&path, [0u8; 10]).unwrap();

        let err = load_error(&path);
        fs::remove_file(&path).unwrap();

        let messages: Vec<_> = err.chain().map(|e| e.to_string()).collect();
        for (i, message) in messages.iter().enumerate() {
            assert!(!messages[i + 1..].contains(message), "repeated cause: {message}");
        }
    }
}
