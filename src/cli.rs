use crate::config::load_config;
use crate::ir::{Person, TreeDocument};
use crate::layout::{LayoutVariant, derive};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::saved_layout::{self, SavedLayout};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ftlayout", version, about = "Derive family tree diagram layouts")]
pub struct Args {
    /// Tree JSON (a tree document or an array of persons), or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Saved layout JSON whose positions override the computed ones
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<PathBuf>,

    /// Derive the shared, read-only view
    #[arg(long = "read-only")]
    pub read_only: bool,

    /// Config JSON file (layout geometry and edge theme)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Also write the derived positions as a saved layout
    #[arg(long = "save-layout")]
    pub save_layout: Option<PathBuf>,

    /// Emit a compact layout dump instead of diagram JSON
    #[arg(long = "dump")]
    pub dump: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    execute(&args)
}

fn execute(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let raw = read_input(args.input.as_deref())?;
    let (persons, embedded_layout) = parse_tree_input(&raw)?;

    let saved = match args.layout.as_deref() {
        Some(path) => saved_layout::load(path),
        None => embedded_layout,
    };

    let variant = if args.read_only {
        LayoutVariant::ReadOnly
    } else {
        LayoutVariant::Editable
    };
    info!(persons = persons.len(), ?variant, "deriving layout");
    let layout = derive(variant, &persons, &saved, &config);

    match (args.dump, args.output.as_deref()) {
        (true, Some(path)) => write_layout_dump(path, &layout, variant)
            .with_context(|| format!("writing layout dump to {}", path.display()))?,
        (true, None) => {
            let dump = serde_json::to_string_pretty(&LayoutDump::from_layout(&layout, variant))?;
            write_output(&dump, None)?;
        }
        (false, output) => write_output(&layout.to_json()?, output)?,
    }

    if let Some(path) = args.save_layout.as_deref() {
        saved_layout::store(path, &SavedLayout::snapshot(&layout))
            .with_context(|| format!("saving layout to {}", path.display()))?;
        debug!(path = %path.display(), "saved layout snapshot");
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Accepts either a bare person array or a tree document.
fn parse_tree_input(raw: &str) -> Result<(Vec<Person>, SavedLayout)> {
    let value: serde_json::Value = serde_json::from_str(raw).context("input is not valid JSON")?;
    if value.is_array() {
        let persons: Vec<Person> = serde_json::from_value(value).context("invalid person list")?;
        return Ok((persons, SavedLayout::default()));
    }
    let document: TreeDocument = serde_json::from_value(value).context("invalid tree document")?;
    Ok(document.into_parts())
}

fn write_output(contents: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
