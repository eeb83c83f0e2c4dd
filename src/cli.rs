use anyhow::{Result, bail};
use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("Usage: gridpad [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --import <FILE>       Replace the grid with a CSV file (styling is reset)");
    eprintln!("  -c, --command <CMDS>      Run ';'-separated commands against the grid");
    eprintln!("  -o, --output <FILE>       Export the grid as CSV (directory -> excel.csv)");
    eprintln!("  --print                   Write the grid as CSV to stdout");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  --store <DIR>             Persist the grid in DIR");
    eprintln!("  --memory                  Do not persist anything");
    eprintln!("  -v, --verbose             Log debug output to stderr");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  focus <id>                Focus a cell (ids are row-col, e.g. 0-2)");
    eprintln!("  edit <id>                 Enter edit mode on the focused cell");
    eprintln!("  commit <id> <text>        Write text into a cell and leave edit mode");
    eprintln!("  blur                      Clear focus");
    eprintln!("  set <property> <value>    bg, color, font, bold, italic, strike on the focused cell");
    eprintln!("  merge [<id>]              Merge a cell (default: focused) with its right neighbour");
    eprintln!("  clear <id>                Reset one cell");
    eprintln!("  clear-all                 Reset every cell");
}

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub import: Option<PathBuf>,
    pub command: Option<String>,
    pub output: Option<PathBuf>,
    pub print: bool,
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub memory: bool,
    pub verbose: bool,
}

/// Parse command-line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Args>> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| match args.next() {
            Some(v) => Ok(v),
            None => bail!("{} requires a value", flag),
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-i" | "--import" => parsed.import = Some(PathBuf::from(value(&arg)?)),
            "-c" | "--command" => parsed.command = Some(value(&arg)?),
            "-o" | "--output" => parsed.output = Some(PathBuf::from(value(&arg)?)),
            "--config" => parsed.config = Some(PathBuf::from(value(&arg)?)),
            "--store" => parsed.store = Some(PathBuf::from(value(&arg)?)),
            "--print" => parsed.print = true,
            "--memory" => parsed.memory = true,
            "-v" | "--verbose" => parsed.verbose = true,
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    if parsed.memory && parsed.store.is_some() {
        bail!("--memory and --store cannot be combined");
    }
    Ok(Some(parsed))
}
