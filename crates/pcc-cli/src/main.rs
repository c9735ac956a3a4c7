/// PCC command-line tool: clean point clouds against a boundary mesh and
/// convert PLY files between ascii and binary encodings.
///
/// # Command overview
///
/// ```text
/// pcc <COMMAND> [OPTIONS]
///
/// Commands:
///   clean      Remove vertices outside a boundary mesh
///   convert    Re-encode a PLY file without filtering
///   inspect    Print the header of a PLY file
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log debug diagnostics
///   -q, --quiet      Log errors only
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// Diagnostics go to stderr so the PLY stream on stdout stays clean.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use pcc_driver::OutputFormat;
use tracing_subscriber::EnvFilter;

mod cmd_clean;
mod cmd_convert;
mod cmd_inspect;
mod stream;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The PCC (point cloud cleaner) command-line tool.
#[derive(Parser)]
#[command(name = "pcc", version, about = "PLY point cloud cleaner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics (overridden by `RUST_LOG`).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    quiet: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Remove vertices that lie outside a closed boundary mesh.
    Clean(CleanArgs),
    /// Re-encode a PLY file without filtering.
    Convert(ConvertArgs),
    /// Print the header of a PLY file.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `pcc clean`.
///
/// Reads the boundary mesh first, then streams INPUT to OUTPUT, keeping
/// only vertices inside the boundary. `-` or an omitted path selects
/// stdin / stdout.
///
/// ```text
/// ┌──────────────────────┬─────────────────────────────────────────────────┐
/// │ Flag                 │ Effect                                          │
/// ├──────────────────────┼─────────────────────────────────────────────────┤
/// │ -f / --format        │ same (default) | ascii | binary |               │
/// │                      │ binary_big_endian | binary_little_endian        │
/// │ --sentinel           │ Mark rejected vertices instead of dropping them │
/// │ --sentinel-token T   │ Marker written by --sentinel (default DEL)      │
/// │ --triangulate        │ Fan-triangulate polygonal boundary faces        │
/// └──────────────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct CleanArgs {
    /// Closed triangulated boundary mesh.
    pub boundary: PathBuf,

    /// Point cloud to clean (`-` for stdin).
    pub input: Option<PathBuf>,

    /// Destination (`-` for stdout).
    pub output: Option<PathBuf>,

    /// Output encoding.
    #[arg(short, long, default_value_t = OutputFormat::Same)]
    pub format: OutputFormat,

    /// Keep the declared vertex count and write a marker line for each
    /// rejected vertex.
    #[arg(long)]
    pub sentinel: bool,

    /// Marker written for rejected vertices with `--sentinel`.
    #[arg(long, default_value = pcc_driver::config::DEFAULT_SENTINEL, requires = "sentinel")]
    pub sentinel_token: String,

    /// Accept polygonal boundary faces by fan triangulation.
    #[arg(long)]
    pub triangulate: bool,
}

/// Arguments for `pcc convert`.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// File to convert (`-` for stdin).
    pub input: Option<PathBuf>,

    /// Destination (`-` for stdout).
    pub output: Option<PathBuf>,

    /// Output encoding.
    #[arg(short, long, default_value_t = OutputFormat::Same)]
    pub format: OutputFormat,
}

/// Arguments for `pcc inspect`.
///
/// Only the header is read, so this is cheap on large files.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// File to inspect (`-` for stdin).
    pub file: PathBuf,

    /// Print the header as JSON.
    #[arg(long)]
    pub json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Clean(args) => cmd_clean::run(&args),
        Commands::Convert(args) => cmd_convert::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
