use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use meshpack_core::{CodecError, ErrorKind, GeometryArrays};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "meshpack")]
#[command(version)]
#[command(
    about = "Fixed-layout binary codec for triangle-mesh geometry.",
    long_about = None,
    after_help = "Examples:\n  meshpack encode mesh.json -o mesh.bin\n  meshpack decode mesh.bin -o mesh.json --pretty\n  meshpack inspect mesh.bin"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode geometry arrays (JSON) into a binary geometry buffer.
    Encode {
        /// Path to a .json file holding positions, indices, normals and uvs
        input: PathBuf,

        /// Output buffer path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the binary buffer to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Decode a binary geometry buffer into geometry arrays (JSON).
    Decode {
        /// Path to an encoded geometry buffer
        input: PathBuf,

        /// Output JSON path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Validate a geometry buffer and print its block layout as JSON.
    Inspect {
        /// Path to an encoded geometry buffer
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            stdout,
            quiet,
        } => cmd_encode(input, output, stdout, quiet),
        Commands::Decode {
            input,
            output,
            stdout,
            pretty,
            compact,
            quiet,
        } => cmd_decode(input, output, stdout, pretty, compact, quiet),
        Commands::Inspect { input, pretty } => cmd_inspect(input, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }

    fn codec(context: &str, err: &CodecError) -> Self {
        let hint = match err.kind() {
            ErrorKind::MalformedInput => {
                "input is not a complete geometry buffer produced on this platform"
            }
            ErrorKind::ArithmeticOverflow => {
                "block sizes exceed the addressable range; the header may be corrupt"
            }
            ErrorKind::ResourceExhausted => "not enough memory for the geometry",
        };
        CliError::new(format!("{context}: {err}"), Some(hint.to_string()))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_encode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    validate_input_file(&input, Some("json"))?;
    let output = resolve_output(&input, output, stdout)?;

    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let arrays: GeometryArrays = serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid geometry JSON in {}: {}", input.display(), err),
            Some("expected an object with positions, indices, normals and uvs".to_string()),
        )
    })?;
    log::info!(
        "encoding {} ({} triangles)",
        input.display(),
        arrays.triangle_count()
    );

    let bytes =
        meshpack_core::encode(&arrays).map_err(|err| CliError::codec("encode failed", &err))?;
    emit(output.as_deref(), &bytes, "buffer", quiet)
}

fn cmd_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    validate_input_file(&input, None)?;
    let output = resolve_output(&input, output, stdout)?;

    let bytes = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let arrays =
        meshpack_core::decode(&bytes).map_err(|err| CliError::codec("decode failed", &err))?;
    let json = serialize_json(&arrays, pretty, compact)?;
    emit(output.as_deref(), json.as_bytes(), "geometry JSON", quiet)
}

fn cmd_inspect(input: PathBuf, pretty: bool) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    validate_input_file(&input, None)?;

    let bytes = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let summary =
        meshpack_core::inspect(&bytes).map_err(|err| CliError::codec("inspect failed", &err))?;
    let json = serialize_json(&summary, pretty, false)?;
    println!("{}", json);
    Ok(())
}

/// `None` means stdout.
fn resolve_output(
    input: &Path,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<Option<PathBuf>, CliError> {
    if stdout {
        return Ok(None);
    }
    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;

    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && parent.exists() => {
            Some(fs::canonicalize(parent))
        }
        Some(parent) if !parent.as_os_str().is_empty() => None,
        _ => Some(fs::canonicalize(".")),
    }
    .transpose()
    .with_context(|| format!("Failed to resolve output path: {}", output.display()))?;

    if let Some(output_dir) = output_dir {
        let target = output_dir.join(
            output
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid output path"))?,
        );
        if target == input_abs {
            return Err(CliError::new(
                format!("output path must differ from input: {}", output.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(Some(output))
}

fn emit(output: Option<&Path>, bytes: &[u8], what: &str, quiet: bool) -> Result<(), CliError> {
    let Some(output) = output else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    if !quiet {
        eprintln!("OK: {} written -> {}", what, output.display());
    }
    Ok(())
}

fn serialize_json<T: Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path, expected_ext: Option<&str>) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("check the path or quote a glob pattern".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            None,
        ));
    }
    if let Some(expected) = expected_ext {
        let ext = input
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext != expected {
            return Err(CliError::new(
                format!("unsupported input format '{}'", input.display()),
                Some(format!("expected a .{} file", expected)),
            ));
        }
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
