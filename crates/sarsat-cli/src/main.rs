use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use sarsat_core::BeaconError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("SARSAT_BUILD_COMMIT"),
    ", built ",
    env!("SARSAT_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  sarsat decode A029C2900D97591\n  sarsat encode beacon.json\n  sarsat analyse beacons.txt -o report.json\n  sarsat analyze 'ids/*.txt' --stdout --pretty";

#[derive(Parser, Debug)]
#[command(name = "sarsat")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder and encoder for COSPAS-SARSAT 15-hex beacon identifiers.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log filter directive (e.g. "debug", "sarsat_core=trace")
    #[arg(long, env = "SARSAT_LOG", global = true)]
    log_level: Option<String>,

    /// Suppress non-error output, logs included
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one or more 15-hex beacon ids and print them as JSON.
    Decode {
        /// Beacon ids (15 hex characters each)
        #[arg(required = true)]
        hex_ids: Vec<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Encode a beacon JSON document into its 15-hex id.
    Encode {
        /// Path to a beacon JSON document, or `-` for stdin
        input: PathBuf,
    },
    /// Decode a file of beacon ids (one per line) into a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Analyse {
        /// Path (or single-match glob) to a text file of beacon ids
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Exit with a non-zero code if any beacon id failed to decode
        #[arg(long)]
        strict: bool,

        /// List rejected beacon ids after analysis
        #[arg(long)]
        list_failures: bool,

        /// Report timestamp (RFC3339); defaults to the current time
        #[arg(long, value_parser = parse_generated_at)]
        generated_at: Option<String>,
    },
}

struct AnalyseArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_failures: bool,
    generated_at: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_level.as_deref(), cli.quiet);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("SARSAT_BUILD_COMMIT"),
        "sarsat starting"
    );

    let result = match cli.command {
        Commands::Decode { hex_ids, pretty } => cmd_decode(&hex_ids, pretty, cli.quiet),
        Commands::Encode { input } => cmd_encode(&input),
        Commands::Analyse {
            input,
            report,
            stdout,
            pretty,
            compact,
            strict,
            list_failures,
            generated_at,
        } => cmd_analyse(AnalyseArgs {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet: cli.quiet,
            strict,
            list_failures,
            generated_at,
        }),
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

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_logging(verbose: u8, log_level: Option<&str>, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if let Some(directive) = log_level {
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(filter)
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

fn cmd_decode(hex_ids: &[String], pretty: bool, quiet: bool) -> Result<(), CliError> {
    let mut failed = 0usize;
    let mut malformed = false;
    for hex_id in hex_ids {
        match sarsat_core::decode_beacon_id(hex_id) {
            Ok(beacon) => println!("{}", to_json(&beacon, pretty)?),
            Err(err) => {
                failed += 1;
                malformed |= matches!(
                    err,
                    BeaconError::InvalidLength { .. } | BeaconError::InvalidHex(_)
                );
                if !quiet {
                    eprintln!("{hex_id}: {err}");
                }
            }
        }
    }
    if failed > 0 {
        return Err(CliError::new(
            format!("{failed} of {} beacon ids failed to decode", hex_ids.len()),
            malformed.then(|| "beacon ids are exactly 15 hex characters".to_string()),
        ));
    }
    Ok(())
}

fn cmd_encode(input: &Path) -> Result<(), CliError> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read beacon JSON from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read beacon JSON: {}", input.display()))?
    };
    let beacon: sarsat_core::Beacon = serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid beacon JSON: {err}"),
            Some("the document must match `sarsat decode` output".to_string()),
        )
    })?;
    let hex_id = sarsat_core::encode_beacon(&beacon)
        .map_err(|err| CliError::new(format!("cannot encode beacon: {err}"), None))?;
    println!("{hex_id}");
    Ok(())
}

fn cmd_analyse(args: AnalyseArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&path, &input_abs)?;
        Some(path)
    };

    let mut rep = sarsat_core::analyze_hex_file(&resolved_input)
        .context("Beacon id analysis failed")?;
    rep.generated_at = match args.generated_at {
        Some(stamp) => stamp,
        None => OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format report timestamp")?,
    };
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            info!(path = %report.display(), "report written");
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.list_failures && !args.quiet {
        print_failures(&rep);
    }
    if args.strict && !rep.failures.is_empty() {
        return Err(CliError::new(
            format!("{} beacon ids failed to decode", rep.failures.len()),
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A parent that does not exist yet cannot hold the input.
    let Ok(report_dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn serialize_report(
    rep: &sarsat_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    to_json(rep, pretty)
}

fn print_failures(rep: &sarsat_core::Report) {
    eprintln!("Rejected beacon ids:");
    for failure in &rep.failures {
        eprintln!(
            "  line {}: {} ({})",
            failure.line, failure.hex_id, failure.message
        );
    }
}

fn parse_generated_at(value: &str) -> Result<String, String> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map(|_| value.to_string())
        .map_err(|err| format!("expected an RFC3339 timestamp: {err}"))
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text file with one beacon id per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text file with one beacon id per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
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

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single input file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{is_glob_pattern, parse_generated_at, resolve_input_path};

    #[test]
    fn detects_glob_patterns() {
        assert!(is_glob_pattern("ids/*.txt"));
        assert!(is_glob_pattern("ids/day?.txt"));
        assert!(!is_glob_pattern("ids/day1.txt"));
    }

    #[test]
    fn plain_paths_pass_through() {
        let path = resolve_input_path(Path::new("beacons.txt")).unwrap();
        assert_eq!(path, Path::new("beacons.txt"));
    }

    #[test]
    fn generated_at_must_be_rfc3339() {
        assert!(parse_generated_at("2024-05-01T12:00:00Z").is_ok());
        assert!(parse_generated_at("yesterday").is_err());
    }
}
