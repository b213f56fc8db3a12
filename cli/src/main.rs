use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsondiff_core::{
    diff_with_options, format_normalized, format_value, parse_reader, render_report, DiffOptions,
    FormatStyle, RenderFlags, Value, DEFAULT_INDENT, DEFAULT_MAX_DEPTH,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "jsondiff")]
#[command(about = "Compare two JSON documents and classify every differing path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON documents
    Diff {
        /// Left JSON file ("-" for stdin)
        left: PathBuf,

        /// Right JSON file ("-" for stdin)
        right: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Maximum nesting depth before the comparison is aborted
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Do not mark paths missing on one side (text format)
        #[arg(long)]
        hide_missing: bool,

        /// Do not mark unequal values (text format)
        #[arg(long)]
        hide_changed: bool,

        /// Exit with status 1 when the documents differ
        #[arg(long)]
        exit_code: bool,
    },

    /// Pretty-print a JSON document with every object's keys sorted
    Normalize {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
    },

    /// Pretty-print or minify a JSON document, keeping key order
    Format {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,

        /// Minify instead of pretty-printing
        #[arg(long, conflicts_with = "indent")]
        compact: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ReportFormat {
    /// Status maps and counts as pretty JSON
    Json,
    /// Status maps and counts as single-line JSON
    Compact,
    /// Side-by-side annotated documents with a summary
    Text,
}

/// Exit status when the documents differ and `--exit-code` is set.
const EXIT_DIFFERENT: u8 = 1;
/// Exit status for any failure, kept apart from `EXIT_DIFFERENT`.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Diff {
            left,
            right,
            output,
            format,
            max_depth,
            hide_missing,
            hide_changed,
            exit_code,
        } => {
            if is_stdin(&left) && is_stdin(&right) {
                bail!("Only one of LEFT and RIGHT can read from stdin (\"-\")");
            }
            let left_doc = read_document(&left)?;
            let right_doc = read_document(&right)?;

            let options = DiffOptions { max_depth };
            let result = diff_with_options(&left_doc, &right_doc, &options)
                .map_err(|e| anyhow::Error::from(e).context("Comparison failed"))?;

            tracing::debug!(
                left = %left.display(),
                right = %right.display(),
                differences = result.counts.total(),
                "compared documents"
            );

            match format {
                ReportFormat::Json => write_json(&result, output.as_deref(), true)?,
                ReportFormat::Compact => write_json(&result, output.as_deref(), false)?,
                ReportFormat::Text => {
                    let flags = RenderFlags {
                        show_missing: !hide_missing,
                        show_changed: !hide_changed,
                    };
                    let report = render_report(&left_doc, &right_doc, &result, flags);
                    write_text(&report, output.as_deref())?;
                }
            }

            if exit_code && !result.is_identical() {
                return Ok(ExitCode::from(EXIT_DIFFERENT));
            }
        }
        Commands::Normalize {
            input,
            output,
            indent,
        } => {
            let doc = read_document(&input)?;
            let text = format_normalized(&doc, FormatStyle::Pretty { indent })
                .context("Failed to format document")?;
            write_text(&text, output.as_deref())?;
        }
        Commands::Format {
            input,
            output,
            indent,
            compact,
        } => {
            let doc = read_document(&input)?;
            let style = if compact {
                FormatStyle::Compact
            } else {
                FormatStyle::Pretty { indent }
            };
            let text = format_value(&doc, style).context("Failed to format document")?;
            write_text(&text, output.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn read_document(path: &Path) -> Result<Value> {
    if is_stdin(path) {
        return parse_reader(io::stdin().lock()).context("Failed to parse JSON from stdin");
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    parse_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    Ok(writer)
}

fn write_json<T: serde::Serialize>(val: &T, path: Option<&Path>, pretty: bool) -> Result<()> {
    let mut writer = open_output(path)?;

    if pretty {
        serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
    } else {
        serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}

fn write_text(text: &str, path: Option<&Path>) -> Result<()> {
    let mut writer = open_output(path)?;
    writer
        .write_all(text.as_bytes())
        .context("Failed to write output")?;
    if !text.ends_with('\n') {
        writeln!(writer).context("Failed to write trailing newline")?;
    }
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
