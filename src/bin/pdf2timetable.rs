//! CLI binary for edgequake-timetable.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `TimetableConfig` and writes results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use edgequake_timetable::config::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_TITLE};
use edgequake_timetable::{
    generate, render_timetable, render_to_file, write_atomic, DocumentKind, HtmlRenderer,
    ProgressCallback, ScheduleGrid, TimetableConfig, TimetableOutput, TimetableProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a spinner while each document is read, one log line
/// per document once its tables are extracted.
struct CliProgressCallback {
    bar: ProgressBar,
    started: Instant,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Loading documents…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            started: Instant::now(),
        })
    }
}

impl TimetableProgressCallback for CliProgressCallback {
    fn on_document_start(&self, document: DocumentKind) {
        self.bar.set_prefix("Reading");
        self.bar.set_message(format!("{document}…"));
    }

    fn on_document_extracted(&self, document: DocumentKind, rows: usize) {
        self.bar.println(format!(
            "  {} {:<18} {}",
            green("✓"),
            document.to_string(),
            dim(&format!("{rows} rows")),
        ));
    }

    fn on_document_error(&self, document: DocumentKind, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let first_line = error.lines().next().unwrap_or(error);
        let msg = if first_line.chars().count() > 80 {
            format!("{}\u{2026}", first_line.chars().take(79).collect::<String>())
        } else {
            first_line.to_string()
        };
        self.bar
            .println(format!("  {} {:<18} {}", red("✗"), document.to_string(), red(&msg)));
        self.bar.finish_and_clear();
    }

    fn on_timetable_complete(&self, placed: usize, unplaced: usize) {
        self.bar.finish_and_clear();
        let elapsed = format!("{:.1}s", self.started.elapsed().as_secs_f64());
        if unplaced == 0 {
            eprintln!(
                "{} {} courses placed  {}",
                green("✔"),
                bold(&placed.to_string()),
                dim(&elapsed)
            );
        } else {
            eprintln!(
                "{} {} courses placed, {} off-grid  {}",
                cyan("⚠"),
                bold(&placed.to_string()),
                red(&unplaced.to_string()),
                dim(&elapsed)
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the timetable as JSON
  pdf2timetable generate faculty.pdf form_b.pdf

  # Render straight to PDF
  pdf2timetable generate faculty.pdf form_b.pdf -o timetable.pdf

  # HTML output (no pdfium needed)
  pdf2timetable generate faculty.pdf form_b.pdf -o timetable.html

  # Inputs can be URLs
  pdf2timetable generate https://example.edu/faculty.pdf form_b.pdf

  # Render a previously saved JSON payload
  pdf2timetable generate faculty.pdf form_b.pdf > timetable.json
  pdf2timetable render timetable.json -o timetable.pdf

INPUT LAYOUT:
  Faculty timetable columns: code, title, day, time, hall, lecturer
  Form B columns:            code, title, status
  Rows are read by position; extra columns are ignored, short rows skipped.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (file or containing directory)
  RUST_LOG                Override log filter (e.g. edgequake_timetable=debug)
"#;

/// Build a personalised weekly timetable from a faculty timetable and a Form B.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2timetable",
    version,
    about = "Build a personalised weekly timetable from a faculty timetable and Form B",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2TIMETABLE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PDF2TIMETABLE_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract both documents and build the timetable.
    Generate(GenerateArgs),
    /// Render a saved JSON timetable to PDF or HTML.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Faculty timetable: local PDF path or HTTP/HTTPS URL.
    faculty: String,

    /// Student Form B: local PDF path or HTTP/HTTPS URL.
    form_b: String,

    /// Write output to this file instead of printing JSON to stdout.
    #[arg(short, long, env = "PDF2TIMETABLE_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format. Default: from the output extension, else pdf.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    #[command(flatten)]
    render: RenderOptions,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2TIMETABLE_PASSWORD")]
    password: Option<String>,

    /// Maximum size of each input document in bytes.
    #[arg(long, env = "PDF2TIMETABLE_MAX_INPUT_BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_input_bytes: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDF2TIMETABLE_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable the progress spinner.
    #[arg(long, env = "PDF2TIMETABLE_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON produced by `generate` (full payload or bare grid).
    input: PathBuf,

    /// File to write.
    #[arg(short, long)]
    output: PathBuf,

    /// Output format. Default: from the output extension, else pdf.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    #[command(flatten)]
    render: RenderOptions,
}

#[derive(Args, Debug)]
struct RenderOptions {
    /// Heading printed above the grid.
    #[arg(long, env = "PDF2TIMETABLE_TITLE", default_value = DEFAULT_TITLE)]
    title: String,

    /// Directory (or file) of the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib_path: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Pdf,
    Html,
    Json,
}

impl FormatArg {
    /// Explicit flag wins, then the output file extension, then PDF.
    fn resolve(explicit: Option<FormatArg>, output: Option<&Path>) -> FormatArg {
        if let Some(f) = explicit {
            return f;
        }
        let ext = output
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("html") | Some("htm") => FormatArg::Html,
            Some("json") => FormatArg::Json,
            _ => FormatArg::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = match &cli.command {
        Command::Generate(args) => !cli.quiet && !args.no_progress,
        Command::Render(_) => false,
    };
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => run_generate(args, cli.quiet, show_progress).await,
        Command::Render(args) => run_render(args, cli.quiet).await,
    }
}

async fn run_generate(args: GenerateArgs, quiet: bool, show_progress: bool) -> Result<()> {
    let format = FormatArg::resolve(args.format, args.output.as_deref());
    if format == FormatArg::Pdf && args.output.is_none() && args.format.is_some() {
        anyhow::bail!("PDF output needs a file: pass -o <FILE>");
    }

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn TimetableProgressCallback>)
    } else {
        None
    };

    let mut builder = TimetableConfig::builder()
        .max_input_bytes(args.max_input_bytes)
        .download_timeout_secs(args.download_timeout);
    if let Some(ref pwd) = args.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = apply_render_options(builder, &args.render, format)
        .build()
        .context("Invalid configuration")?;

    let output = generate(&args.faculty, &args.form_b, &config)
        .await
        .context("Timetable generation failed")?;

    match args.output {
        None if format == FormatArg::Html => {
            let bytes = render_timetable(&output.timetable, &config)
                .await
                .context("Rendering failed")?;
            io::stdout()
                .lock()
                .write_all(&bytes)
                .context("Failed to write to stdout")?;
        }
        None => {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        }
        Some(ref path) if format == FormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            write_atomic(path, json.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            report_written(quiet, &output, path);
        }
        Some(ref path) => {
            render_to_file(&output.timetable, path, &config)
                .await
                .context("Rendering failed")?;
            report_written(quiet, &output, path);
        }
    }

    Ok(())
}

async fn run_render(args: RenderArgs, quiet: bool) -> Result<()> {
    let format = FormatArg::resolve(args.format, Some(&args.output));
    if format == FormatArg::Json {
        anyhow::bail!("render writes pdf or html; use `generate` for JSON");
    }

    let text = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let grid = parse_grid(&text)
        .with_context(|| format!("{} is not a timetable payload", args.input.display()))?;

    let config = apply_render_options(TimetableConfig::builder(), &args.render, format)
        .build()
        .context("Invalid configuration")?;

    render_to_file(&grid, &args.output, &config)
        .await
        .context("Rendering failed")?;

    if !quiet {
        eprintln!(
            "{}  {} courses  →  {}",
            green("✔"),
            grid.course_count(),
            bold(&args.output.display().to_string()),
        );
    }
    Ok(())
}

/// Accept either a full `TimetableOutput` or just its `timetable` grid.
fn parse_grid(text: &str) -> Result<ScheduleGrid> {
    match serde_json::from_str::<TimetableOutput>(text) {
        Ok(output) => Ok(output.timetable),
        Err(_) => serde_json::from_str::<ScheduleGrid>(text).context("Invalid timetable JSON"),
    }
}

fn apply_render_options(
    builder: edgequake_timetable::TimetableConfigBuilder,
    opts: &RenderOptions,
    format: FormatArg,
) -> edgequake_timetable::TimetableConfigBuilder {
    let mut builder = builder.title(opts.title.clone());
    if let Some(ref dir) = opts.pdfium_lib_path {
        builder = builder.pdfium_lib_path(dir.clone());
    }
    if format == FormatArg::Html {
        builder = builder.renderer(Arc::new(HtmlRenderer::new(opts.title.clone())));
    }
    builder
}

fn report_written(quiet: bool, output: &TimetableOutput, path: &Path) {
    if quiet {
        return;
    }
    let stats = output.stats(0);
    eprintln!(
        "{}  {}/{} matched courses placed  →  {}",
        if stats.unplaced_courses == 0 {
            green("✔")
        } else {
            cyan("⚠")
        },
        stats.placed_courses,
        stats.filtered_courses,
        bold(&path.display().to_string()),
    );
}
