//! coin-bias - posterior of a coin's bias from observed flips.
//!
//! The main entry point, handling:
//! - Estimation on a grid (default command)
//! - Terminal / SVG charts and JSON / Markdown reports
//! - Configuration inspection and validation

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use cb_common::error::StructuredError;
use cb_common::{Error, Method, Observations, OutputFormat, SCHEMA_VERSION};
use cb_config::{load_settings, validate_settings, ConfigError, DataSettings, Settings};
use cb_core::estimator::Estimator;
use cb_core::exit_codes::ExitCode;
use cb_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel, ENV_LOG_LEVEL};
use cb_core::render::{Chart, RenderSink, SvgSink, TerminalSink};
use cb_core::report::{render_markdown, summary_line, EstimateReport};
use cb_core::summary::summarize;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

/// Estimate the posterior distribution of a coin's bias from observed flips
#[derive(Parser)]
#[command(name = "coin-bias")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,

    /// Arguments for the default `estimate` command
    #[command(flatten)]
    estimate: EstimateArgs,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to a config file (overrides COIN_BIAS_CONFIG and XDG lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "plot")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the posterior and plot it (default)
    Estimate(EstimateArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
struct EstimateArgs {
    /// Flips as 0/1 or H/T: "1,0,1", "1 0 1", "101" or "HTH"
    #[arg(long, conflicts_with = "data_file")]
    data: Option<String>,

    /// Text file of flips ('#' starts a comment)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Number of grid points
    #[arg(long)]
    grid_points: Option<usize>,

    /// First grid value
    #[arg(long, allow_negative_numbers = true)]
    grid_lower: Option<f64>,

    /// Last grid value
    #[arg(long, allow_negative_numbers = true)]
    grid_upper: Option<f64>,

    /// Posterior evaluation method
    #[arg(long)]
    method: Option<Method>,

    /// Credible interval level in (0, 1)
    #[arg(long)]
    credible_level: Option<f64>,

    /// Also write the chart as an SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Skip the terminal chart (plot format only)
    #[arg(long)]
    no_plot: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Validate a config file (defaults to the resolved one)
    Validate {
        /// Config file to validate
        path: Option<PathBuf>,
    },
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Clean,
                _ => ExitCode::ArgsError,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let flag_level = (cli.global.quiet || cli.global.verbose > 0)
        .then(|| LogLevel::from_flags(cli.global.verbose, cli.global.quiet));
    let honor_rust_log = flag_level.is_none() && std::env::var_os(ENV_LOG_LEVEL).is_none();
    let log_config = LogConfig::from_env(flag_level, cli.global.log_format);
    init_logging(&log_config, honor_rust_log);

    let run_id = generate_run_id();
    info!(run_id = %run_id, version = env!("CARGO_PKG_VERSION"), "coin-bias started");

    let exit_code = match &cli.command {
        None => run_estimate(&cli.global, &cli.estimate, &run_id),
        Some(Commands::Estimate(args)) => run_estimate(&cli.global, args, &run_id),
        Some(Commands::Config(args)) => run_config(&cli.global, args, &run_id),
        Some(Commands::Version) => match print_version(&cli.global) {
            Ok(()) => ExitCode::Clean,
            Err(err) => output_error(&cli.global, &err),
        },
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// estimate
// ============================================================================

fn run_estimate(global: &GlobalOpts, args: &EstimateArgs, run_id: &str) -> ExitCode {
    match estimate(global, args, run_id) {
        Ok(()) => ExitCode::Clean,
        Err(err) => output_error(global, &err),
    }
}

/// Fold estimate flags into the loaded settings.
fn apply_overrides(settings: &mut Settings, args: &EstimateArgs) {
    let est = &mut settings.estimator;
    if let Some(points) = args.grid_points {
        est.grid_points = points;
    }
    if let Some(lower) = args.grid_lower {
        est.grid_lower = lower;
    }
    if let Some(upper) = args.grid_upper {
        est.grid_upper = upper;
    }
    if let Some(method) = args.method {
        est.method = method;
    }
    if let Some(level) = args.credible_level {
        settings.render.credible_level = level;
    }
    // Flip data on the command line replaces whatever the file configured.
    if args.data.is_some() || args.data_file.is_some() {
        settings.data = DataSettings::default();
    }
}

fn observations(settings: &Settings, args: &EstimateArgs) -> cb_common::Result<Observations> {
    if let Some(raw) = &args.data {
        return Observations::parse(raw);
    }
    if let Some(path) = &args.data_file {
        let content = std::fs::read_to_string(path)?;
        return Observations::parse(&content);
    }
    settings.observations()
}

fn estimate(global: &GlobalOpts, args: &EstimateArgs, run_id: &str) -> cb_common::Result<()> {
    let resolved = load_settings(global.config.as_deref())?;
    let mut settings = resolved.settings;
    apply_overrides(&mut settings, args);
    validate_settings(&settings).map_err(ConfigError::from)?;

    let data = observations(&settings, args)?;
    let estimator = Estimator::from_settings(&settings);
    let estimate = estimator.estimate(&data)?;
    let summary = summarize(&estimate, settings.render.credible_level)?;

    let chart = Chart::posterior(&estimate);
    chart.validate()?;

    if let Some(path) = &args.svg {
        let render = &settings.render;
        SvgSink::new(path, render.svg_width, render.svg_height).render(&chart)?;
    }

    let stdout = std::io::stdout();
    match global.format {
        OutputFormat::Plot => {
            if !args.no_plot {
                let color = !global.no_color && stdout.is_terminal();
                let render = &settings.render;
                TerminalSink::new(stdout.lock(), render.plot_width, render.plot_height)
                    .with_color(color)
                    .render(&chart)?;
            }
            writeln!(stdout.lock(), "{}", summary_line(&summary))?;
        }
        OutputFormat::Json => {
            let report = EstimateReport::new(run_id, &data, &estimator, &estimate, summary);
            writeln!(stdout.lock(), "{}", report.to_json_pretty()?)?;
        }
        OutputFormat::Md => {
            write!(stdout.lock(), "{}", render_markdown(&summary))?;
        }
        OutputFormat::Summary => {
            writeln!(stdout.lock(), "{}", summary_line(&summary))?;
        }
    }

    info!(run_id = %run_id, format = %global.format, "run complete");
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn run_config(global: &GlobalOpts, args: &ConfigArgs, run_id: &str) -> ExitCode {
    let result = match &args.command {
        ConfigCommands::Show => config_show(global, run_id),
        ConfigCommands::Validate { path } => config_validate(global, path.as_deref(), run_id),
    };
    match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => output_error(global, &err),
    }
}

fn config_show(global: &GlobalOpts, run_id: &str) -> cb_common::Result<()> {
    let resolved = load_settings(global.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "source": resolved.source.to_string(),
                "path": resolved.path.as_ref().map(|p| p.display().to_string()),
                "settings": resolved.settings,
            });
            writeln!(stdout, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        _ => {
            let body = resolved.settings.to_toml_string()?;
            match &resolved.path {
                Some(path) => writeln!(stdout, "# {} ({})", path.display(), resolved.source)?,
                None => writeln!(stdout, "# {}", resolved.source)?,
            }
            write!(stdout, "{body}")?;
        }
    }
    Ok(())
}

fn config_validate(global: &GlobalOpts, path: Option<&Path>, run_id: &str) -> cb_common::Result<()> {
    let (path, source) = match path {
        Some(p) => {
            let settings = Settings::from_file(p)?;
            validate_settings(&settings).map_err(ConfigError::from)?;
            (Some(p.to_path_buf()), "argument".to_string())
        }
        None => {
            let resolved = load_settings(global.config.as_deref())?;
            (resolved.path, resolved.source.to_string())
        }
    };
    let shown = path
        .as_ref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());

    let mut stdout = std::io::stdout().lock();
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "valid",
                "source": source,
                "path": path.as_ref().map(|p| p.display().to_string()),
            });
            writeln!(stdout, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        _ => writeln!(stdout, "config OK: {shown}")?,
    }
    Ok(())
}

// ============================================================================
// version / errors
// ============================================================================

fn print_version(global: &GlobalOpts) -> cb_common::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match global.format {
        OutputFormat::Json => {
            let info = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "coin_bias_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            writeln!(stdout, "{}", serde_json::to_string_pretty(&info)?)?;
        }
        _ => writeln!(
            stdout,
            "coin-bias {}\nschema version: {}",
            env!("CARGO_PKG_VERSION"),
            SCHEMA_VERSION
        )?,
    }
    stdout.flush()?;
    Ok(())
}

/// Report an error on stderr and pick the exit code. stdout stays empty.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let exit_code = ExitCode::from(err);
    debug!(code = err.code(), category = %err.category(), exit = %exit_code, "{err}");

    match global.format {
        OutputFormat::Json => eprintln!("{}", StructuredError::from(err).to_json_pretty()),
        _ => {
            eprintln!("error: {err}");
            eprintln!("hint: {}", err.remediation());
        }
    }
    exit_code
}
