//! pricefall: command-line price predictor for five-day linear-decay auctions.
//!
//! One-shot subcommands evaluate a single panel; `watch` keeps a form open on
//! stdin and re-renders the affected panels after every `field=value` line.

mod config;

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use pricefall_core::error::InputField;
use pricefall_core::validation::window_end;
use pricefall_decay::LinearDecayModel;
use pricefall_form::format::format_instant;
use pricefall_form::parse::parse_instant;
use pricefall_form::{FieldChange, Form, FormSnapshot, Locale, Presenter, RenderedPanel};
use tracing::{debug, info, warn};

use config::Config;

/// Price prediction for linear-decay auctions.
#[derive(Parser)]
#[command(name = "pricefall")]
#[command(version, about = "Predict prices and times on a five-day linear price decay.")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Message language (ja or en). Overrides PRICEFALL_LOCALE.
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Unit label printed after prices. Overrides PRICEFALL_UNIT.
    #[arg(long, global = true)]
    unit: Option<String>,

    /// Read and print wall-clock times in UTC instead of the local zone.
    #[arg(long, global = true)]
    utc: bool,

    /// Emit rendered panels as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error). Overrides PRICEFALL_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json"). Overrides PRICEFALL_LOG_FORMAT.
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show when an auction starting at the given time ends.
    EndTime(EndTimeArgs),
    /// Predict the price at a given time (default: now).
    PriceAt(PriceAtArgs),
    /// Predict when a target price will be reached.
    TimeTo(TimeToArgs),
    /// Read field=value lines from stdin and recompute on every change.
    Watch,
}

#[derive(Args)]
struct WindowArgs {
    /// Auction start, e.g. 2024-01-01T09:00.
    #[arg(short, long)]
    start: String,

    /// Price at the start of the auction.
    #[arg(long)]
    start_price: String,

    /// Price at the end of the auction.
    #[arg(long)]
    end_price: String,
}

impl WindowArgs {
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new()
            .with(InputField::StartTime, &self.start)
            .with(InputField::StartPrice, &self.start_price)
            .with(InputField::EndPrice, &self.end_price)
    }
}

#[derive(Args)]
struct EndTimeArgs {
    /// Auction start, e.g. 2024-01-01T09:00.
    #[arg(short, long)]
    start: String,
}

#[derive(Args)]
struct PriceAtArgs {
    #[command(flatten)]
    window: WindowArgs,

    /// Time to predict the price at (default: now).
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args)]
struct TimeToArgs {
    #[command(flatten)]
    window: WindowArgs,

    /// Observed current price.
    #[arg(short, long)]
    current: String,

    /// Price to wait for.
    #[arg(short, long)]
    target: String,

    /// Instant the wait is measured from (default: now).
    #[arg(long)]
    reference_now: Option<String>,

    /// Instant used to decide whether the target is already past (default: now).
    #[arg(long)]
    evaluation_now: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env = Config::from_env().context("Failed to load configuration")?;
    let config = merge(env, &cli.global);

    init_logging(&config.log_level, &config.log_format);
    debug!(locale = %config.locale, unit = %config.unit, "configuration loaded");

    if cli.global.utc {
        run(cli, &config, Utc)
    } else {
        run(cli, &config, Local)
    }
}

/// CLI flags win over environment values.
fn merge(env: Config, global: &GlobalArgs) -> Config {
    Config {
        locale: global.locale.unwrap_or(env.locale),
        unit: global.unit.clone().unwrap_or(env.unit),
        log_level: global.log_level.clone().unwrap_or(env.log_level),
        log_format: global.log_format.clone().unwrap_or(env.log_format),
    }
}

fn run<Tz>(cli: Cli, config: &Config, zone: Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let presenter = Presenter::new(config.locale, config.unit.clone(), zone.clone());
    let json = cli.global.json;

    match cli.command {
        Commands::EndTime(args) => end_time(args, &zone, json),
        Commands::PriceAt(args) => {
            let at = args
                .at
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            let snapshot = args.window.snapshot().with(InputField::QueryTime, at);
            let form = Form::with_snapshot(LinearDecayModel::new(), zone, snapshot);
            emit(&presenter.render_price(&form.evaluate_price()), json)
        }
        Commands::TimeTo(args) => {
            let reference_now =
                instant_arg(args.reference_now.as_deref(), &zone, "--reference-now")?;
            let snapshot = args
                .window
                .snapshot()
                .with(InputField::CurrentPrice, args.current)
                .with(InputField::TargetPrice, args.target);
            let form = Form::with_snapshot(LinearDecayModel::new(), zone.clone(), snapshot);
            // Sampled after the reference instant, as a separate notion of now.
            let evaluation_now =
                instant_arg(args.evaluation_now.as_deref(), &zone, "--evaluation-now")?;
            let report = form.evaluate_time(reference_now, evaluation_now);
            emit(&presenter.render_time(&report), json)
        }
        Commands::Watch => watch(Form::linear(zone), &presenter, json),
    }
}

fn end_time<Tz>(args: EndTimeArgs, zone: &Tz, json: bool) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = parse_instant(&args.start, zone)
        .ok_or_else(|| anyhow!("invalid start time: {:?}", args.start))?;
    let end = window_end(&start).context("end time is out of range")?;
    let text = format_instant(end, zone);
    if json {
        let value = serde_json::json!({ "end_time": text, "end_time_utc": end });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Parse an optional instant flag, defaulting to the current time.
fn instant_arg<Tz: TimeZone>(raw: Option<&str>, zone: &Tz, flag: &str) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_instant(raw, zone)
            .map(|t| t.with_timezone(&Utc))
            .ok_or_else(|| anyhow!("invalid {flag}: {raw:?}")),
        None => Ok(Utc::now()),
    }
}

fn watch<Tz>(
    mut form: Form<LinearDecayModel, Tz>,
    presenter: &Presenter<Tz>,
    json: bool,
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    info!("watching stdin for field=value changes");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let change: FieldChange = match line.parse() {
            Ok(change) => change,
            Err(e) => {
                warn!(input = line, "ignoring line: {e}");
                continue;
            }
        };

        let dirty = form.apply(change);
        let now = Utc::now();
        for panel in dirty.panels() {
            emit(&presenter.render(&form.evaluate(panel, now)), json)?;
        }
    }
    Ok(())
}

fn emit(panel: &RenderedPanel, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string(panel)?)?;
    } else {
        write!(out, "{panel}")?;
    }
    out.flush()?;
    Ok(())
}

fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .init();
    }
}
