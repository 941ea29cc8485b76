//! Media Dash - Media Performance Dashboard renderer
//!
//! Usage:
//!   media-dash                              # defaults (seed 42, 50 stores)
//!   media-dash --seed 7 --stores 120        # resize the synthetic dataset
//!   media-dash --dma CA --dma NY --region West
//!   media-dash --goal revenue --goal-value 500000
//!   media-dash --format json --output dashboard.json
//!
//! Environment:
//!   MEDIA_DASH_CONFIG   Config file path (default: media_dash.toml; missing = defaults)
//!   MEDIA_DASH_THEME    dark | light | plain
//!   RUST_LOG            Log filter (default: media_dash=info)

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use media_dash::config::DashboardConfig;
use media_dash::report::{DashboardSnapshot, OutputFormat};
use media_dash::theme::ThemeMode;
use media_dash::views::GoalMetric;

/// Render the synthetic media performance dashboard
#[derive(Parser, Debug)]
#[command(name = "media-dash")]
#[command(about = "Render a synthetic media performance dashboard as text or JSON")]
struct Cli {
    /// TOML config file (default: $MEDIA_DASH_CONFIG, falling back to defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of stores to generate
    #[arg(long)]
    stores: Option<usize>,

    /// Selected DMA (repeatable; default: first 5 in the table)
    #[arg(long = "dma")]
    dmas: Vec<String>,

    /// Selected region (repeatable; default: all regions present)
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Goal metric: bookings | revenue | patient-to-slot-ratio
    #[arg(long)]
    goal: Option<GoalMetric>,

    /// Goal value
    #[arg(long)]
    goal_value: Option<f64>,

    /// Search scenario spend (0-10000)
    #[arg(long)]
    search_spend: Option<u32>,

    /// Social scenario spend (0-10000)
    #[arg(long)]
    social_spend: Option<u32>,

    /// Display scenario spend (0-10000)
    #[arg(long)]
    display_spend: Option<u32>,

    /// Incremental spend to allocate across channels (multiple of 100)
    #[arg(long)]
    incremental: Option<f64>,

    /// Output format: text | json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Theme: dark | light | plain
    #[arg(long, env = "MEDIA_DASH_THEME")]
    theme: Option<ThemeMode>,

    /// Store table rows shown in text output
    #[arg(long)]
    rows: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        if let Some(stores) = self.stores {
            config.generator.store_count = stores;
        }
        if !self.dmas.is_empty() {
            config.filter.dmas = Some(self.dmas.clone());
        }
        if !self.regions.is_empty() {
            config.filter.regions = Some(self.regions.clone());
        }
        if let Some(metric) = self.goal {
            config.goal.metric = metric;
        }
        if let Some(value) = self.goal_value {
            config.goal.value = Some(value);
        }
        if let Some(v) = self.search_spend {
            config.scenario.search = v;
        }
        if let Some(v) = self.social_spend {
            config.scenario.social = v;
        }
        if let Some(v) = self.display_spend {
            config.scenario.display = v;
        }
        if let Some(amount) = self.incremental {
            config.incremental_spend = amount;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if let Some(theme) = self.theme {
            config.report.theme = theme;
        }
        if let Some(rows) = self.rows {
            config.report.table_rows = rows;
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "media_dash=info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => DashboardConfig::from_env(),
    };
    cli.apply(&mut config);
    debug!(?config, "Resolved dashboard config");

    let snapshot = DashboardSnapshot::build(&config).context("Failed to build dashboard")?;

    let rendered = match config.report.format {
        OutputFormat::Json => snapshot.to_json().context("Failed to serialize dashboard")?,
        OutputFormat::Text => {
            // Files and pipes get no escape codes
            let to_terminal = cli.output.is_none() && io::stdout().is_terminal();
            let theme = if to_terminal {
                config.report.theme
            } else {
                ThemeMode::Plain
            };
            snapshot.render_text(&theme.palette(), config.report.table_rows)
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            info!("Dashboard written to {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}
