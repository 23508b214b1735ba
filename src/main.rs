use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pacezones::app::{ActiveUnit, ActiveView, App, InputOutcome};
use pacezones::config::AppConfig;
use pacezones::display;
use pacezones::estimator::HttpEstimator;
use pacezones::logging::{init_logging, LogFormat};
use pacezones::submitter::{SubmitOutcome, TrialSubmitter};
use pacezones::zones::{LthrZones, ZoneCalculator};
use pacezones::error::{ErrorSeverity, PaceZonesError};

/// pacezones - running pace and heart-rate zone reference
///
/// Estimates half-marathon time and training paces from a trial result via an
/// estimation service, and derives seven LTHR training zones locally.
#[derive(Parser)]
#[command(name = "pacezones")]
#[command(version)]
#[command(about = "Running pace and LTHR zone calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Estimation service base address (overrides env and config)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Log output format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate half-marathon time and paces from a trial result
    Estimate {
        /// Trial duration, e.g. 0:21:30
        time: String,
    },

    /// Calculate LTHR heart-rate zones
    Zones {
        /// Lactate threshold heart rate in bpm
        lthr: String,

        /// Print zones as JSON
        #[arg(long)]
        json: bool,

        /// Also report which zone this heart rate falls in
        #[arg(long, value_name = "BPM")]
        hr: Option<i64>,
    },

    /// Interactive tool selector
    Interactive {
        /// View to start in (hm, lthr)
        #[arg(long)]
        view: Option<ActiveView>,
    },

    /// Show or initialise configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Show an error the way its severity asks for
fn notify(err: &PaceZonesError) {
    let message = err.user_message();
    match err.severity() {
        ErrorSeverity::Error => eprintln!("{}", message.as_str().red().bold()),
        ErrorSeverity::Warning => eprintln!("{}", message.as_str().yellow()),
    }
}

fn load_config(cli: &Cli) -> pacezones::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };
    config.apply_env();
    config.apply_api_url(cli.api_url.clone());
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            notify(&err);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging).context("Failed to initialise logging")?;

    let estimator = HttpEstimator::new(
        &config.estimator.base_url,
        config.estimator.request_timeout(),
    );

    match cli.command {
        Commands::Estimate { time } => {
            let mut unit = TrialSubmitter::new();
            unit.set_input(time);
            match unit.submit(&estimator) {
                SubmitOutcome::Skipped => {
                    eprintln!("{}", "Nothing to send: trial time is empty".yellow());
                }
                SubmitOutcome::Failed(err) => {
                    notify(&err.into());
                    std::process::exit(1);
                }
                SubmitOutcome::Displayed | SubmitOutcome::Busy => {
                    println!("{}", display::render_result(&unit.view()));
                }
            }
        }

        Commands::Zones { lthr, json, hr } => {
            let mut unit = LthrZones::new();
            unit.set_input(lthr);
            if !unit.calculate_zones() {
                tracing::debug!("No zones calculated");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(unit.zones())?);
            } else {
                println!("{}", display::render_zones(unit.zones()));
            }
            if let Some(hr) = hr.filter(|_| !unit.zones().is_empty()) {
                let band = ZoneCalculator::band_for_heart_rate(hr, unit.zones());
                println!("{}", display::render_band_lookup(hr, band));
            }
        }

        Commands::Interactive { view } => {
            let view = view.unwrap_or(config.settings.default_view);
            run_interactive(App::with_view(estimator, view))?;
        }

        Commands::Config { show, init } => {
            if init {
                let path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
                AppConfig::default()
                    .save_to_file(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} {}", "✓ Wrote".green(), path.display());
            }
            if show || !init {
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}

fn render(app: &App<HttpEstimator>) -> String {
    match app.unit() {
        ActiveUnit::HalfMarathon(unit) => display::render_submitter(unit),
        ActiveUnit::Lthr(unit) => display::render_lthr(unit),
    }
}

fn run_interactive(mut app: App<HttpEstimator>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", ":hm, :lthr to switch, :quit to exit".dimmed());
    println!("{}", render(&app));

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            ":quit" | ":q" => break,
            ":hm" => app.select(ActiveView::HalfMarathon),
            ":lthr" => app.select(ActiveView::Lthr),
            _ => {
                if let InputOutcome::Submission(SubmitOutcome::Failed(err)) = app.handle_input(line) {
                    notify(&err.into());
                }
            }
        }

        println!("{}", render(&app));
    }

    Ok(())
}
