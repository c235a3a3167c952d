//! Run a well-clear detector over an encounter scenario.
//!
//! Usage:
//!   cargo run -p wcv-cli --bin wcv_detect -- --scenario encounter.json
//!
//! The result is printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wcv_cli::{run, Config, Scenario};
use wcv_core::{DetectorConfig, ParameterData, SeverityNorm, TvarKind};

/// Compute the loss-of-well-clear interval for an ownship/intruder pair
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scenario JSON file
    #[arg(long)]
    scenario: PathBuf,

    /// Parameter file with `key = value [unit]` lines, applied last
    #[arg(long)]
    params: Option<PathBuf>,

    /// Horizontal time variable: taumod, tcpa or tep
    #[arg(long, default_value = "taumod")]
    tvar: TvarKind,

    /// Severity norm at closest approach
    #[arg(long, value_enum, default_value_t = SeverityArg::Max)]
    severity: SeverityArg,

    /// Log inputs and results in the formal model's syntax
    #[arg(long)]
    pvs: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SeverityArg {
    Max,
    Euclidean,
}

impl From<SeverityArg> for SeverityNorm {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Max => SeverityNorm::MaxRatio,
            SeverityArg::Euclidean => SeverityNorm::EuclideanRatio,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(config.log_directive.parse()?);
    if args.pvs {
        filter = filter.add_directive(format!("{}=info", wcv_core::detector::PVS_TARGET).parse()?);
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let scenario = Scenario::load(&args.scenario)?;

    let mut parameters = scenario.parameters.clone();
    if let Some(path) = &args.params {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read parameters {}", path.display()))?;
        let file_params = ParameterData::parse_lines(&text)
            .with_context(|| format!("in {}", path.display()))?;
        parameters.copy_from(&file_params);
    }

    let detector = DetectorConfig {
        tvar: args.tvar,
        parameters,
        pvs_check: args.pvs,
        severity: args.severity.into(),
        ..DetectorConfig::default()
    }
    .build()
    .context("invalid detector configuration")?;

    tracing::info!(detector = %detector, "Running detection");

    let report = run(&detector, &scenario, config.lookahead_s);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
