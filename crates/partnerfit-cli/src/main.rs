use anyhow::Context;
use clap::{Parser, Subcommand};
use partnerfit_core::{Diagnosis, PortfolioSummary, SavedAnalysis, SynergyEngine};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod render;

use config::{CliConfig, OutputFormat, LOG_ENV};
use render::{DiagnosisReport, DimensionTable, PortfolioReport};

/// PartnerFit - synergy diagnosis between a corporation and a startup
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: partnerfit.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Output as JSON (same as --format json)
    #[arg(long, global = true, conflicts_with = "format")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    fn output_format(&self, config: &CliConfig) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or(config.output)
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score two profiles and print the diagnosis
    Analyze {
        /// JSON file with `corp` and `startup` profiles
        #[arg(long, value_name = "FILE", conflicts_with_all = ["corp", "startup"])]
        input: Option<PathBuf>,

        /// Corporate ratings, e.g. speed=8,risk=2,cashflow=9,ip=3
        #[arg(long, requires = "startup")]
        corp: Option<String>,

        /// Startup ratings, e.g. speed=3,risk=7,cashflow=2,ip=8
        #[arg(long, requires = "corp")]
        startup: Option<String>,

        #[arg(long)]
        corp_name: Option<String>,

        #[arg(long)]
        startup_name: Option<String>,

        /// Print a saved-analysis record instead of the diagnosis
        #[arg(long)]
        record: bool,
    },

    /// Show the dimension weight table
    Dimensions,

    /// Recompute the diagnosis of saved records
    Replay {
        /// JSON file with one record or a list of records
        file: PathBuf,
    },

    /// Summarize a list of saved records
    Portfolio {
        /// JSON file with a list of records
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter(cli.verbose, std::env::var(LOG_ENV).ok()))?;
    let format = cli.output_format(&config);

    let output = run(cli.command, format, &config)?;
    print!("{output}");
    Ok(())
}

/// Execute one command and return what it prints on stdout
fn run(command: Commands, format: OutputFormat, config: &CliConfig) -> anyhow::Result<String> {
    let engine = SynergyEngine::reference();

    match command {
        Commands::Analyze {
            input: input_file,
            corp,
            startup,
            corp_name,
            startup_name,
            record,
        } => {
            let (corp, startup) = match (input_file, corp, startup) {
                (Some(path), _, _) => input::read_profiles(&path)?,
                (None, Some(corp), Some(startup)) => {
                    let corp_name = corp_name.unwrap_or_else(|| config.default_corp_name.clone());
                    let startup_name =
                        startup_name.unwrap_or_else(|| config.default_startup_name.clone());
                    (
                        input::profile_from_flags(&corp_name, &corp)?,
                        input::profile_from_flags(&startup_name, &startup)?,
                    )
                }
                _ => anyhow::bail!("provide either --input or both --corp and --startup"),
            };

            let result = engine
                .compute(&corp, &startup)
                .with_context(|| format!("scoring {} x {}", corp.name, startup.name))?;
            info!(score = result.score, risk = %result.risk_level(), "analysis complete");

            if record {
                return to_json(&SavedAnalysis::capture(&corp, &startup, &result));
            }

            let diagnosis = Diagnosis::from_result(&result);
            match format {
                OutputFormat::Json => to_json(&diagnosis),
                OutputFormat::Text => Ok(DiagnosisReport {
                    corp: &corp.name,
                    startup: &startup.name,
                    diagnosis: &diagnosis,
                }
                .to_string()),
            }
        }
        Commands::Dimensions => match format {
            OutputFormat::Json => to_json(engine.dimensions()),
            OutputFormat::Text => Ok(DimensionTable(engine.dimensions()).to_string()),
        },
        Commands::Replay { file } => {
            let records = input::read_records(&file)?;
            debug!(count = records.len(), "replaying records");

            let mut diagnoses = Vec::with_capacity(records.len());
            for record in &records {
                diagnoses.push(Diagnosis::from_result(&record.replay(&engine)?));
            }

            match format {
                OutputFormat::Json => to_json(&diagnoses),
                OutputFormat::Text => {
                    let reports: Vec<String> = records
                        .iter()
                        .zip(&diagnoses)
                        .map(|(record, diagnosis)| {
                            DiagnosisReport {
                                corp: &record.corp_name,
                                startup: &record.startup_name,
                                diagnosis,
                            }
                            .to_string()
                        })
                        .collect();
                    Ok(reports.join("\n"))
                }
            }
        }
        Commands::Portfolio { file } => {
            let records = input::read_records(&file)?;
            let summary = PortfolioSummary::from_records(&records);

            match format {
                OutputFormat::Json => to_json(&summary),
                OutputFormat::Text => Ok(PortfolioReport {
                    records: &records,
                    summary: &summary,
                }
                .to_string()),
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::io::Write;

    const CORP: &str = "speed=8,risk=2,cashflow=9,ip=3";
    const STARTUP: &str = "speed=3,risk=7,cashflow=2,ip=8";

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("partnerfit").chain(args.iter().copied()))
    }

    fn records_file(score: u8) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": "1735689600000",
                "createdAt": 1735689600000,
                "corpName": "Acme",
                "startupName": "Rocket",
                "score": {score},
                "riskLevel": "CRITICAL",
                "corpValues": {{ "speed": 8, "risk": 2, "cashflow": 9, "ip": 3 }},
                "startupValues": {{ "speed": 3, "risk": 7, "cashflow": 2, "ip": 8 }}
            }}]"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_json_flag_selects_json_output() {
        let cli = parse(&["analyze", "--json", "--corp", CORP, "--startup", STARTUP]).unwrap();
        assert_eq!(cli.output_format(&CliConfig::default()), OutputFormat::Json);

        let cli = parse(&["--format", "json", "dimensions"]).unwrap();
        assert_eq!(cli.output_format(&CliConfig::default()), OutputFormat::Json);

        let cli = parse(&["dimensions"]).unwrap();
        assert_eq!(cli.output_format(&CliConfig::default()), OutputFormat::Text);
    }

    #[test]
    fn test_json_conflicts_with_format() {
        let err = parse(&["dimensions", "--json", "--format", "text"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_input_conflicts_with_rating_flags() {
        let err = parse(&[
            "analyze", "--input", "pair.json", "--corp", CORP, "--startup", STARTUP,
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_corp_requires_startup() {
        let err = parse(&["analyze", "--corp", CORP]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_analyze_without_profiles_fails() {
        let cli = parse(&["analyze"]).unwrap();
        let err = run(cli.command, OutputFormat::Text, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--input"));
    }

    #[test]
    fn test_analyze_json_diagnosis() {
        let cli = parse(&["analyze", "--json", "--corp", CORP, "--startup", STARTUP]).unwrap();
        let config = CliConfig::default();
        let format = cli.output_format(&config);

        let output = run(cli.command, format, &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["score"], 37);
        assert_eq!(json["risk_level"], "CRITICAL");
    }

    #[test]
    fn test_analyze_uses_configured_names() {
        let cli = parse(&["analyze", "--corp", CORP, "--startup", STARTUP]).unwrap();
        let config = CliConfig {
            default_corp_name: "Acme".to_string(),
            ..CliConfig::default()
        };

        let output = run(cli.command, OutputFormat::Text, &config).unwrap();
        assert!(output.starts_with("Acme x Startup\n"));
    }

    #[test]
    fn test_analyze_rejects_out_of_range_rating() {
        let cli = parse(&[
            "analyze", "--corp", "speed=11,risk=2,cashflow=9,ip=3", "--startup", STARTUP,
        ])
        .unwrap();

        let err = run(cli.command, OutputFormat::Text, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("speed"));
    }

    #[test]
    fn test_replay_matching_record() {
        let file = records_file(37);
        let cli = parse(&["replay", file.path().to_str().unwrap()]).unwrap();

        let output = run(cli.command, OutputFormat::Text, &CliConfig::default()).unwrap();
        assert!(output.contains("SYNERGY SCORE: 37/100"));
    }

    #[test]
    fn test_replay_tampered_record_fails() {
        let file = records_file(90);
        let cli = parse(&["replay", file.path().to_str().unwrap()]).unwrap();

        let err = run(cli.command, OutputFormat::Text, &CliConfig::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("mismatch"));
        assert!(message.contains("1735689600000"));
    }

    #[test]
    fn test_portfolio_summary_json() {
        let file = records_file(37);
        let cli = parse(&["portfolio", file.path().to_str().unwrap()]).unwrap();

        let output = run(cli.command, OutputFormat::Json, &CliConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["critical"], 1);
    }
}
