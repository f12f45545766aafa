use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::application::{AppError, BatchService};
use crate::domain::{cost_per_unit, format_quantity, parse_number};
use crate::io::{Exporter, read_ingredients_csv};
use crate::logging::init_tracing;
use crate::storage::PreferenceStore;

pub mod chart;
pub mod shell;
pub mod table;

use chart::write_chart;
use shell::Shell;
use table::{write_ledger, write_summary};

/// Cookie Cost - batch economics for bakers
#[derive(Parser)]
#[command(name = "cookie-cost")]
#[command(about = "Track ingredient costs and see what a cookie batch earns")]
#[command(version)]
pub struct Cli {
    /// Preference file path (defaults to ~/.cookie_cost.json)
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the ingredient rows and batch parameters come from.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Ingredient CSV (name,unit_cost,quantity_used or name,bulk_cost,bulk_units,quantity_used)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Start from the built-in starter recipe
    #[arg(long)]
    pub seed: bool,

    /// Cookies per batch
    #[arg(long = "yield", default_value = "50", allow_hyphen_values = true)]
    pub cookie_yield: String,

    /// Price per cookie
    #[arg(long = "price", default_value = "0.50", allow_hyphen_values = true)]
    pub cookie_price: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ingredient table and the batch summary
    Summary {
        #[command(flatten)]
        batch: BatchArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the profit vs cost bar chart
    Chart {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Convert a bulk purchase price into a per-unit cost
    UnitCost {
        /// Price paid for the package
        #[arg(allow_hyphen_values = true)]
        cost: String,

        /// Units in the package
        #[arg(allow_hyphen_values = true)]
        units: String,
    },

    /// Export the batch to CSV (rows) or JSON (report)
    Export {
        /// What to export
        #[arg(value_enum)]
        export_type: ExportType,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Show or change saved preferences
    Prefs {
        /// Ask for confirmation before deleting an ingredient
        #[arg(long)]
        ask_before_delete: Option<bool>,
    },

    /// Interactive session; starts from the starter recipe unless --input is given
    Shell {
        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportType {
    Rows,
    Report,
}

impl BatchArgs {
    /// Build the session: seed rows, CSV rows, then parameters.
    /// Unparseable parameters fail; a summary that cannot be calculated does not.
    pub fn build_service(
        &self,
        store: Option<PreferenceStore>,
        seed_by_default: bool,
    ) -> Result<BatchService> {
        let mut service = BatchService::new(store);

        if self.seed || (seed_by_default && self.input.is_none()) {
            service.seed_default_ingredients()?;
        }

        if let Some(path) = &self.input {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            let import = read_ingredients_csv(file)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            for error in &import.errors {
                eprintln!("Skipped {}", error);
            }
            service.load_rows(import.rows)?;
        }

        match service.apply_parameters(&self.cookie_yield, &self.cookie_price) {
            Ok(_) | Err(AppError::Domain(_)) => Ok(service),
            Err(e) => Err(e.into()),
        }
    }
}

impl Cli {
    fn preference_store(&self) -> PreferenceStore {
        match &self.prefs {
            Some(path) => PreferenceStore::new(path),
            None => PreferenceStore::default_location(),
        }
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);
        let store = self.preference_store();
        tracing::debug!(path = %store.path().display(), "preference file");

        match self.command {
            Commands::Summary { batch, format } => {
                let mut service = batch.build_service(Some(store), false)?;
                let summary = service.recalculate()?;
                let mut out = io::stdout().lock();
                match format {
                    OutputFormat::Table => {
                        write_ledger(&mut out, service.ledger())?;
                        writeln!(out)?;
                        write_summary(&mut out, &summary)?;
                    }
                    OutputFormat::Json => {
                        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
                    }
                }
            }

            Commands::Chart { batch } => {
                let service = batch.build_service(Some(store), false)?;
                let series = service.chart()?;
                write_chart(&mut io::stdout().lock(), &series)?;
            }

            Commands::UnitCost { cost, units } => {
                let cost = parse_number(&cost, "Cost")?;
                let units = parse_number(&units, "Units")?;
                println!("{}", format_quantity(cost_per_unit(cost, units)?));
            }

            Commands::Export {
                export_type,
                output,
                batch,
            } => {
                let service = batch.build_service(Some(store), false)?;
                run_export_command(&service, export_type, output.as_deref())?;
            }

            Commands::Prefs { ask_before_delete } => {
                let mut service = BatchService::new(Some(store.clone()));
                if let Some(value) = ask_before_delete {
                    service.set_ask_before_delete(value);
                }
                println!("Preference file: {}", store.path().display());
                println!(
                    "  ask_before_delete: {}",
                    service.preferences().ask_before_delete
                );
            }

            Commands::Shell { batch } => {
                let service = batch.build_service(Some(store), true)?;
                Shell::new(service, io::stdin().lock(), io::stdout().lock()).run()?;
            }
        }

        Ok(())
    }
}

fn run_export_command(
    service: &BatchService,
    export_type: ExportType,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };

    match export_type {
        ExportType::Rows => {
            let count = exporter.export_rows_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} ingredients", count);
            }
        }
        ExportType::Report => {
            let report = exporter.export_report_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported report: {} ingredients, profit {}",
                    report.rows.len(),
                    crate::domain::format_currency(report.summary.profit)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_summary_defaults() {
        let cli = parse(&["cookie-cost", "summary"]);
        match cli.command {
            Commands::Summary { batch, format } => {
                assert_eq!(batch.cookie_yield, "50");
                assert_eq!(batch.cookie_price, "0.50");
                assert!(!batch.seed);
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn test_parse_negative_price() {
        let cli = parse(&["cookie-cost", "chart", "--seed", "--price", "-1"]);
        match cli.command {
            Commands::Chart { batch } => assert_eq!(batch.cookie_price, "-1"),
            _ => panic!("expected chart"),
        }
    }

    #[test]
    fn test_parse_prefs_toggle() {
        let cli = parse(&[
            "cookie-cost",
            "--prefs",
            "/tmp/p.json",
            "prefs",
            "--ask-before-delete",
            "false",
        ]);
        assert_eq!(cli.prefs, Some(PathBuf::from("/tmp/p.json")));
        match cli.command {
            Commands::Prefs { ask_before_delete } => assert_eq!(ask_before_delete, Some(false)),
            _ => panic!("expected prefs"),
        }
    }

    #[test]
    fn test_build_service_tolerates_zero_yield() {
        let batch = BatchArgs {
            input: None,
            seed: true,
            cookie_yield: "0".into(),
            cookie_price: "0.5".into(),
        };
        let service = batch.build_service(None, false).unwrap();
        assert_eq!(service.parameters().cookie_yield, 0.0);
        assert!(service.chart().is_ok());
    }

    #[test]
    fn test_build_service_rejects_bad_yield() {
        let batch = BatchArgs {
            input: None,
            seed: false,
            cookie_yield: "many".into(),
            cookie_price: "0.5".into(),
        };
        assert!(batch.build_service(None, false).is_err());
    }

    #[test]
    fn test_build_service_seed_by_default() {
        let batch = BatchArgs {
            input: None,
            seed: false,
            cookie_yield: "50".into(),
            cookie_price: "0.5".into(),
        };
        assert_eq!(batch.build_service(None, true).unwrap().ledger().len(), 6);
        assert!(batch.build_service(None, false).unwrap().ledger().is_empty());
    }
}
