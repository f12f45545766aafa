use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufRead, Write};

use crate::application::{AppError, BatchService, DeleteOutcome};
use crate::domain::{RowField, cost_per_unit, format_quantity, parse_number};
use crate::io::Exporter;

use super::chart::write_chart;
use super::table::{write_ledger, write_summary};

/// One line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(override_usage = "<COMMAND> [ARGS]")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Add an ingredient, or update the one with the same name
    Add {
        name: String,
        /// Cost of a single unit
        #[arg(allow_hyphen_values = true)]
        unit_cost: String,
        #[arg(allow_hyphen_values = true)]
        quantity_used: String,
    },

    /// Add an ingredient priced from a bulk purchase
    Bulk {
        name: String,
        /// Price paid for the whole package
        #[arg(allow_hyphen_values = true)]
        bulk_cost: String,
        /// Units in the package
        #[arg(allow_hyphen_values = true)]
        bulk_units: String,
        #[arg(allow_hyphen_values = true)]
        quantity_used: String,
    },

    /// Edit one cell: name, unit_cost or quantity_used
    Edit {
        name: String,
        field: RowField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete an ingredient
    Delete { name: String },

    /// Remove every ingredient
    Clear,

    /// Set cookies per batch and price per cookie, then recalculate
    Apply {
        #[arg(allow_hyphen_values = true)]
        cookie_yield: String,
        #[arg(allow_hyphen_values = true)]
        cookie_price: String,
    },

    /// Show the ingredient table and summary
    Show,

    /// Show the profit vs cost chart
    Chart,

    /// Convert a bulk price into a per-unit cost
    UnitCost {
        #[arg(allow_hyphen_values = true)]
        cost: String,
        #[arg(allow_hyphen_values = true)]
        units: String,
    },

    /// Turn the delete confirmation on or off
    Confirm { state: Toggle },

    /// Write the ingredient table as CSV
    Export { path: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl ShellCommand {
    fn mutates(&self) -> bool {
        matches!(
            self,
            ShellCommand::Add { .. }
                | ShellCommand::Bulk { .. }
                | ShellCommand::Edit { .. }
                | ShellCommand::Delete { .. }
                | ShellCommand::Clear
                | ShellCommand::Apply { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

/// Interactive session reading commands from `input` and writing to `output`.
pub struct Shell<R, W> {
    service: BatchService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: BatchService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input. Preferences are saved on exit.
    /// Returns the service so callers can inspect the final state.
    pub fn run(mut self) -> Result<BatchService> {
        writeln!(
            self.output,
            "Cookie cost calculator. Type 'help' for commands."
        )?;
        self.refresh()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let words = match shell_words::split(&line) {
                Ok(words) => words,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    write!(self.output, "{}", e)?;
                    continue;
                }
            };

            if matches!(command, ShellCommand::Quit) {
                break;
            }

            let mutates = command.mutates();
            if let Err(e) = self.execute(command) {
                match e.downcast_ref::<AppError>() {
                    Some(app_err) => writeln!(self.output, "{}", app_err)?,
                    None => writeln!(self.output, "Error: {:#}", e)?,
                }
                // the edit went through, only the totals were skipped
                if mutates && matches!(e.downcast_ref::<AppError>(), Some(AppError::Domain(_))) {
                    self.refresh()?;
                }
            }
        }

        self.service.save_preferences();
        Ok(self.service)
    }

    fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Add {
                name,
                unit_cost,
                quantity_used,
            } => {
                self.service
                    .add_or_update(&name, &unit_cost, &quantity_used)?;
                self.refresh()?;
            }

            ShellCommand::Bulk {
                name,
                bulk_cost,
                bulk_units,
                quantity_used,
            } => {
                let bulk_cost = parse_number(&bulk_cost, "Bulk cost").map_err(AppError::from)?;
                let bulk_units =
                    parse_number(&bulk_units, "Bulk units").map_err(AppError::from)?;
                let quantity_used =
                    parse_number(&quantity_used, RowField::QuantityUsed.label())
                        .map_err(AppError::from)?;
                self.service
                    .add_bulk(&name, bulk_cost, bulk_units, quantity_used)?;
                self.refresh()?;
            }

            ShellCommand::Edit { name, field, value } => {
                self.service.edit_cell(&name, field, &value)?;
                self.refresh()?;
            }

            ShellCommand::Delete { name } => {
                let prompt = format!("Delete '{}'? [y/N] ", name.trim());
                let input = &mut self.input;
                let output = &mut self.output;
                let outcome = self
                    .service
                    .delete(&name, || confirm(input, output, &prompt))?;
                match outcome {
                    DeleteOutcome::Deleted => self.refresh()?,
                    DeleteOutcome::Cancelled => writeln!(self.output, "Kept '{}'.", name.trim())?,
                    DeleteOutcome::NotFound => {
                        writeln!(self.output, "No ingredient named '{}'.", name.trim())?
                    }
                }
            }

            ShellCommand::Clear => {
                let input = &mut self.input;
                let output = &mut self.output;
                let cleared = self.service.clear(|| {
                    confirm(input, output, "Remove all ingredients and reset totals? [y/N] ")
                })?;
                if cleared {
                    self.refresh()?;
                }
            }

            ShellCommand::Apply {
                cookie_yield,
                cookie_price,
            } => {
                self.service.apply_parameters(&cookie_yield, &cookie_price)?;
                self.refresh()?;
            }

            ShellCommand::Show => self.refresh()?,

            ShellCommand::Chart => {
                let series = self.service.chart()?;
                write_chart(&mut self.output, &series)?;
            }

            ShellCommand::UnitCost { cost, units } => {
                let cost = parse_number(&cost, "Cost").map_err(AppError::from)?;
                let units = parse_number(&units, "Units").map_err(AppError::from)?;
                let unit_cost = cost_per_unit(cost, units).map_err(AppError::from)?;
                writeln!(self.output, "Unit cost: {}", format_quantity(unit_cost))?;
            }

            ShellCommand::Confirm { state } => {
                let value = matches!(state, Toggle::On);
                self.service.set_ask_before_delete(value);
                writeln!(
                    self.output,
                    "Ask before deleting: {}",
                    if value { "on" } else { "off" }
                )?;
            }

            ShellCommand::Export { path } => {
                let file = File::create(&path)?;
                let count = Exporter::new(&self.service).export_rows_csv(file)?;
                writeln!(self.output, "Exported {} ingredients to {}", count, path)?;
            }

            ShellCommand::Quit => {}
        }
        Ok(())
    }

    /// Print the table and the last good summary.
    fn refresh(&mut self) -> Result<()> {
        write_ledger(&mut self.output, self.service.ledger())?;
        write_summary(&mut self.output, &self.service.summary())?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        read_line(&mut self.input)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Ask a yes/no question; anything but "y" or "yes" (including end of input) is no.
fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if write!(output, "{}", prompt).and_then(|_| output.flush()).is_err() {
        return false;
    }
    match read_line(input) {
        Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}
