use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::BatchService;
use crate::domain::{BatchParameters, BatchSummary, format_quantity, format_total};

/// One ingredient line as written to a report, total included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub unit_cost: f64,
    pub quantity_used: f64,
    pub total_cost: f64,
}

/// Full snapshot of a batch calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: BatchParameters,
    pub rows: Vec<ReportRow>,
    pub summary: BatchSummary,
}

/// Exporter for writing the current batch to CSV or JSON
pub struct Exporter<'a> {
    service: &'a BatchService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BatchService) -> Self {
        Self { service }
    }

    /// Export the ingredient table to CSV, in the same precision the table shows.
    pub fn export_rows_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["name", "unit_cost", "quantity_used", "total_cost"])?;

        let mut count = 0;
        for row in self.service.rows() {
            csv_writer.write_record([
                row.name.clone(),
                format_quantity(row.unit_cost),
                format_quantity(row.quantity_used),
                format_total(row.total_cost()),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Build the report for the current ledger and parameters.
    /// Fails if the summary cannot be calculated.
    pub fn report(&self) -> Result<BatchReport> {
        let ledger = self.service.ledger();
        let parameters = self.service.parameters();
        let summary = BatchSummary::compute(ledger, &parameters)?;

        let rows = ledger
            .rows()
            .map(|row| ReportRow {
                name: row.name.clone(),
                unit_cost: row.unit_cost,
                quantity_used: row.quantity_used,
                total_cost: row.total_cost(),
            })
            .collect();

        Ok(BatchReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            parameters,
            rows,
            summary,
        })
    }

    /// Export the full report as pretty-printed JSON
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<BatchReport> {
        let report = self.report()?;

        let json = serde_json::to_string_pretty(&report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(report)
    }
}
