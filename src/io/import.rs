use anyhow::Result;
use serde::Deserialize;
use std::io::Read;

use crate::domain::{IngredientRow, RowField, cost_per_unit, parse_number};

/// Result of reading an ingredient CSV
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub rows: Vec<IngredientRow>,
    pub errors: Vec<ImportError>,
}

/// Error that occurred on one line of the input
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "line {} ({}): {}", self.line, field, self.error),
            None => write!(f, "line {}: {}", self.line, self.error),
        }
    }
}

/// A CSV line. Either `unit_cost` or both `bulk_cost` and `bulk_units` must be present.
#[derive(Debug, Deserialize)]
struct IngredientRecord {
    name: String,
    #[serde(default)]
    unit_cost: Option<String>,
    #[serde(default)]
    bulk_cost: Option<String>,
    #[serde(default)]
    bulk_units: Option<String>,
    quantity_used: String,
}

/// Read ingredient rows from CSV with a header line.
/// Lines that fail to parse or validate are reported and skipped.
pub fn read_ingredients_csv<R: Read>(reader: R) -> Result<ImportResult> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut result = ImportResult::default();

    for (line_num, record) in csv_reader.deserialize::<IngredientRecord>().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                result.errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        match parse_record(&record) {
            Ok(row) => result.rows.push(row),
            Err((field, error)) => result.errors.push(ImportError {
                line,
                field,
                error,
            }),
        }
    }

    tracing::debug!(
        rows = result.rows.len(),
        errors = result.errors.len(),
        "ingredient csv read"
    );
    Ok(result)
}

fn parse_record(record: &IngredientRecord) -> Result<IngredientRow, (Option<String>, String)> {
    let field_error = |field: RowField, e: &dyn std::fmt::Display| {
        (Some(field.as_str().to_string()), e.to_string())
    };

    let unit_cost = match (&record.unit_cost, &record.bulk_cost, &record.bulk_units) {
        (Some(unit_cost), _, _) => parse_number(unit_cost, RowField::UnitCost.label())
            .map_err(|e| field_error(RowField::UnitCost, &e))?,
        (None, Some(bulk_cost), Some(bulk_units)) => {
            let bulk_cost = parse_number(bulk_cost, "Bulk cost")
                .map_err(|e| (Some("bulk_cost".to_string()), e.to_string()))?;
            let bulk_units = parse_number(bulk_units, "Bulk units")
                .map_err(|e| (Some("bulk_units".to_string()), e.to_string()))?;
            cost_per_unit(bulk_cost, bulk_units)
                .map_err(|e| (Some("bulk_units".to_string()), e.to_string()))?
        }
        _ => {
            return Err((
                Some(RowField::UnitCost.as_str().to_string()),
                "either unit_cost or bulk_cost and bulk_units is required".to_string(),
            ));
        }
    };

    let quantity_used = parse_number(&record.quantity_used, RowField::QuantityUsed.label())
        .map_err(|e| field_error(RowField::QuantityUsed, &e))?;

    IngredientRow::new(record.name.as_str(), unit_cost, quantity_used)
        .map_err(|e| (None, e.to_string()))
}
