mod common;

use anyhow::Result;
use common::{StandardBatch, assert_close};
use cookie_cost::application::BatchService;
use cookie_cost::domain::BatchParameters;
use cookie_cost::io::{Exporter, read_ingredients_csv};

#[test]
fn test_export_rows_csv() -> Result<()> {
    let service = StandardBatch::egg_and_butter_bulk()?;
    let mut out = Vec::new();

    let count = Exporter::new(&service).export_rows_csv(&mut out)?;
    assert_eq!(count, 2);

    let csv = String::from_utf8(out)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,unit_cost,quantity_used,total_cost");
    assert_eq!(lines[1], "egg,0.247111,4.000000,0.99");
    assert_eq!(lines[2], "butter,0.761250,8.000000,6.09");

    Ok(())
}

#[test]
fn test_export_report_json() -> Result<()> {
    let service = StandardBatch::egg_and_butter()?;
    let mut out = Vec::new();

    let report = Exporter::new(&service).export_report_json(&mut out)?;
    assert_eq!(report.rows.len(), 2);

    let value: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["parameters"]["cookie_yield"], 50.0);
    assert_eq!(value["rows"][0]["name"], "egg");
    assert_close(value["rows"][1]["total_cost"].as_f64().unwrap(), 6.088);
    assert_close(value["summary"]["total_cost"].as_f64().unwrap(), 7.076);
    assert_eq!(value["summary"]["revenue"], 25.0);
    assert!(value["generated_at"].is_string());

    Ok(())
}

#[test]
fn test_report_needs_a_valid_summary() -> Result<()> {
    let mut service = StandardBatch::egg_and_butter()?;
    let _ = service.set_parameters(BatchParameters::new(0.0, 0.5));

    let mut out = Vec::new();
    assert!(Exporter::new(&service).export_report_json(&mut out).is_err());
    assert!(out.is_empty());

    Ok(())
}

#[test]
fn test_import_then_summarize() -> Result<()> {
    let csv = "\
name,unit_cost,bulk_cost,bulk_units,quantity_used
egg,,22.24,90,4
butter,0.76125,,,8
egg,,22.24,90,6
broken,abc,,,1
";
    let import = read_ingredients_csv(csv.as_bytes())?;
    assert_eq!(import.rows.len(), 3);
    assert_eq!(import.errors.len(), 1);
    assert_eq!(import.errors[0].line, 5);
    assert!(import.errors[0].to_string().starts_with("line 5 (unit_cost)"));

    let mut service = BatchService::new(None);
    assert_eq!(service.load_rows(import.rows)?, 3);
    let summary = service.recalculate()?;

    // the second egg line overwrote the first
    assert_eq!(service.ledger().len(), 2);
    assert_close(summary.total_cost, 22.24 / 90.0 * 6.0 + 6.09);

    Ok(())
}
