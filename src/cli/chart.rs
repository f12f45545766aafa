use std::io::{self, Write};

use crate::domain::{ChartSeries, format_currency};

/// Width in characters of the longest bar.
pub const BAR_WIDTH: usize = 40;

const LABEL_WIDTH: usize = 14;

/// Draw the cost/revenue/profit comparison as horizontal bars.
/// Bars scale to the largest value; zero or negative values draw no bar.
pub fn write_chart<W: Write>(out: &mut W, series: &ChartSeries) -> io::Result<()> {
    writeln!(out, "{}", ChartSeries::TITLE)?;
    writeln!(out, "{}", ChartSeries::UNIT)?;
    writeln!(out)?;

    let max = series.max_value();
    for bar in &series.bars {
        let len = bar_length(bar.value, max);
        writeln!(
            out,
            "{:<lw$} | {:<bw$} {}",
            bar.label,
            "#".repeat(len),
            format_currency(bar.value),
            lw = LABEL_WIDTH,
            bw = BAR_WIDTH
        )?;
    }
    Ok(())
}

fn bar_length(value: f64, max: f64) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchParameters, Ledger};

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(25.0, 25.0), BAR_WIDTH);
        assert_eq!(bar_length(12.5, 25.0), BAR_WIDTH / 2);
        assert_eq!(bar_length(-3.0, 25.0), 0);
        assert_eq!(bar_length(0.0, 0.0), 0);
    }

    #[test]
    fn test_write_chart() {
        let mut ledger = Ledger::new();
        ledger.upsert("butter", 1.25, 10.0).unwrap();
        let series = ChartSeries::compute(&ledger, &BatchParameters::default()).unwrap();

        let mut out = Vec::new();
        write_chart(&mut out, &series).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Profit vs Cost for Cookie Batch");
        assert_eq!(lines[1], "USD ($)");
        assert!(lines[3].starts_with("Total Cost"));
        assert_eq!(lines[3].matches('#').count(), 20);
        assert!(lines[3].ends_with("$12.50"));
        assert_eq!(lines[4].matches('#').count(), BAR_WIDTH);
        assert!(lines[4].ends_with("$25.00"));
        assert_eq!(lines[5].matches('#').count(), 20);
        assert!(lines[5].ends_with("$12.50"));
    }

    #[test]
    fn test_write_chart_negative_profit() {
        let mut ledger = Ledger::new();
        ledger.upsert("butter", 5.0, 10.0).unwrap();
        let series = ChartSeries::compute(&ledger, &BatchParameters::default()).unwrap();

        let mut out = Vec::new();
        write_chart(&mut out, &series).unwrap();
        let text = String::from_utf8(out).unwrap();
        let profit = text.lines().last().unwrap();

        assert_eq!(profit.matches('#').count(), 0);
        assert!(profit.ends_with("-$25.00"));
    }
}
