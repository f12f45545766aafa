use std::io::{self, Write};

use crate::domain::{BatchSummary, Ledger, format_currency, format_quantity, format_total};

const NAME_WIDTH: usize = 20;
const NUMBER_WIDTH: usize = 14;

/// Print the ingredient table, or a hint when it is empty.
pub fn write_ledger<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    if ledger.is_empty() {
        return writeln!(out, "No ingredients.");
    }

    writeln!(
        out,
        "{:<nw$} {:>w$} {:>w$} {:>w$}",
        "INGREDIENT",
        "UNIT COST ($)",
        "QTY USED",
        "TOTAL COST ($)",
        nw = NAME_WIDTH,
        w = NUMBER_WIDTH
    )?;
    writeln!(out, "{}", "-".repeat(NAME_WIDTH + 3 * (NUMBER_WIDTH + 1)))?;
    for row in ledger.rows() {
        writeln!(
            out,
            "{:<nw$} {:>w$} {:>w$} {:>w$}",
            row.name,
            format_quantity(row.unit_cost),
            format_quantity(row.quantity_used),
            format_total(row.total_cost()),
            nw = NAME_WIDTH,
            w = NUMBER_WIDTH
        )?;
    }
    Ok(())
}

/// Print the four summary labels on one line.
pub fn write_summary<W: Write>(out: &mut W, summary: &BatchSummary) -> io::Result<()> {
    writeln!(
        out,
        "Total cost: {}   Revenue: {}   Profit: {}   Profit per unit: {}",
        format_currency(summary.total_cost),
        format_currency(summary.revenue),
        format_currency(summary.profit),
        format_currency(summary.profit_per_unit)
    )
}
