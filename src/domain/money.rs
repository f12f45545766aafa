use super::ValidationError;

/// Format a value as a dollar amount with two decimals and thousands separators.
/// Example: 1234.5 -> "$1,234.50", -0.25 -> "-$0.25"
pub fn format_currency(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (units, decimals) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(units), decimals)
}

/// Format a row-level amount (unit cost or quantity) with six decimals.
pub fn format_quantity(value: f64) -> String {
    format!("{:.6}", value)
}

/// Format a row total as a plain two-decimal number, as shown in the table.
pub fn format_total(value: f64) -> String {
    format!("{:.2}", value)
}

fn group_thousands(units: &str) -> String {
    let len = units.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse user-entered text into a finite number.
/// `field` names the input in the resulting error message.
pub fn parse_number(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            input: trimmed.to_string(),
        }),
    }
}

/// Parse user-entered text into a finite number that must not be negative.
pub fn parse_non_negative(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let value = parse_number(input, field)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}
