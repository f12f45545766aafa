use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ingredient line of a batch.
/// The row total is never stored; it is always derived from the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    pub unit_cost: f64,
    pub quantity_used: f64,
}

impl IngredientRow {
    /// Build a validated row. The name is trimmed.
    pub fn new(
        name: impl Into<String>,
        unit_cost: f64,
        quantity_used: f64,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(&name.into())?;
        validate_amount(unit_cost, RowField::UnitCost.label())?;
        validate_amount(quantity_used, RowField::QuantityUsed.label())?;
        Ok(Self {
            name,
            unit_cost,
            quantity_used,
        })
    }

    /// unit_cost * quantity_used
    pub fn total_cost(&self) -> f64 {
        self.unit_cost * self.quantity_used
    }
}

/// Editable columns of an ingredient row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Name,
    UnitCost,
    QuantityUsed,
}

impl RowField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowField::Name => "name",
            RowField::UnitCost => "unit_cost",
            RowField::QuantityUsed => "quantity_used",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            RowField::Name => "Ingredient name",
            RowField::UnitCost => "Unit cost",
            RowField::QuantityUsed => "Quantity used",
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RowField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(RowField::Name),
            "unit_cost" | "cost" => Ok(RowField::UnitCost),
            "quantity_used" | "quantity" | "qty" => Ok(RowField::QuantityUsed),
            other => Err(format!(
                "unknown field '{}' (expected name, unit_cost or quantity_used)",
                other
            )),
        }
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_amount(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            input: value.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Malformed or missing input. The mutation that produced it is not applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    NotANumber { field: &'static str, input: String },
    Negative { field: &'static str, value: f64 },
    DuplicateName(String),
    UnknownIngredient(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Ingredient name is required"),
            ValidationError::NotANumber { field, input } => {
                write!(f, "'{}' must be a number (got '{}')", field, input)
            }
            ValidationError::Negative { field, value } => {
                write!(f, "'{}' must not be negative (got {})", field, value)
            }
            ValidationError::DuplicateName(name) => {
                write!(f, "An ingredient named '{}' already exists", name)
            }
            ValidationError::UnknownIngredient(name) => {
                write!(f, "No ingredient named '{}'", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
