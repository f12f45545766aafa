use super::ingredient::{validate_name, IngredientRow, RowField, ValidationError};
use super::money::parse_non_negative;

/// The ingredient rows of the current batch, kept in insertion order.
/// Names are unique; every lookup compares trimmed names exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    rows: Vec<IngredientRow>,
}

/// A bulk purchase used to seed a fresh batch: `bulk_cost` buys `bulk_units`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedIngredient {
    pub name: &'static str,
    pub bulk_cost: f64,
    pub bulk_units: f64,
    pub quantity_used: f64,
}

/// The starter recipe the shell opens with.
pub const DEFAULT_INGREDIENTS: [SeedIngredient; 6] = [
    SeedIngredient {
        name: "egg",
        bulk_cost: 22.24,
        bulk_units: 90.0,
        quantity_used: 4.0,
    },
    SeedIngredient {
        name: "butter",
        bulk_cost: 12.18,
        bulk_units: 16.0,
        quantity_used: 8.0,
    },
    SeedIngredient {
        name: "flour",
        bulk_cost: 6.0,
        bulk_units: 5.0,
        quantity_used: 3.0,
    },
    SeedIngredient {
        name: "sugar",
        bulk_cost: 4.5,
        bulk_units: 4.0,
        quantity_used: 1.763698,
    },
    SeedIngredient {
        name: "vanilla",
        bulk_cost: 13.0,
        bulk_units: 11.0,
        quantity_used: 2.0,
    },
    SeedIngredient {
        name: "powdered_sugar",
        bulk_cost: 2.6,
        bulk_units: 2.0,
        quantity_used: 4.0,
    },
];

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new row, or overwrite the row with the same name in place.
    pub fn upsert(
        &mut self,
        name: &str,
        unit_cost: f64,
        quantity_used: f64,
    ) -> Result<&IngredientRow, ValidationError> {
        let row = IngredientRow::new(name, unit_cost, quantity_used)?;
        let index = match self.position(&row.name) {
            Some(index) => {
                self.rows[index] = row;
                index
            }
            None => {
                self.rows.push(row);
                self.rows.len() - 1
            }
        };
        Ok(&self.rows[index])
    }

    /// Remove the named row. Returns false (and changes nothing) if it is absent.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Rows in insertion order. The iterator can be cloned to walk the rows again.
    pub fn rows(&self) -> std::slice::Iter<'_, IngredientRow> {
        self.rows.iter()
    }

    /// Sum of every row's unit_cost * quantity_used; 0 for an empty ledger.
    pub fn total_cost(&self) -> f64 {
        self.rows.iter().map(IngredientRow::total_cost).sum()
    }

    pub fn get(&self, name: &str) -> Option<&IngredientRow> {
        self.position(name).map(|index| &self.rows[index])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply a single cell edit to the named row.
    /// `raw` is the text the user typed; it is parsed according to `field`.
    /// On error the ledger is left untouched.
    pub fn update_field(
        &mut self,
        name: &str,
        field: RowField,
        raw: &str,
    ) -> Result<&IngredientRow, ValidationError> {
        let index = self
            .position(name)
            .ok_or_else(|| ValidationError::UnknownIngredient(name.trim().to_string()))?;

        match field {
            RowField::Name => {
                let new_name = validate_name(raw)?;
                let taken = self
                    .rows
                    .iter()
                    .enumerate()
                    .any(|(i, row)| i != index && row.name == new_name);
                if taken {
                    return Err(ValidationError::DuplicateName(new_name));
                }
                self.rows[index].name = new_name;
            }
            RowField::UnitCost => {
                self.rows[index].unit_cost = parse_non_negative(raw, field.label())?;
            }
            RowField::QuantityUsed => {
                self.rows[index].quantity_used = parse_non_negative(raw, field.label())?;
            }
        }

        Ok(&self.rows[index])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.rows.iter().position(|row| row.name == name)
    }
}
