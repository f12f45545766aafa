use crate::domain::{
    BatchParameters, BatchSummary, ChartSeries, IngredientRow, Ledger, RowField, ValidationError,
    DEFAULT_INGREDIENTS, cost_per_unit, parse_number,
};
use crate::storage::{PreferenceStore, Preferences};

use super::AppError;

/// One cookie batch being worked on: the ingredient ledger, the batch
/// parameters, the last successfully computed summary and the user's
/// preferences. This is the primary interface for any client (CLI, shell).
pub struct BatchService {
    ledger: Ledger,
    params: BatchParameters,
    summary: BatchSummary,
    preferences: Preferences,
    store: Option<PreferenceStore>,
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// No row had that name; nothing changed.
    NotFound,
}

impl BatchService {
    /// Create an empty session. Preferences are loaded from `store` if given,
    /// otherwise the defaults are used and never written.
    pub fn new(store: Option<PreferenceStore>) -> Self {
        let preferences = store.as_ref().map(PreferenceStore::load).unwrap_or_default();
        Self {
            ledger: Ledger::new(),
            params: BatchParameters::default(),
            summary: BatchSummary::default(),
            preferences,
            store,
        }
    }

    /// Create a session pre-filled with the starter recipe.
    pub fn with_default_ingredients(store: Option<PreferenceStore>) -> Result<Self, AppError> {
        let mut service = Self::new(store);
        service.seed_default_ingredients()?;
        Ok(service)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn parameters(&self) -> BatchParameters {
        self.params
    }

    /// The last summary that computed without error.
    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn rows(&self) -> std::slice::Iter<'_, IngredientRow> {
        self.ledger.rows()
    }

    // ========================
    // Calculation
    // ========================

    /// Recompute the summary. On a domain error the previous summary is kept.
    pub fn recalculate(&mut self) -> Result<BatchSummary, AppError> {
        match BatchSummary::compute(&self.ledger, &self.params) {
            Ok(summary) => {
                self.summary = summary;
                Ok(summary)
            }
            Err(err) => {
                tracing::debug!(error = %err, "recalculation skipped");
                Err(err.into())
            }
        }
    }

    /// Parse and apply new yield/price text, then recalculate.
    /// Unparseable text leaves the parameters unchanged.
    pub fn apply_parameters(
        &mut self,
        cookie_yield: &str,
        cookie_price: &str,
    ) -> Result<BatchSummary, AppError> {
        let params = BatchParameters::from_text(cookie_yield, cookie_price)?;
        self.set_parameters(params)
    }

    pub fn set_parameters(&mut self, params: BatchParameters) -> Result<BatchSummary, AppError> {
        tracing::debug!(
            cookie_yield = params.cookie_yield,
            cookie_price = params.cookie_price,
            "batch parameters updated"
        );
        self.params = params;
        self.recalculate()
    }

    /// Bars for the comparison chart, from the current ledger and parameters.
    pub fn chart(&self) -> Result<ChartSeries, AppError> {
        Ok(ChartSeries::compute(&self.ledger, &self.params)?)
    }

    // ========================
    // Ledger mutations
    // ========================

    /// Add or update a row from the editor fields, then recalculate.
    pub fn add_or_update(
        &mut self,
        name: &str,
        unit_cost: &str,
        quantity_used: &str,
    ) -> Result<BatchSummary, AppError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let unit_cost = parse_number(unit_cost, RowField::UnitCost.label())?;
        let quantity_used = parse_number(quantity_used, RowField::QuantityUsed.label())?;
        self.upsert(name, unit_cost, quantity_used)
    }

    /// Add or update a row priced from a bulk purchase.
    pub fn add_bulk(
        &mut self,
        name: &str,
        bulk_cost: f64,
        bulk_units: f64,
        quantity_used: f64,
    ) -> Result<BatchSummary, AppError> {
        let unit_cost = cost_per_unit(bulk_cost, bulk_units)?;
        self.upsert(name, unit_cost, quantity_used)
    }

    pub fn upsert(
        &mut self,
        name: &str,
        unit_cost: f64,
        quantity_used: f64,
    ) -> Result<BatchSummary, AppError> {
        let row = self.ledger.upsert(name, unit_cost, quantity_used)?;
        tracing::debug!(
            name = %row.name,
            unit_cost = row.unit_cost,
            quantity_used = row.quantity_used,
            "ingredient upserted"
        );
        self.recalculate()
    }

    /// Edit one cell of the named row, then recalculate.
    pub fn edit_cell(
        &mut self,
        name: &str,
        field: RowField,
        raw: &str,
    ) -> Result<BatchSummary, AppError> {
        let row = self.ledger.update_field(name, field, raw)?;
        tracing::debug!(name = %row.name, %field, "ingredient edited");
        self.recalculate()
    }

    /// Delete the named row. When `ask_before_delete` is on, `confirm` decides.
    pub fn delete(
        &mut self,
        name: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Result<DeleteOutcome, AppError> {
        if self.ledger.get(name).is_none() {
            return Ok(DeleteOutcome::NotFound);
        }
        if self.preferences.ask_before_delete && !confirm() {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.ledger.delete(name);
        tracing::debug!(name, "ingredient deleted");
        self.recalculate()?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Remove every row. Always asks for confirmation.
    pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool, AppError> {
        if !confirm() {
            return Ok(false);
        }
        self.ledger.clear();
        tracing::debug!("ledger cleared");
        self.recalculate()?;
        Ok(true)
    }

    /// Upsert already validated rows, e.g. from a CSV import.
    /// Does not recalculate; callers apply parameters afterwards.
    pub fn load_rows(
        &mut self,
        rows: impl IntoIterator<Item = IngredientRow>,
    ) -> Result<usize, AppError> {
        let mut count = 0;
        for row in rows {
            self.ledger
                .upsert(&row.name, row.unit_cost, row.quantity_used)?;
            count += 1;
        }
        tracing::debug!(count, "ingredient rows loaded");
        Ok(count)
    }

    /// Upsert the starter recipe rows by name.
    pub fn seed_default_ingredients(&mut self) -> Result<(), AppError> {
        for seed in DEFAULT_INGREDIENTS {
            let unit_cost = cost_per_unit(seed.bulk_cost, seed.bulk_units)?;
            self.ledger
                .upsert(seed.name, unit_cost, seed.quantity_used)?;
        }
        self.recalculate()?;
        Ok(())
    }

    // ========================
    // Preferences
    // ========================

    /// Toggle the delete confirmation and persist it immediately.
    pub fn set_ask_before_delete(&mut self, value: bool) {
        self.preferences.ask_before_delete = value;
        self.save_preferences();
    }

    /// Persist preferences; called on every toggle and at shutdown.
    pub fn save_preferences(&self) {
        if let Some(store) = &self.store {
            store.save(&self.preferences);
        }
    }
}
