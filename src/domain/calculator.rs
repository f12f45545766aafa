use serde::{Deserialize, Serialize};
use std::fmt;

use super::ingredient::ValidationError;
use super::ledger::Ledger;
use super::money::parse_number;

/// Convert a bulk purchase price into the cost of a single unit.
pub fn cost_per_unit(cost: f64, units: f64) -> Result<f64, DomainError> {
    if units <= 0.0 {
        return Err(DomainError::NonPositiveUnits { units });
    }
    Ok(cost / units)
}

pub fn revenue(price: f64, cookie_yield: f64) -> Result<f64, DomainError> {
    if price < 0.0 || cookie_yield < 0.0 {
        return Err(DomainError::NegativeRevenueInput {
            price,
            cookie_yield,
        });
    }
    Ok(price * cookie_yield)
}

/// May be negative.
pub fn profit(revenue: f64, total_cost: f64) -> f64 {
    revenue - total_cost
}

/// Rejects a zero yield even though `revenue` accepts one.
pub fn profit_per_unit(profit: f64, cookie_yield: f64) -> Result<f64, DomainError> {
    if cookie_yield <= 0.0 {
        return Err(DomainError::NonPositiveYield { cookie_yield });
    }
    Ok(profit / cookie_yield)
}

/// Yield and price for one batch. Not part of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchParameters {
    pub cookie_yield: f64,
    pub cookie_price: f64,
}

impl Default for BatchParameters {
    fn default() -> Self {
        Self {
            cookie_yield: 50.0,
            cookie_price: 0.50,
        }
    }
}

impl BatchParameters {
    pub fn new(cookie_yield: f64, cookie_price: f64) -> Self {
        Self {
            cookie_yield,
            cookie_price,
        }
    }

    /// Parse the yield and price fields as typed by the user.
    /// Only numeric shape is checked here; sign rules belong to the calculator.
    pub fn from_text(cookie_yield: &str, cookie_price: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            cookie_yield: parse_number(cookie_yield, "Cookies per batch")?,
            cookie_price: parse_number(cookie_price, "Price per cookie")?,
        })
    }
}

/// The four figures shown under the ingredient table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_cost: f64,
    pub revenue: f64,
    pub profit: f64,
    pub profit_per_unit: f64,
}

impl BatchSummary {
    pub fn compute(ledger: &Ledger, params: &BatchParameters) -> Result<Self, DomainError> {
        let total_cost = ledger.total_cost();
        let revenue = revenue(params.cookie_price, params.cookie_yield)?;
        let profit = profit(revenue, total_cost);
        let profit_per_unit = profit_per_unit(profit, params.cookie_yield)?;

        Ok(Self {
            total_cost,
            revenue,
            profit,
            profit_per_unit,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
}

/// Cost, revenue and profit bars for the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSeries {
    pub bars: [ChartBar; 3],
}

impl ChartSeries {
    pub const TITLE: &'static str = "Profit vs Cost for Cookie Batch";
    pub const UNIT: &'static str = "USD ($)";

    /// Profit per unit is not charted, so a zero yield is accepted here.
    pub fn compute(ledger: &Ledger, params: &BatchParameters) -> Result<Self, DomainError> {
        let total_cost = ledger.total_cost();
        let revenue = revenue(params.cookie_price, params.cookie_yield)?;
        let profit = profit(revenue, total_cost);

        Ok(Self {
            bars: [
                ChartBar {
                    label: "Total Cost",
                    value: total_cost,
                },
                ChartBar {
                    label: "Total Revenue",
                    value: revenue,
                },
                ChartBar {
                    label: "Profit",
                    value: profit,
                },
            ],
        })
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// A mathematically undefined calculation. The calculation is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    NonPositiveUnits { units: f64 },
    NegativeRevenueInput { price: f64, cookie_yield: f64 },
    NonPositiveYield { cookie_yield: f64 },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NonPositiveUnits { units } => {
                write!(f, "Units must be > 0 (got {})", units)
            }
            DomainError::NegativeRevenueInput {
                price,
                cookie_yield,
            } => write!(
                f,
                "Price and yield must be non-negative (price {}, yield {})",
                price, cookie_yield
            ),
            DomainError::NonPositiveYield { cookie_yield } => write!(
                f,
                "Cookies per batch must be > 0 for per-cookie profit (got {})",
                cookie_yield
            ),
        }
    }
}

impl std::error::Error for DomainError {}
