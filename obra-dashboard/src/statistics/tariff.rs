//! Category tariffs (tarifas por categoría)
//!
//! Fixed hourly rates and baseline productivity per worker category.
//! Static configuration, not derived from documents.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Worker, WorkerCategory};

use crate::utils::money::{to_decimal, to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTariff {
    #[serde(rename = "categoria")]
    pub category: WorkerCategory,
    /// Hourly rate (S/ por hora)
    #[serde(rename = "tarifaHora")]
    pub hourly_rate: f64,
    /// Productivity expected when a worker has no individual `meta`
    #[serde(rename = "productividadBase")]
    pub baseline_productivity: f64,
}

pub const TARIFFS: [CategoryTariff; 3] = [
    CategoryTariff {
        category: WorkerCategory::Operario,
        hourly_rate: 26.61,
        baseline_productivity: 1.2,
    },
    CategoryTariff {
        category: WorkerCategory::Oficial,
        hourly_rate: 20.91,
        baseline_productivity: 1.0,
    },
    CategoryTariff {
        category: WorkerCategory::Peon,
        hourly_rate: 18.84,
        baseline_productivity: 0.8,
    },
];

pub fn tariff(category: WorkerCategory) -> &'static CategoryTariff {
    match category {
        WorkerCategory::Operario => &TARIFFS[0],
        WorkerCategory::Oficial => &TARIFFS[1],
        WorkerCategory::Peon => &TARIFFS[2],
    }
}

pub fn hourly_rate(category: WorkerCategory) -> f64 {
    tariff(category).hourly_rate
}

pub fn baseline_productivity(category: WorkerCategory) -> f64 {
    tariff(category).baseline_productivity
}

/// horas × tarifa, rounded to 2 dp
pub fn labour_cost(category: WorkerCategory, hours: f64) -> f64 {
    to_f64(to_decimal(hours) * to_decimal(hourly_rate(category)))
}

/// Σ labour cost over `workers`
pub fn estimated_labour_cost(workers: &[Worker]) -> f64 {
    let total: Decimal = workers
        .iter()
        .map(|w| to_decimal(w.hours) * to_decimal(hourly_rate(w.category)))
        .sum();
    to_f64(total)
}
