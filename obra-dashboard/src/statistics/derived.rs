//! Derived metrics
//!
//! Secondary figures recomputed from raw activity / worker collections.
//! Every function is pure and leaves its inputs untouched.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Activity, CategoryFilter, LocationFilter, Worker, WorkerCategory};

use super::aggregator::{TrendPoint, weighted_mean};
use super::tariff::baseline_productivity;
use crate::utils::money::{percentage, sub_exact, to_decimal, to_f64_exact, whole_percentage};

/// Activities shown in the profitability ranking
pub const TOP_ACTIVITY_COUNT: usize = 5;

/// Legacy placeholder shown when real costs fall into ≤1 group
const PLACEHOLDER_DISTRIBUTION: [(&str, f64); 5] = [
    ("Mano de obra", 45_000.0),
    ("Materiales", 32_000.0),
    ("Equipos", 15_000.0),
    ("Subcontratos", 12_000.0),
    ("Gastos generales", 6_000.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityProfit {
    pub id: String,
    pub nombre: String,
    pub costo: f64,
    pub valor: f64,
    pub ganancia: f64,
    /// ganancia / valor × 100
    pub margen: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostShare {
    pub tipo: String,
    pub costo: f64,
    /// Whole-number percentage of total cost
    pub porcentaje: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub fecha: String,
    pub ganancia: f64,
    pub acumulado: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerEfficiency {
    pub id: String,
    pub nombre: String,
    pub categoria: WorkerCategory,
    pub productividad: f64,
    /// Individual meta, or the category baseline
    pub meta: f64,
    pub eficiencia: f64,
    /// eficiencia ≥ 1
    pub cumple_meta: bool,
}

// =============================================================================
// Ratios
// =============================================================================

/// ganancia / valorTotal × 100, 0 when valorTotal is 0
pub fn profit_margin(profit: f64, total_value: f64) -> f64 {
    percentage(profit, total_value)
}

/// Σ(productividad · horas) / Σ horas over activities
pub fn weighted_productivity(activities: &[Activity]) -> f64 {
    weighted_mean(activities.iter().map(|a| (a.productivity, a.hours)))
}

/// Target used for a worker: positive `meta`, else the category baseline
pub fn effective_target(worker: &Worker) -> f64 {
    worker
        .target
        .filter(|t| *t > 0.0)
        .unwrap_or_else(|| baseline_productivity(worker.category))
}

/// productividad / meta; ≥ 1 means on or over target
pub fn worker_efficiency(worker: &Worker) -> f64 {
    let target = effective_target(worker);
    if target > 0.0 {
        worker.productivity / target
    } else {
        0.0
    }
}

pub fn efficiency_row(worker: &Worker) -> WorkerEfficiency {
    let eficiencia = worker_efficiency(worker);
    WorkerEfficiency {
        id: worker.id.clone(),
        nombre: worker.name.clone(),
        categoria: worker.category,
        productividad: worker.productivity,
        meta: effective_target(worker),
        eficiencia,
        cumple_meta: eficiencia >= 1.0,
    }
}

pub fn worker_efficiencies(workers: &[Worker]) -> Vec<WorkerEfficiency> {
    workers.iter().map(efficiency_row).collect()
}

// =============================================================================
// Rankings
// =============================================================================

/// Top [`TOP_ACTIVITY_COUNT`] activities by (valor − costo), ties in input order
pub fn profitability_ranking(activities: &[Activity]) -> Vec<ActivityProfit> {
    let mut ranked: Vec<&Activity> = activities.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.profit().total_cmp(&a.profit()));

    ranked
        .into_iter()
        .take(TOP_ACTIVITY_COUNT)
        .map(|a| {
            let ganancia = sub_exact(a.value, a.cost);
            ActivityProfit {
                id: a.id.clone(),
                nombre: a.name.clone(),
                costo: a.cost,
                valor: a.value,
                ganancia,
                margen: profit_margin(ganancia, a.value),
            }
        })
        .collect()
}

/// Top `n` workers by productividad, ties in input order
pub fn top_workers(workers: &[Worker], n: usize) -> Vec<Worker> {
    let mut ranked: Vec<&Worker> = workers.iter().collect();
    ranked.sort_by(|a, b| b.productivity.total_cmp(&a.productivity));
    ranked.into_iter().take(n).cloned().collect()
}

// =============================================================================
// Distributions and curves
// =============================================================================

fn shares(groups: Vec<(String, Decimal)>) -> Vec<CostShare> {
    let total: Decimal = groups.iter().map(|(_, cost)| *cost).sum();

    let mut shares: Vec<CostShare> = groups
        .into_iter()
        .map(|(tipo, cost)| CostShare {
            tipo,
            costo: to_f64_exact(cost),
            porcentaje: whole_percentage(cost, total),
        })
        .collect();
    shares.sort_by(|a, b| b.costo.total_cmp(&a.costo));
    shares
}

/// Cost per `tipo` (default "Otros"), largest first
///
/// With ≤1 distinct group and `placeholder` set, the fixed five-category
/// placeholder is returned instead.
pub fn cost_distribution(activities: &[Activity], placeholder: bool) -> Vec<CostShare> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for activity in activities {
        let cost = to_decimal(activity.cost);
        match groups.iter_mut().find(|(name, _)| name == activity.group()) {
            Some((_, total)) => *total += cost,
            None => groups.push((activity.group().to_string(), cost)),
        }
    }

    if groups.len() <= 1 && placeholder {
        tracing::debug!(groups = groups.len(), "Using placeholder cost distribution");
        return shares(
            PLACEHOLDER_DISTRIBUTION
                .iter()
                .map(|(name, cost)| (name.to_string(), to_decimal(*cost)))
                .collect(),
        );
    }

    shares(groups)
}

/// cumulative[i] = Σ ganancia[0..=i] over a chronological series
pub fn cumulative_profit(trend: &[TrendPoint]) -> Vec<CumulativePoint> {
    let mut running = Decimal::ZERO;
    trend
        .iter()
        .map(|point| {
            running += to_decimal(point.ganancia);
            CumulativePoint {
                fecha: point.fecha.clone(),
                ganancia: point.ganancia,
                acumulado: to_f64_exact(running),
            }
        })
        .collect()
}

// =============================================================================
// Filters
// =============================================================================

pub fn filter_activities(activities: &[Activity], location: &LocationFilter) -> Vec<Activity> {
    activities
        .iter()
        .filter(|a| location.matches(a.location.as_deref()))
        .cloned()
        .collect()
}

pub fn filter_workers(
    workers: &[Worker],
    category: &CategoryFilter,
    location: &LocationFilter,
) -> Vec<Worker> {
    workers
        .iter()
        .filter(|w| category.matches(w.category) && location.matches(w.location.as_deref()))
        .cloned()
        .collect()
}
