//! Summary aggregator
//!
//! Rolls one or more period summaries into the canonical [`AggregatedKpi`].
//!
//! | Field | 0 docs | 1 doc | N docs |
//! |-------|--------|-------|--------|
//! | costo / valor / horas | 0 | direct | Σ |
//! | ganancia | 0 | valor − costo | Σvalor − Σcosto |
//! | productividad | 0 | direct | Σ(p·h) / Σh, 0 when Σh = 0 |
//! | actividades / reportes | 0 | reportesProcesados | Σ |
//! | trabajadores | 0 | Σ porCategoria.cantidad | max per document |

use serde::Serialize;
use shared::models::{AggregatedKpi, PeriodSummary};

use crate::utils::money::{sub_exact, sum_exact};

/// Hours-weighted mean of `(productivity, hours)` pairs; 0 when Σh = 0
pub fn weighted_mean<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted, hours) = pairs
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(wp, h), (p, hours)| (wp + p * hours, h + hours));
    if hours > 0.0 { weighted / hours } else { 0.0 }
}

/// Aggregate period summaries into one KPI set
pub fn aggregate(summaries: &[PeriodSummary]) -> AggregatedKpi {
    match summaries {
        [] => AggregatedKpi::zero(),
        [single] => {
            let m = &single.metrics;
            AggregatedKpi {
                total_cost: m.total_cost,
                total_value: m.total_value,
                profit: sub_exact(m.total_value, m.total_cost),
                total_hours: m.total_hours,
                avg_productivity: m.avg_productivity,
                total_activities: m.processed_reports,
                total_reports: m.processed_reports,
                total_workers: single.worker_count(),
            }
        }
        many => {
            let total_cost = sum_exact(many.iter().map(|s| s.metrics.total_cost));
            let total_value = sum_exact(many.iter().map(|s| s.metrics.total_value));
            let processed: u64 = many.iter().map(|s| s.metrics.processed_reports).sum();

            AggregatedKpi {
                total_cost,
                total_value,
                profit: sub_exact(total_value, total_cost),
                total_hours: sum_exact(many.iter().map(|s| s.metrics.total_hours)),
                avg_productivity: weighted_mean(
                    many.iter()
                        .map(|s| (s.metrics.avg_productivity, s.metrics.total_hours)),
                ),
                total_activities: processed,
                total_reports: processed,
                total_workers: many.iter().map(PeriodSummary::worker_count).max().unwrap_or(0),
            }
        }
    }
}

// =============================================================================
// Daily view
// =============================================================================

/// One point of the per-day trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub fecha: String,
    pub costo: f64,
    pub valor: f64,
    pub ganancia: f64,
    pub horas: f64,
    pub trabajadores: u64,
}

impl TrendPoint {
    pub fn from_summary(summary: &PeriodSummary) -> Self {
        let m = &summary.metrics;
        Self {
            fecha: summary.date.clone(),
            costo: m.total_cost,
            valor: m.total_value,
            ganancia: sub_exact(m.total_value, m.total_cost),
            horas: m.total_hours,
            trabajadores: summary.worker_count(),
        }
    }
}

/// Totals row of the daily view; `trabajadores` is the peak across days
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub costo: f64,
    pub valor: f64,
    pub ganancia: f64,
    pub horas: f64,
    pub trabajadores: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySummaryView {
    pub rows: Vec<TrendPoint>,
    pub totals: DailyTotals,
}

/// Per-day rows sorted by `fecha`, plus totals
pub fn daily_view(summaries: &[PeriodSummary]) -> DailySummaryView {
    let mut rows: Vec<TrendPoint> = summaries.iter().map(TrendPoint::from_summary).collect();
    rows.sort_by(|a, b| a.fecha.cmp(&b.fecha));

    let costo = sum_exact(rows.iter().map(|r| r.costo));
    let valor = sum_exact(rows.iter().map(|r| r.valor));
    let totals = DailyTotals {
        costo,
        valor,
        ganancia: sub_exact(valor, costo),
        horas: sum_exact(rows.iter().map(|r| r.horas)),
        trabajadores: rows.iter().map(|r| r.trabajadores).max().unwrap_or(0),
    };

    DailySummaryView { rows, totals }
}

#[cfg(test)]
mod tests;
