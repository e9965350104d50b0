//! Aggregated KPI view-model
//!
//! Derived in memory from one or more [`PeriodSummary`](super::PeriodSummary)
//! documents; never stored.

use serde::{Deserialize, Serialize};

/// Canonical KPI set shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedKpi {
    #[serde(rename = "costoTotal")]
    pub total_cost: f64,
    #[serde(rename = "valorTotal")]
    pub total_value: f64,
    /// valorTotal − costoTotal
    #[serde(rename = "ganancia")]
    pub profit: f64,
    #[serde(rename = "totalHoras")]
    pub total_hours: f64,
    /// Hours-weighted mean productivity
    #[serde(rename = "productividadPromedio")]
    pub avg_productivity: f64,
    #[serde(rename = "totalActividades")]
    pub total_activities: u64,
    #[serde(rename = "totalReportes")]
    pub total_reports: u64,
    #[serde(rename = "totalTrabajadores")]
    pub total_workers: u64,
}

impl AggregatedKpi {
    /// "No data for period"
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(AggregatedKpi::zero().is_zero());
        let kpi = AggregatedKpi {
            total_reports: 1,
            ..Default::default()
        };
        assert!(!kpi.is_zero());
    }

    #[test]
    fn test_wire_names() {
        let kpi = AggregatedKpi {
            total_cost: 9870.0,
            total_value: 14500.0,
            profit: 4630.0,
            total_workers: 26,
            ..Default::default()
        };
        let json = serde_json::to_value(&kpi).unwrap();
        assert_eq!(json["costoTotal"], 9870.0);
        assert_eq!(json["ganancia"], 4630.0);
        assert_eq!(json["totalTrabajadores"], 26);
        assert_eq!(json["productividadPromedio"], 0.0);
    }
}
