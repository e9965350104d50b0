use super::*;
use serde_json::json;
use shared::models::{CategoryBreakdown, PeriodKind, SummaryMetrics};
use std::collections::BTreeMap;

fn summary(fecha: &str, cost: f64, value: f64, hours: f64, productivity: f64, reports: u64, workers: &[(&str, u64)]) -> PeriodSummary {
    let by_category: BTreeMap<String, CategoryBreakdown> = workers
        .iter()
        .map(|(name, headcount)| {
            (
                name.to_string(),
                CategoryBreakdown {
                    headcount: *headcount,
                    ..Default::default()
                },
            )
        })
        .collect();

    PeriodSummary {
        date: fecha.to_string(),
        period: PeriodKind::Diario,
        week: None,
        metrics: SummaryMetrics {
            total_cost: cost,
            total_value: value,
            total_hours: hours,
            avg_productivity: productivity,
            processed_reports: reports,
        },
        by_category,
    }
}

#[test]
fn test_empty_is_zero_kpi() {
    assert_eq!(aggregate(&[]), AggregatedKpi::zero());
    assert!(aggregate(&[]).is_zero());
}

#[test]
fn test_single_document_direct_mapping() {
    let doc = PeriodSummary::from_document(json!({
        "fecha": "2023-11-15",
        "periodo": "diario",
        "metricas": {
            "costoTotal": 9870,
            "valorTotal": 14500,
            "totalHoras": 450,
            "productividadPromedio": 1.9,
            "reportesProcesados": 12
        },
        "porCategoria": {
            "OPERARIO": { "cantidad": 10 },
            "OFICIAL": { "cantidad": 8 },
            "PEON": { "cantidad": 8 }
        }
    }))
    .unwrap();

    let kpi = aggregate(&[doc]);
    assert_eq!(
        kpi,
        AggregatedKpi {
            total_cost: 9870.0,
            total_value: 14500.0,
            profit: 4630.0,
            total_hours: 450.0,
            avg_productivity: 1.9,
            total_activities: 12,
            total_reports: 12,
            total_workers: 26,
        }
    );
}

#[test]
fn test_single_document_profit_is_value_minus_cost() {
    for (cost, value) in [(0.0, 0.0), (120.5, 100.25), (3300.1, 5000.0)] {
        let doc = summary("2024-01-01", cost, value, 0.0, 0.0, 0, &[]);
        let kpi = aggregate(&[doc]);
        assert!((kpi.profit - (value - cost)).abs() < 0.005);
    }
}

#[test]
fn test_many_documents_sum_costs() {
    let docs = vec![
        summary("2024-01-01", 100.25, 150.0, 10.0, 1.0, 2, &[("PEON", 3)]),
        summary("2024-01-02", 200.5, 240.0, 20.0, 1.0, 3, &[("PEON", 5)]),
        summary("2024-01-03", 0.1, 0.2, 0.0, 0.0, 0, &[]),
    ];
    let kpi = aggregate(&docs);
    assert_eq!(kpi.total_cost, 300.85);
    assert_eq!(kpi.total_value, 390.2);
    assert_eq!(kpi.profit, 89.35);
    assert_eq!(kpi.total_hours, 30.0);
    assert_eq!(kpi.total_activities, 5);
    assert_eq!(kpi.total_reports, 5);
}

#[test]
fn test_weighted_productivity() {
    let docs = vec![
        summary("2024-01-01", 0.0, 0.0, 100.0, 1.0, 0, &[]),
        summary("2024-01-02", 0.0, 0.0, 300.0, 2.0, 0, &[]),
    ];
    let kpi = aggregate(&docs);
    assert_eq!(kpi.avg_productivity, 1.75);
}

#[test]
fn test_weighted_productivity_zero_hours() {
    let docs = vec![
        summary("2024-01-01", 0.0, 0.0, 0.0, 1.5, 0, &[]),
        summary("2024-01-02", 0.0, 0.0, 0.0, 2.5, 0, &[]),
    ];
    assert_eq!(aggregate(&docs).avg_productivity, 0.0);
}

#[test]
fn test_many_documents_workers_is_peak() {
    let docs = vec![
        summary("2024-01-01", 0.0, 0.0, 0.0, 0.0, 0, &[("OPERARIO", 4), ("PEON", 6)]),
        summary("2024-01-02", 0.0, 0.0, 0.0, 0.0, 0, &[("OPERARIO", 7), ("PEON", 8)]),
        summary("2024-01-03", 0.0, 0.0, 0.0, 0.0, 0, &[("OFICIAL", 2)]),
    ];
    assert_eq!(aggregate(&docs).total_workers, 15);
}

#[test]
fn test_daily_view_sorted_with_peak_workers() {
    let docs = vec![
        summary("2024-01-03", 50.0, 80.0, 8.0, 1.0, 1, &[("PEON", 2)]),
        summary("2024-01-01", 100.0, 90.0, 16.0, 1.0, 1, &[("PEON", 9)]),
        summary("2024-01-02", 10.0, 40.0, 4.0, 1.0, 1, &[("PEON", 4)]),
    ];
    let view = daily_view(&docs);

    let fechas: Vec<_> = view.rows.iter().map(|r| r.fecha.as_str()).collect();
    assert_eq!(fechas, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(view.rows[0].ganancia, -10.0);
    assert_eq!(view.totals.costo, 160.0);
    assert_eq!(view.totals.valor, 210.0);
    assert_eq!(view.totals.ganancia, 50.0);
    assert_eq!(view.totals.horas, 28.0);
    assert_eq!(view.totals.trabajadores, 9);
}

#[test]
fn test_daily_view_empty() {
    assert_eq!(daily_view(&[]), DailySummaryView::default());
}

#[test]
fn test_many_documents_fractional_sums_are_exact() {
    let docs = vec![
        summary("2024-01-01", 0.004, 0.01, 0.125, 1.0, 1, &[]),
        summary("2024-01-02", 0.004, 0.02, 0.25, 1.0, 1, &[]),
    ];
    let kpi = aggregate(&docs);
    assert_eq!(kpi.total_cost, 0.008);
    assert_eq!(kpi.total_value, 0.03);
    assert_eq!(kpi.profit, 0.022);
    assert_eq!(kpi.total_hours, 0.375);
}

#[test]
fn test_single_and_many_paths_agree_on_fractions() {
    let cases: [(f64, f64, f64); 4] = [
        (0.004, 10.005, 0.125),
        (1234.567, 2000.001, 7.75),
        (99.999, 0.0, 0.5),
        (0.333, 0.667, 1.0 / 3.0),
    ];
    for (cost, value, hours) in cases {
        let single = aggregate(&[summary("2024-01-01", cost, value, hours, 1.0, 1, &[])]);
        assert_eq!(single.total_cost, cost);
        assert_eq!(single.total_value, value);
        assert_eq!(single.total_hours, hours);
        assert!((single.profit - (value - cost)).abs() < 1e-9);

        // Splitting one day's figures across a zero document changes nothing
        let many = aggregate(&[
            summary("2024-01-01", cost, value, hours, 1.0, 1, &[]),
            summary("2024-01-02", 0.0, 0.0, 0.0, 0.0, 0, &[]),
        ]);
        assert_eq!(many.total_cost, single.total_cost);
        assert_eq!(many.total_value, single.total_value);
        assert_eq!(many.profit, single.profit);
    }
}

#[test]
fn test_single_document_sub_cent_profit_not_rounded() {
    let kpi = aggregate(&[summary("2024-01-01", 0.0, 10.005, 0.0, 0.0, 0, &[])]);
    assert_ne!(kpi.profit, 10.01);
    assert!((kpi.profit - 10.005).abs() < 1e-9);
}

#[test]
fn test_daily_view_totals_are_exact_sums() {
    let docs = vec![
        summary("2024-01-01", 0.004, 0.0, 0.125, 1.0, 1, &[]),
        summary("2024-01-02", 0.004, 0.0, 0.25, 1.0, 1, &[]),
    ];
    let view = daily_view(&docs);
    assert_eq!(view.totals.costo, 0.008);
    assert_eq!(view.totals.horas, 0.375);
    assert_eq!(view.totals.ganancia, -0.008);
}
