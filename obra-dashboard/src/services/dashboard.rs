//! Dashboard Service
//!
//! 过滤条件 → 日期范围 → 汇总查询 → 仓库读取 → 聚合。
//! Analysis views recompute derived metrics from the raw collections.

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Activity, AggregatedKpi, Filters, Report, Worker};

use crate::core::config::Config;
use crate::db::repository::{
    ActivityRepository, PeriodSummaryRepository, ReportRepository, WorkerRepository,
};
use crate::statistics::derived::{
    ActivityProfit, CostShare, CumulativePoint, WorkerEfficiency, cost_distribution,
    cumulative_profit, profit_margin, profitability_ranking, top_workers, weighted_productivity,
    worker_efficiencies,
};
use crate::statistics::query::{QuerySpec, build_query_for};
use crate::statistics::range::{ResolvedPeriod, resolve_range, resolve_range_lenient};
use crate::statistics::tariff::estimated_labour_cost;
use crate::statistics::{DailySummaryView, TrendPoint, aggregate, daily_view};
use crate::store::StoreHandle;
use crate::utils::AppResult;

/// Workers listed in the productivity ranking
pub const TOP_WORKER_COUNT: usize = 5;

/// KPI set for one resolved period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub period: ResolvedPeriod,
    pub kpi: AggregatedKpi,
    /// Summary documents behind `kpi`
    pub documents: usize,
    /// Daily points across the period, oldest first
    pub trend: Vec<TrendPoint>,
}

impl KpiSnapshot {
    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }
}

/// Análisis: rentabilidad, costos y rendimiento
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub period: ResolvedPeriod,
    pub kpi: AggregatedKpi,
    /// ganancia / valorTotal × 100
    pub profit_margin: f64,
    pub weighted_productivity: f64,
    pub profitability: Vec<ActivityProfit>,
    pub cost_distribution: Vec<CostShare>,
    pub cumulative_profit: Vec<CumulativePoint>,
    pub efficiencies: Vec<WorkerEfficiency>,
    pub top_workers: Vec<Worker>,
    /// Σ horas × tarifa over the filtered workers
    pub estimated_labour_cost: f64,
}

#[derive(Clone)]
pub struct DashboardService {
    summaries: PeriodSummaryRepository,
    activities: ActivityRepository,
    workers: WorkerRepository,
    reports: ReportRepository,
    report_limit: usize,
    cost_placeholder: bool,
}

impl DashboardService {
    pub fn new(store: StoreHandle, config: &Config) -> Self {
        let names = &config.collections;
        Self {
            summaries: PeriodSummaryRepository::new(store.clone(), names.summaries.clone()),
            activities: ActivityRepository::new(store.clone(), names.activities.clone()),
            workers: WorkerRepository::new(store.clone(), names.workers.clone()),
            reports: ReportRepository::new(store, names.reports.clone()),
            report_limit: config.report_list_limit.max(1),
            cost_placeholder: config.cost_placeholder_enabled,
        }
    }

    /// KPIs for the period selected by `filters`
    pub async fn load_kpis(&self, filters: &Filters, today: NaiveDate) -> AppResult<KpiSnapshot> {
        let period = resolve_range(filters.kind, filters, today);
        self.load_period(period).await
    }

    /// KPIs for a raw `tipoFiltro`; unknown kinds fall back to today
    pub async fn load_kpis_raw(
        &self,
        kind: &str,
        filters: &Filters,
        today: NaiveDate,
    ) -> AppResult<KpiSnapshot> {
        let period = resolve_range_lenient(kind, filters, today);
        self.load_period(period).await
    }

    async fn load_period(&self, period: ResolvedPeriod) -> AppResult<KpiSnapshot> {
        let spec = build_query_for(&period);
        let summaries = self.summaries.find(&spec).await?;
        let kpi = aggregate(&summaries);

        let trend = if spec == QuerySpec::daily_series(&period.range) {
            daily_view(&summaries).rows
        } else {
            self.daily_series(&period).await?.rows
        };

        tracing::info!(
            tipo = %period.kind,
            inicio = %period.range.inicio,
            fin = %period.range.fin,
            documents = summaries.len(),
            "KPIs loaded"
        );

        Ok(KpiSnapshot {
            period,
            kpi,
            documents: summaries.len(),
            trend,
        })
    }

    async fn daily_series(&self, period: &ResolvedPeriod) -> AppResult<DailySummaryView> {
        let summaries = self.summaries.find(&QuerySpec::daily_series(&period.range)).await?;
        Ok(daily_view(&summaries))
    }

    /// Per-day rows across the selected period plus totals
    pub async fn load_daily_view(
        &self,
        filters: &Filters,
        today: NaiveDate,
    ) -> AppResult<DailySummaryView> {
        let period = resolve_range(filters.kind, filters, today);
        self.daily_series(&period).await
    }

    /// Derived metrics over activities / workers in the selected period
    pub async fn load_analysis(&self, filters: &Filters, today: NaiveDate) -> AppResult<AnalysisView> {
        let period = resolve_range(filters.kind, filters, today);

        let summaries = self.summaries.find(&build_query_for(&period)).await?;
        let kpi = aggregate(&summaries);
        let series = self.daily_series(&period).await?;

        let activities: Vec<Activity> = self
            .activities
            .find_in_range(&period.range, &filters.location)
            .await?;
        let workers: Vec<Worker> = self.workers.find(&filters.category, &filters.location).await?;

        tracing::debug!(
            activities = activities.len(),
            workers = workers.len(),
            "Building analysis view"
        );

        Ok(AnalysisView {
            profit_margin: profit_margin(kpi.profit, kpi.total_value),
            weighted_productivity: weighted_productivity(&activities),
            profitability: profitability_ranking(&activities),
            cost_distribution: cost_distribution(&activities, self.cost_placeholder),
            cumulative_profit: cumulative_profit(&series.rows),
            efficiencies: worker_efficiencies(&workers),
            top_workers: top_workers(&workers, TOP_WORKER_COUNT),
            estimated_labour_cost: estimated_labour_cost(&workers),
            period,
            kpi,
        })
    }

    /// Recent reports in the selected period, newest first
    pub async fn list_reports(&self, filters: &Filters, today: NaiveDate) -> AppResult<Vec<Report>> {
        let period = resolve_range(filters.kind, filters, today);
        let reports = self
            .reports
            .list_recent(&period.range, &filters.location, self.report_limit)
            .await?;
        Ok(reports)
    }

    pub async fn find_report(&self, id: &str) -> AppResult<Option<Report>> {
        Ok(self.reports.find_by_id(id).await?)
    }
}
