//! Dashboard state store
//!
//! All state transitions go through [`reduce`]. Every action that triggers a
//! refetch bumps `generation`; fetch results tagged with an older generation
//! are dropped, so a slow superseded read can never overwrite a newer one.

use serde::Serialize;
use shared::error::AppError;
use shared::models::{AggregatedKpi, Filters};

use super::config::DataSource;
use crate::services::KpiSnapshot;
use crate::statistics::TrendPoint;
use crate::statistics::range::ResolvedPeriod;

/// 加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Query succeeded with no documents; KPIs are zero
    Empty,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub filters: Filters,
    #[serde(skip)]
    pub data_source: DataSource,
    pub status: LoadStatus,
    /// Last failure, cleared on the next successful fetch
    pub error: Option<AppError>,
    /// Last known KPIs; kept on failure
    pub kpi: AggregatedKpi,
    pub period: Option<ResolvedPeriod>,
    pub documents: usize,
    pub trend: Vec<TrendPoint>,
    /// Bumped by every refetch-triggering action
    pub generation: u64,
    /// 最近一次成功加载时间 (ms)
    pub updated_at: Option<i64>,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    FiltersChanged(Filters),
    /// Project / credentials switched; the handle itself lives in the controller
    StoreChanged,
    DataSourceChanged(DataSource),
    RefreshRequested,
    FetchSucceeded {
        generation: u64,
        snapshot: KpiSnapshot,
        fetched_at: i64,
    },
    FetchFailed {
        generation: u64,
        error: AppError,
    },
}

impl DashboardAction {
    /// Whether this action starts a new fetch
    pub fn triggers_fetch(&self) -> bool {
        matches!(
            self,
            Self::FiltersChanged(_)
                | Self::StoreChanged
                | Self::DataSourceChanged(_)
                | Self::RefreshRequested
        )
    }
}

fn begin_fetch(mut state: DashboardState) -> DashboardState {
    state.generation += 1;
    state.status = LoadStatus::Loading;
    state
}

/// Pure state transition
pub fn reduce(state: DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::FiltersChanged(filters) => begin_fetch(DashboardState { filters, ..state }),
        DashboardAction::StoreChanged | DashboardAction::RefreshRequested => begin_fetch(state),
        DashboardAction::DataSourceChanged(data_source) => {
            begin_fetch(DashboardState { data_source, ..state })
        }
        DashboardAction::FetchSucceeded {
            generation,
            snapshot,
            fetched_at,
        } => {
            if generation != state.generation {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    "Discarding stale fetch result"
                );
                return state;
            }
            DashboardState {
                status: if snapshot.is_empty() {
                    LoadStatus::Empty
                } else {
                    LoadStatus::Ready
                },
                error: None,
                kpi: snapshot.kpi,
                period: Some(snapshot.period),
                documents: snapshot.documents,
                trend: snapshot.trend,
                updated_at: Some(fetched_at),
                ..state
            }
        }
        DashboardAction::FetchFailed { generation, error } => {
            if generation != state.generation {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    "Discarding stale fetch failure"
                );
                return state;
            }
            DashboardState {
                status: LoadStatus::Failed,
                error: Some(error),
                ..state
            }
        }
    }
}
