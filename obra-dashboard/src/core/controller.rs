//! Dashboard controller
//!
//! Owns the state channel and the in-flight fetch. A filter, store or data
//! source change cancels the previous fetch and starts a new one tagged with
//! the bumped generation.
//!
//! ```ignore
//! let controller = DashboardController::new(config, Some(live_store));
//! let mut rx = controller.subscribe();
//! controller.set_filters(Filters::week("2024-W05"));
//! rx.changed().await?;
//! ```

use parking_lot::{Mutex, RwLock};
use shared::error::AppError;
use shared::models::Filters;
use shared::util::now_millis;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::config::{Config, DataSource};
use super::state::{DashboardAction, DashboardState, reduce};
use crate::services::DashboardService;
use crate::store::demo::demo_documents;
use crate::store::{MemoryStore, StoreHandle};
use crate::utils::time::today;

fn dispatch(tx: &watch::Sender<DashboardState>, action: DashboardAction) {
    tx.send_modify(|state| {
        let current = std::mem::take(state);
        *state = reduce(current, action);
    });
}

pub struct DashboardController {
    config: Config,
    /// 真实存储句柄，未登录 / 未选择项目时为 None
    live: RwLock<Option<StoreHandle>>,
    mock: StoreHandle,
    state_tx: Arc<watch::Sender<DashboardState>>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl DashboardController {
    pub fn new(config: Config, live: Option<StoreHandle>) -> Self {
        let today = today(config.business_timezone);
        let mock: StoreHandle = Arc::new(MemoryStore::from_documents(demo_documents(
            &config.collections,
            today,
        )));

        let initial = DashboardState {
            data_source: config.data_source,
            ..Default::default()
        };
        let (state_tx, _) = watch::channel(initial);

        Self {
            config,
            live: RwLock::new(live),
            mock,
            state_tx: Arc::new(state_tx),
            inflight: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot
    pub fn state(&self) -> DashboardState {
        self.state_tx.borrow().clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_filters(&self, filters: Filters) -> Option<JoinHandle<()>> {
        self.apply(DashboardAction::FiltersChanged(filters))
    }

    /// Swap the live store handle (project switch, sign-in / sign-out)
    pub fn set_store(&self, store: Option<StoreHandle>) -> Option<JoinHandle<()>> {
        *self.live.write() = store;
        self.apply(DashboardAction::StoreChanged)
    }

    pub fn set_data_source(&self, data_source: DataSource) -> Option<JoinHandle<()>> {
        self.apply(DashboardAction::DataSourceChanged(data_source))
    }

    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        self.apply(DashboardAction::RefreshRequested)
    }

    /// Cancel the in-flight fetch, if any
    pub fn shutdown(&self) {
        if let Some(token) = self.inflight.lock().take() {
            token.cancel();
        }
    }

    fn active_store(&self, data_source: DataSource) -> Option<StoreHandle> {
        match data_source {
            DataSource::Mock => Some(self.mock.clone()),
            DataSource::Live => self.live.read().clone(),
        }
    }

    /// Reduce `action` and, when it triggers one, start the fetch
    ///
    /// Returns the spawned fetch task; `None` when no fetch was started.
    fn apply(&self, action: DashboardAction) -> Option<JoinHandle<()>> {
        if !action.triggers_fetch() {
            dispatch(&self.state_tx, action);
            return None;
        }

        // Held until the new token is installed so concurrent callers cannot
        // cancel a newer fetch with an older generation.
        let mut inflight = self.inflight.lock();
        dispatch(&self.state_tx, action);

        let (generation, filters, data_source) = {
            let state = self.state_tx.borrow();
            (state.generation, state.filters.clone(), state.data_source)
        };

        let token = CancellationToken::new();
        if let Some(previous) = inflight.replace(token.clone()) {
            previous.cancel();
        }

        let Some(store) = self.active_store(data_source) else {
            tracing::warn!(generation, "No store handle, skipping query");
            dispatch(
                &self.state_tx,
                DashboardAction::FetchFailed {
                    generation,
                    error: AppError::store_unavailable(),
                },
            );
            return None;
        };

        let service = DashboardService::new(store, &self.config);
        let today = today(self.config.business_timezone);
        let tx = self.state_tx.clone();

        tracing::debug!(generation, tipo = %filters.kind, "Starting dashboard fetch");

        Some(tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(generation, "Fetch superseded");
                }
                result = service.load_kpis(&filters, today) => {
                    let action = match result {
                        Ok(snapshot) => DashboardAction::FetchSucceeded {
                            generation,
                            snapshot,
                            fetched_at: now_millis(),
                        },
                        Err(error) => {
                            tracing::error!(generation, error = %error, "Dashboard fetch failed");
                            DashboardAction::FetchFailed { generation, error }
                        }
                    };
                    dispatch(&tx, action);
                }
            }
        }))
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
