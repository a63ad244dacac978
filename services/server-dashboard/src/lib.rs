//! Server Dashboard - client-side state for the server monitoring dashboard
//!
//! Lists monitored servers, filters them by status, pings them, adds and
//! deletes records and prints a report, keeping an in-memory record store in
//! step with the server API.

pub mod api;
pub mod config;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod io;
pub mod notifier;
pub mod pipeline;
pub mod report;
pub mod server;
pub mod signal;
pub mod store;
pub mod view;

pub use config::{load_config, Config};
pub use error::{DashboardError, Result};
pub use pipeline::Dashboard;
pub use server::{ServerForm, ServerRecord, Status, StatusFilter, Timestamp};
pub use view::ViewState;

use std::sync::Arc;

use crate::api::RestServerApi;
use crate::effects::TerminalEffects;
use crate::io::ReqwestHttpClient;
use crate::notifier::{LogNotifier, Notifier, SilentNotifier};

/// A single user action to run against the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Ping(String),
    Filter(StatusFilter),
    Add(ServerForm),
    Delete(i64),
    Refresh(i64),
}

/// Build a dashboard wired to the REST API and the terminal
pub fn build_dashboard(config: &Config) -> Dashboard {
    let http = Arc::new(ReqwestHttpClient::new());
    let api = Arc::new(RestServerApi::new(&config.api.base_url, http));
    let effects = Arc::new(TerminalEffects::new(config.report.title.clone()));
    let notifier: Arc<dyn Notifier> = if config.notifications.enabled {
        Arc::new(LogNotifier)
    } else {
        Arc::new(SilentNotifier)
    };
    Dashboard::new(api, effects, notifier)
}

/// Load the server list, run `action` and print the resulting view
pub async fn execute(dashboard: &Dashboard, action: Action) -> ViewState {
    tracing::debug!("Executing {:?}", action);
    let loaded = dashboard.initial_load().await;

    let view = if matches!(loaded, Some(ViewState::Error { .. })) {
        tracing::debug!("Initial load failed, skipping {:?}", action);
        loaded
    } else {
        match action {
            Action::List => loaded,
            Action::Ping(ip_address) => dashboard.ping(&ip_address).await,
            Action::Filter(filter) => dashboard.filter(filter).await,
            Action::Add(form) => dashboard.add_server(&form).await,
            Action::Delete(id) => dashboard.delete_server(id).await,
            Action::Refresh(id) => dashboard.refresh_server(id).await,
        }
    };

    dashboard.print_report();
    view.unwrap_or_else(|| dashboard.view_state())
}

/// Run one action against the configured backend
pub async fn run(config: &Config, action: Action) -> ViewState {
    tracing::info!("Using server API at {}", config.api.base_url);
    let dashboard = build_dashboard(config);
    execute(&dashboard, action).await
}
