//! View-state pipeline: turns user actions into a sequence of view states
//!
//! Every operation publishes an immediate view state, awaits the API, then
//! commits a new store snapshot and a final Loaded or Error state. Each
//! operation takes a generation number when it starts; only the latest
//! generation may commit, so a superseded operation's late response is
//! dropped without touching the store or the published view.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::api::ServerApi;
use crate::effects::UiEffects;
use crate::envelope::ResponseEnvelope;
use crate::notifier::{NotificationKind, Notifier};
use crate::server::{ServerForm, ServerRecord, StatusFilter};
use crate::signal::Signal;
use crate::store::ServerStore;
use crate::view::ViewState;
use crate::{DashboardError, Result};

/// What to publish while an operation is in flight
#[derive(Debug, Clone, Copy)]
enum Initial {
    Loading,
    CurrentStore,
}

/// Which in-flight indicator an operation raises
#[derive(Debug, Clone, Copy)]
enum InFlight<'a> {
    Nothing,
    Ping(&'a str),
    Saving,
}

/// Result of applying a successful response to the store
struct Settled {
    store: Option<ServerStore>,
    view: ViewState,
    notification: (NotificationKind, String),
    close_form: bool,
}

impl Settled {
    /// Commit `store` and show it in full
    fn store(store: ServerStore, kind: NotificationKind, message: &str) -> Self {
        Self {
            view: ViewState::loaded(store.envelope().clone()),
            store: Some(store),
            notification: (kind, message.to_string()),
            close_form: false,
        }
    }
}

/// Client-side state of the server dashboard
pub struct Dashboard {
    api: Arc<dyn ServerApi>,
    effects: Arc<dyn UiEffects>,
    notifier: Arc<dyn Notifier>,
    store: Signal<ServerStore>,
    view: Signal<ViewState>,
    filter_token: Signal<String>,
    loading: Signal<bool>,
    generation: Mutex<u64>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("view", &self.view.get())
            .field("filter_token", &self.filter_token.get())
            .field("loading", &self.loading.get())
            .finish()
    }
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn ServerApi>,
        effects: Arc<dyn UiEffects>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            effects,
            notifier,
            store: Signal::default(),
            view: Signal::default(),
            filter_token: Signal::default(),
            loading: Signal::default(),
            generation: Mutex::new(0),
        }
    }

    /// The currently published view state
    pub fn view_state(&self) -> ViewState {
        self.view.get()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// IP address of the server being pinged, empty when idle
    pub fn filter_token(&self) -> String {
        self.filter_token.get()
    }

    pub fn subscribe_filter_token(&self) -> watch::Receiver<String> {
        self.filter_token.subscribe()
    }

    /// True while a new server is being saved
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Snapshot of the record store
    pub fn store(&self) -> ServerStore {
        self.store.get()
    }

    /// Fetch the full server list, newest first
    pub async fn initial_load(&self) -> Option<ViewState> {
        let (generation, _) = self.begin(Initial::Loading, InFlight::Nothing).await;
        let result = self.api.list().await;
        self.settle(generation, "list", result, |_, response| {
            let store = ServerStore::from_listing(&response);
            Ok(Settled::store(
                store,
                NotificationKind::Default,
                response.message_text(),
            ))
        })
        .await
    }

    /// Re-check one server; its row shows a pending indicator meanwhile
    pub async fn ping(&self, ip_address: &str) -> Option<ViewState> {
        let (generation, _) = self
            .begin(Initial::CurrentStore, InFlight::Ping(ip_address))
            .await;
        let result = self.api.ping(ip_address).await;
        self.settle(generation, "ping", result, replace_record).await
    }

    /// Re-fetch one server by id and replace it in place
    pub async fn refresh_server(&self, id: i64) -> Option<ViewState> {
        let (generation, _) = self
            .begin(Initial::CurrentStore, InFlight::Nothing)
            .await;
        let result = self.api.get(id).await;
        self.settle(generation, "refresh", result, replace_record)
            .await
    }

    /// Show only the servers matching `filter`. The store is left as is.
    pub async fn filter(&self, filter: StatusFilter) -> Option<ViewState> {
        let (generation, snapshot) = self
            .begin(Initial::CurrentStore, InFlight::Nothing)
            .await;
        tracing::debug!("Filtering servers by {}", filter);
        let result = self.api.filter(filter, snapshot.envelope()).await;
        self.settle(generation, "filter", result, |_, response| {
            Ok(Settled {
                store: None,
                notification: (NotificationKind::Success, response.message_text().to_string()),
                view: ViewState::loaded(response),
                close_form: false,
            })
        })
        .await
    }

    /// Create a server from the form and list it first
    pub async fn add_server(&self, form: &ServerForm) -> Option<ViewState> {
        let (generation, _) = self
            .begin(Initial::CurrentStore, InFlight::Saving)
            .await;
        tracing::debug!("Saving server '{}' ({})", form.name, form.ip_address);
        let result = self.api.save(form).await;
        self.settle(generation, "save", result, |store, response| {
            let record = single_record(&response)?;
            let store = store.with_prepended(&response, record);
            Ok(Settled {
                close_form: true,
                ..Settled::store(store, NotificationKind::Success, response.message_text())
            })
        })
        .await
    }

    /// Delete a server and drop it from the list
    pub async fn delete_server(&self, id: i64) -> Option<ViewState> {
        let (generation, _) = self
            .begin(Initial::CurrentStore, InFlight::Nothing)
            .await;
        let result = self.api.delete(id).await;
        self.settle(generation, "delete", result, |store, response| {
            let store = store.without(&response, id);
            Ok(Settled::store(
                store,
                NotificationKind::Success,
                response.message_text(),
            ))
        })
        .await
    }

    /// Hand the currently published view to the host's print facility
    pub fn print_report(&self) {
        self.effects.print_report(&self.view.get());
    }

    /// Start a new generation, superseding any operation still in flight
    async fn begin(&self, initial: Initial, in_flight: InFlight<'_>) -> (u64, ServerStore) {
        let mut generation = self.generation.lock().await;
        *generation += 1;

        self.filter_token.set(match in_flight {
            InFlight::Ping(ip_address) => ip_address.to_string(),
            _ => String::new(),
        });
        self.loading.set(matches!(in_flight, InFlight::Saving));

        let snapshot = self.store.get();
        self.view.set(match initial {
            Initial::Loading => ViewState::Loading,
            Initial::CurrentStore => ViewState::loaded(snapshot.envelope().clone()),
        });
        (*generation, snapshot)
    }

    /// Commit the outcome of the operation started as `generation`, unless superseded
    async fn settle<F>(
        &self,
        generation: u64,
        operation: &str,
        result: Result<ResponseEnvelope>,
        apply: F,
    ) -> Option<ViewState>
    where
        F: FnOnce(&ServerStore, ResponseEnvelope) -> Result<Settled>,
    {
        let latest = self.generation.lock().await;
        if *latest != generation {
            tracing::warn!(
                "Dropping {} response: superseded (generation {}, latest {})",
                operation,
                generation,
                *latest
            );
            return None;
        }

        self.filter_token.set(String::new());
        self.loading.set(false);

        let view = match result.and_then(|response| apply(&self.store.get(), response)) {
            Ok(settled) => {
                tracing::debug!("{} succeeded", operation);
                if let Some(store) = settled.store {
                    self.store.set(store);
                }
                if settled.close_form {
                    self.effects.reset_form(&ServerForm::default());
                    self.effects.close_modal();
                }
                let (kind, message) = settled.notification;
                self.notifier.notify(kind, &message);
                settled.view
            }
            Err(e) => {
                tracing::debug!("{} failed: {}", operation, e);
                let message = e.to_string();
                self.notifier.notify(NotificationKind::Error, &message);
                ViewState::error(message)
            }
        };

        self.view.set(view.clone());
        Some(view)
    }
}

fn single_record(response: &ResponseEnvelope) -> Result<ServerRecord> {
    response
        .single_server()
        .cloned()
        .ok_or(DashboardError::MissingPayload("server"))
}

/// Swap the returned record into the store. Unknown ids leave the store unchanged.
fn replace_record(store: &ServerStore, response: ResponseEnvelope) -> Result<Settled> {
    let record = single_record(&response)?;
    match store.with_replaced(&record) {
        Some(updated) => Ok(Settled::store(
            updated,
            NotificationKind::Success,
            response.message_text(),
        )),
        None => {
            tracing::warn!(
                "Server {} ({}) is not in the list, leaving it unchanged",
                record.id,
                record.ip_address
            );
            Ok(Settled {
                store: None,
                view: ViewState::loaded(store.envelope().clone()),
                notification: (NotificationKind::Warning, response.message_text().to_string()),
                close_form: false,
            })
        }
    }
}
