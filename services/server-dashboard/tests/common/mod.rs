//! Hand-written fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use server_dashboard::api::ServerApi;
use server_dashboard::effects::UiEffects;
use server_dashboard::envelope::ResponseEnvelope;
use server_dashboard::notifier::{NotificationKind, Notifier};
use server_dashboard::store::filter_envelope;
use server_dashboard::{
    Dashboard, DashboardError, ServerForm, ServerRecord, Status, StatusFilter, ViewState,
};
use tokio::sync::oneshot;

pub fn server(id: i64, status: Status) -> ServerRecord {
    ServerRecord {
        id,
        ip_address: format!("192.168.1.{}", id),
        name: format!("server-{}", id),
        memory: "16 GB".to_string(),
        server_type: "Personal PC".to_string(),
        image_url: None,
        status,
        last_checked_at: None,
    }
}

pub fn listing(servers: Vec<ServerRecord>) -> ResponseEnvelope {
    ResponseEnvelope {
        status_code: Some(200),
        status: Some("OK".to_string()),
        message: Some("Servers retrieved!".to_string()),
        ..ResponseEnvelope::default()
    }
    .with_servers(servers)
}

pub fn single(server: ServerRecord, message: &str) -> ResponseEnvelope {
    let mut envelope = ResponseEnvelope {
        status_code: Some(200),
        message: Some(message.to_string()),
        ..ResponseEnvelope::default()
    };
    envelope.data.server = Some(server);
    envelope
}

pub fn ids(view: &ViewState) -> Vec<i64> {
    view.servers().iter().map(|s| s.id).collect()
}

/// A reply the fake API hands out: ready now, or held until released
pub enum Reply {
    Ready(server_dashboard::Result<ResponseEnvelope>),
    Held(oneshot::Receiver<server_dashboard::Result<ResponseEnvelope>>),
}

impl Reply {
    async fn resolve(self) -> server_dashboard::Result<ResponseEnvelope> {
        match self {
            Reply::Ready(result) => result,
            Reply::Held(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DashboardError::Http("reply dropped".to_string()))),
        }
    }
}

/// Scripted API: every call pops the next reply; records what was requested
#[derive(Default)]
pub struct FakeApi {
    replies: StdMutex<VecDeque<Reply>>,
    pub calls: StdMutex<Vec<String>>,
    filter_failure: StdMutex<Option<DashboardError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, result: server_dashboard::Result<ResponseEnvelope>) {
        self.replies.lock().unwrap().push_back(Reply::Ready(result));
    }

    /// Queue a reply that only arrives when the returned sender is used
    pub fn hold(&self) -> oneshot::Sender<server_dashboard::Result<ResponseEnvelope>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Held(rx));
        tx
    }

    /// Make the next filter fail instead of filtering locally
    pub fn fail_filter(&self, error: DashboardError) {
        *self.filter_failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn next(&self, call: String) -> server_dashboard::Result<ResponseEnvelope> {
        self.calls.lock().unwrap().push(call.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(DashboardError::Http(format!("no reply scripted for {}", call))),
        }
    }
}

#[async_trait]
impl ServerApi for FakeApi {
    async fn list(&self) -> server_dashboard::Result<ResponseEnvelope> {
        self.next("list".to_string()).await
    }

    async fn ping(&self, ip_address: &str) -> server_dashboard::Result<ResponseEnvelope> {
        self.next(format!("ping {}", ip_address)).await
    }

    async fn save(&self, form: &ServerForm) -> server_dashboard::Result<ResponseEnvelope> {
        self.next(format!("save {}", form.ip_address)).await
    }

    async fn get(&self, id: i64) -> server_dashboard::Result<ResponseEnvelope> {
        self.next(format!("get {}", id)).await
    }

    async fn delete(&self, id: i64) -> server_dashboard::Result<ResponseEnvelope> {
        self.next(format!("delete {}", id)).await
    }

    async fn filter(
        &self,
        filter: StatusFilter,
        envelope: &ResponseEnvelope,
    ) -> server_dashboard::Result<ResponseEnvelope> {
        let failure = self.filter_failure.lock().unwrap().take();
        match failure {
            Some(error) => Err(error),
            None => Ok(filter_envelope(envelope, filter)),
        }
    }
}

/// Records every UI effect
#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub events: StdMutex<Vec<String>>,
    pub printed: StdMutex<Vec<ViewState>>,
}

impl RecordingEffects {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn printed(&self) -> Vec<ViewState> {
        self.printed.lock().unwrap().clone()
    }
}

impl UiEffects for RecordingEffects {
    fn close_modal(&self) {
        self.events.lock().unwrap().push("close_modal".to_string());
    }

    fn reset_form(&self, form: &ServerForm) {
        self.events
            .lock()
            .unwrap()
            .push(format!("reset_form {}", form.status));
    }

    fn print_report(&self, view: &ViewState) {
        self.printed.lock().unwrap().push(view.clone());
    }
}

/// Records every notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: StdMutex<Vec<(NotificationKind, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(NotificationKind, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.sent.lock().unwrap().push((kind, message.to_string()));
    }
}

/// A dashboard over fakes, with handles to inspect them
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub effects: Arc<RecordingEffects>,
    pub notifier: Arc<RecordingNotifier>,
    pub dashboard: Arc<Dashboard>,
}

impl Harness {
    pub fn new() -> Self {
        let api = Arc::new(FakeApi::new());
        let effects = Arc::new(RecordingEffects::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let dashboard = Arc::new(Dashboard::new(
            api.clone(),
            effects.clone(),
            notifier.clone(),
        ));
        Self {
            api,
            effects,
            notifier,
            dashboard,
        }
    }

    /// A dashboard whose store already holds `servers` in display order
    pub async fn loaded_with(servers: Vec<ServerRecord>) -> Self {
        let harness = Self::new();
        let fetched: Vec<ServerRecord> = servers.into_iter().rev().collect();
        harness.api.reply(Ok(listing(fetched)));
        harness.dashboard.initial_load().await;
        harness
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("dashboard", &self.dashboard)
            .finish()
    }
}
