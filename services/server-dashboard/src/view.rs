//! View states consumed by the presentation layer

use crate::envelope::ResponseEnvelope;
use crate::server::ServerRecord;

/// What the presentation layer should render. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded {
        data: ResponseEnvelope,
    },
    Error {
        message: String,
    },
}

impl ViewState {
    pub fn loaded(data: ResponseEnvelope) -> Self {
        ViewState::Loaded { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ViewState::Error {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&ResponseEnvelope> {
        match self {
            ViewState::Loaded { data } => Some(data),
            _ => None,
        }
    }

    /// Servers to display, empty unless loaded
    pub fn servers(&self) -> &[ServerRecord] {
        self.data().map(ResponseEnvelope::servers).unwrap_or_default()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }
}
