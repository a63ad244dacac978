//! Immutable snapshots of the server record store
//!
//! Every operation returns a new snapshot; nothing is mutated in place.

use crate::envelope::ResponseEnvelope;
use crate::server::{ServerRecord, StatusFilter};

/// Last-known server list together with the envelope it arrived in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStore {
    envelope: ResponseEnvelope,
}

impl ServerStore {
    /// Build the store from a list response, newest record first
    pub fn from_listing(response: &ResponseEnvelope) -> Self {
        let servers = response.servers().iter().rev().cloned().collect();
        Self {
            envelope: response.with_servers(servers),
        }
    }

    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }

    pub fn servers(&self) -> &[ServerRecord] {
        self.envelope.servers()
    }

    pub fn is_empty(&self) -> bool {
        self.servers().is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&ServerRecord> {
        self.servers().iter().find(|s| s.id == id)
    }

    /// Replace the record with the same id, keeping its position.
    ///
    /// Returns `None` if no record has that id.
    pub fn with_replaced(&self, record: &ServerRecord) -> Option<Self> {
        let index = self.servers().iter().position(|s| s.id == record.id)?;
        let mut servers = self.servers().to_vec();
        servers[index] = record.clone();
        Some(Self {
            envelope: self.envelope.with_servers(servers),
        })
    }

    /// Put a newly created record first, taking the metadata of `response`
    pub fn with_prepended(&self, response: &ResponseEnvelope, record: ServerRecord) -> Self {
        let servers = std::iter::once(record)
            .chain(self.servers().iter().cloned())
            .collect();
        Self {
            envelope: response.with_servers(servers),
        }
    }

    /// Drop the record with the given id, taking the metadata of `response`
    pub fn without(&self, response: &ResponseEnvelope, id: i64) -> Self {
        let servers = self
            .servers()
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        Self {
            envelope: response.with_servers(servers),
        }
    }

    /// The envelope to display for a status filter. The store itself is unchanged.
    pub fn filtered(&self, filter: StatusFilter) -> ResponseEnvelope {
        filter_envelope(&self.envelope, filter)
    }
}

/// Restrict an envelope's server list to the records matching `filter`
pub fn filter_envelope(envelope: &ResponseEnvelope, filter: StatusFilter) -> ResponseEnvelope {
    match filter {
        StatusFilter::All => ResponseEnvelope {
            message: Some(format!("Servers filtered by {} status", filter)),
            ..envelope.clone()
        },
        StatusFilter::Only(status) => {
            let servers: Vec<ServerRecord> = envelope
                .servers()
                .iter()
                .filter(|s| filter.matches(s.status))
                .cloned()
                .collect();
            let message = if servers.is_empty() {
                format!("No servers of {} found", status)
            } else {
                format!("Servers filtered by {} status", status.label())
            };
            ResponseEnvelope {
                message: Some(message),
                ..envelope.with_servers(servers)
            }
        }
    }
}
