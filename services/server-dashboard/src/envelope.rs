//! The response envelope every server API endpoint answers with

use serde::{Deserialize, Deserializer, Serialize};

use crate::server::{ServerRecord, Timestamp};

/// Common response wrapper: status metadata plus a list or a single record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    #[serde(default)]
    pub data: Payload,
}

/// Envelope payload. List endpoints fill `servers`, single-record endpoints fill `server`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// The save endpoint sends its single record under this key, so a bare
    /// object is accepted as a one-element list.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub servers: Option<Vec<ServerRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ServerRecord>),
    One(Box<ServerRecord>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<ServerRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::Many(servers) => servers,
            OneOrMany::One(server) => vec![*server],
        }),
    )
}

impl ResponseEnvelope {
    /// The server list, empty when the payload carries none
    pub fn servers(&self) -> &[ServerRecord] {
        self.data.servers.as_deref().unwrap_or_default()
    }

    /// The single record of a single-record response
    pub fn single_server(&self) -> Option<&ServerRecord> {
        self.data.server.as_ref().or_else(|| match self.servers() {
            [only] => Some(only),
            _ => None,
        })
    }

    /// Same metadata, payload replaced by the given server list
    pub fn with_servers(&self, servers: Vec<ServerRecord>) -> Self {
        Self {
            data: Payload {
                servers: Some(servers),
                ..Payload::default()
            },
            ..self.clone()
        }
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
