//! Server record types as exchanged with the server API

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A backend timestamp. Only carried along, never interpreted, so any shape
/// the backend sends is kept: with an offset, naive, or anything else as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Raw(serde_json::Value),
}

impl Timestamp {
    /// Wall-clock time, when the backend sent a parseable date
    pub fn naive_local(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Offset(time) => Some(time.naive_local()),
            Timestamp::Naive(time) => Some(*time),
            Timestamp::Raw(_) => None,
        }
    }
}

/// Reachability of a monitored server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    ServerUp,
    ServerDown,
}

impl Status {
    /// Wire token, e.g. `SERVER_UP`
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ServerUp => "SERVER_UP",
            Status::ServerDown => "SERVER_DOWN",
        }
    }

    /// Human readable label, e.g. `SERVER UP`
    pub fn label(&self) -> &'static str {
        match self {
            Status::ServerUp => "SERVER UP",
            Status::ServerDown => "SERVER DOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SERVER_UP" => Ok(Status::ServerUp),
            "SERVER_DOWN" => Ok(Status::ServerDown),
            other => Err(format!(
                "unknown status '{}', expected SERVER_UP or SERVER_DOWN",
                other
            )),
        }
    }
}

/// A monitored server as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: i64,
    pub ip_address: String,
    pub name: String,
    pub memory: String,
    #[serde(rename = "type")]
    pub server_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<Timestamp>,
}

/// Status selector used by the filter operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ALL") {
            return Ok(StatusFilter::All);
        }
        s.parse::<Status>()
            .map(StatusFilter::Only)
            .map_err(|_| format!("unknown filter '{}', expected ALL, SERVER_UP or SERVER_DOWN", s))
    }
}

/// Field values of the add-server form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerForm {
    pub ip_address: String,
    pub name: String,
    pub memory: String,
    #[serde(rename = "type")]
    pub server_type: String,
    pub status: Status,
}

/// The reset state of the form: empty fields, status `SERVER_DOWN`
impl Default for ServerForm {
    fn default() -> Self {
        Self {
            ip_address: String::new(),
            name: String::new(),
            memory: String::new(),
            server_type: String::new(),
            status: Status::ServerDown,
        }
    }
}
