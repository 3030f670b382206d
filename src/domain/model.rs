use crate::config::credentials::ImpalaCredentials;
use crate::domain::ports::DriverConnection;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Init,
    Open,
    Closed,
    Fail,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Init => "init",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Fail => "fail",
        };
        f.write_str(s)
    }
}

/// A named connection owned by the host framework.
///
/// The adapter only touches `state` and `handle`. `handle` is `Some` only while
/// `state` is [`ConnectionState::Open`].
pub struct Connection {
    pub name: String,
    pub state: ConnectionState,
    pub transaction_open: bool,
    pub credentials: ImpalaCredentials,
    pub handle: Option<Box<dyn DriverConnection>>,
}

impl Connection {
    pub fn new(name: impl Into<String>, credentials: ImpalaCredentials) -> Self {
        Self {
            name: name.into(),
            state: ConnectionState::Init,
            transaction_open: false,
            credentials,
            handle: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("transaction_open", &self.transaction_open)
            .field("credentials", &self.credentials)
            .field("handle", &self.handle.as_ref().map(|_| "<driver connection>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterResponse {
    pub message: String,
    pub code: String,
    pub rows_affected: i64,
}

impl Default for AdapterResponse {
    fn default() -> Self {
        Self {
            message: "OK".to_string(),
            code: String::new(),
            rows_affected: -1,
        }
    }
}

impl fmt::Display for AdapterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A positional query parameter, substituted by the driver using the `format` paramstyle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    String(String),
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::String(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::String(value)
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Int(value)
    }
}

impl From<f64> for BindValue {
    fn from(value: f64) -> Self {
        BindValue::Float(value)
    }
}

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        BindValue::Bool(value)
    }
}

impl From<NaiveDateTime> for BindValue {
    fn from(value: NaiveDateTime) -> Self {
        BindValue::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    pub type_code: String,
}

pub type Row = Vec<serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<ColumnDescription>,
    pub rows: Vec<Row>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
