use crate::domain::model::{AdapterResponse, BindValue, ColumnDescription, Connection, ResultTable, Row};
use crate::utils::error::{DriverResult, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Arguments handed to the driver's `connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub auth_mechanism: AuthMechanism,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMechanism {
    NoSasl,
    Plain,
}

impl AuthMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMechanism::NoSasl => "NOSASL",
            AuthMechanism::Plain => "PLAIN",
        }
    }
}

/// Entry point of a native Impala client library.
#[async_trait]
pub trait ImpalaDriver: Send + Sync {
    async fn connect(&self, params: &ConnectParams) -> DriverResult<Box<dyn DriverConnection>>;
}

#[async_trait]
pub trait DriverConnection: Send + Sync {
    async fn cursor(&self) -> DriverResult<Box<dyn Cursor>>;
    async fn close(&self) -> DriverResult<()>;
}

#[async_trait]
pub trait Cursor: Send {
    async fn execute(
        &mut self,
        sql: &str,
        bindings: Option<&[BindValue]>,
        configuration: &HashMap<String, String>,
    ) -> DriverResult<()>;

    /// Rows affected by the last statement, or -1 when unknown.
    fn rowcount(&self) -> i64;

    fn description(&self) -> Option<Vec<ColumnDescription>>;

    async fn fetch_all(&mut self) -> DriverResult<Vec<Row>>;

    async fn close(&mut self) -> DriverResult<()>;
}

/// The host framework's connection-manager contract.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn open(&self, connection: &mut Connection) -> Result<()>;

    async fn close(&self, connection: &mut Connection) -> Result<()>;

    async fn cancel(&self, connection: &mut Connection) -> Result<()>;

    fn begin(&self, connection: &mut Connection);

    fn commit(&self, connection: &mut Connection);

    fn rollback(&self, connection: &mut Connection);

    fn add_begin_query(&self);

    fn add_commit_query(&self);

    fn get_response(&self, cursor: &dyn Cursor) -> AdapterResponse;

    async fn add_query(
        &self,
        connection: &mut Connection,
        sql: &str,
        auto_begin: bool,
        bindings: Option<&[BindValue]>,
        abridge_sql_log: bool,
    ) -> Result<Box<dyn Cursor>>;

    async fn execute(
        &self,
        connection: &mut Connection,
        sql: &str,
        auto_begin: bool,
        fetch: bool,
    ) -> Result<(AdapterResponse, ResultTable)>;
}
