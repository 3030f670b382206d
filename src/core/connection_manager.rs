use crate::core::{
    AdapterResponse, BindValue, Connection, ConnectionManager, ConnectionState, Cursor,
    ImpalaDriver, ResultTable,
};
use crate::utils::error::{AdapterError, DriverError, Result};
use crate::utils::events;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

/// Substitution style passed to `Cursor::execute`. The driver needs `format` to quote
/// timestamp bindings correctly.
pub const PARAMSTYLE: &str = "format";

pub struct ImpalaConnectionManager<D: ImpalaDriver> {
    driver: D,
}

impl<D: ImpalaDriver> ImpalaConnectionManager<D> {
    pub const TYPE: &'static str = "impala";

    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Runs a driver operation and maps its failure onto the adapter's error kinds.
    pub async fn exception_handler<T, F>(&self, sql: &str, operation: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, DriverError>>,
    {
        match operation.await {
            Ok(value) => Ok(value),
            Err(err) if err.is_database_error() => {
                tracing::debug!("dbt-impala error: {}", err);
                Err(AdapterError::Database {
                    message: err.to_string(),
                })
            }
            Err(err) => {
                tracing::debug!("Error running SQL: {}", sql);
                Err(AdapterError::Runtime {
                    message: err.to_string(),
                })
            }
        }
    }

    fn execute_configuration() -> HashMap<String, String> {
        HashMap::from([("paramstyle".to_string(), PARAMSTYLE.to_string())])
    }
}

#[async_trait]
impl<D: ImpalaDriver> ConnectionManager for ImpalaConnectionManager<D> {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    async fn open(&self, connection: &mut Connection) -> Result<()> {
        if connection.state == ConnectionState::Open {
            tracing::debug!("Connection is already open, skipping open.");
            return Ok(());
        }

        let params = connection.credentials.connect_params();

        match self.driver.connect(&params).await {
            Ok(handle) => {
                connection.state = ConnectionState::Open;
                connection.handle = Some(handle);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    "Connection error on '{}' ({}:{}): {}",
                    connection.name,
                    params.host,
                    params.port,
                    err
                );
                connection.state = ConnectionState::Fail;
                connection.handle = None;
                Err(AdapterError::FailedToConnect {
                    host: params.host,
                    port: params.port,
                    message: err.to_string(),
                })
            }
        }
    }

    async fn close(&self, connection: &mut Connection) -> Result<()> {
        let handle = connection.handle.take();
        connection.state = ConnectionState::Closed;

        if let Some(handle) = handle {
            handle.close().await?;
        }
        Ok(())
    }

    async fn cancel(&self, connection: &mut Connection) -> Result<()> {
        match connection.handle.as_ref() {
            Some(handle) => {
                tracing::debug!("Cancelling query on connection '{}'", connection.name);
                handle.close().await?;
                Ok(())
            }
            None => {
                tracing::debug!("Connection '{}' has no handle, nothing to cancel", connection.name);
                Ok(())
            }
        }
    }

    fn begin(&self, _connection: &mut Connection) {
        tracing::debug!("NotImplemented: begin");
    }

    fn commit(&self, _connection: &mut Connection) {
        tracing::debug!("NotImplemented: commit");
    }

    fn rollback(&self, _connection: &mut Connection) {
        tracing::debug!("NotImplemented: rollback");
    }

    fn add_begin_query(&self) {
        tracing::debug!("NotImplemented: add_begin_query");
    }

    fn add_commit_query(&self) {
        tracing::debug!("NotImplemented: add_commit_query");
    }

    fn get_response(&self, cursor: &dyn Cursor) -> AdapterResponse {
        AdapterResponse {
            rows_affected: cursor.rowcount(),
            ..AdapterResponse::default()
        }
    }

    async fn add_query(
        &self,
        connection: &mut Connection,
        sql: &str,
        auto_begin: bool,
        bindings: Option<&[BindValue]>,
        abridge_sql_log: bool,
    ) -> Result<Box<dyn Cursor>> {
        if auto_begin && !connection.transaction_open {
            self.begin(connection);
        }
        events::connection_used(Self::TYPE, &connection.name);

        let handle = match (connection.state, connection.handle.as_ref()) {
            (ConnectionState::Open, Some(handle)) => handle,
            _ => {
                return Err(AdapterError::ConnectionNotOpen {
                    name: connection.name.clone(),
                })
            }
        };

        events::sql_query(&connection.name, &events::log_sql(sql, abridge_sql_log));
        let pre = Instant::now();

        let configuration = Self::execute_configuration();
        let cursor = self
            .exception_handler(sql, async {
                let mut cursor = handle.cursor().await?;
                cursor.execute(sql, bindings, &configuration).await?;
                Ok::<_, DriverError>(cursor)
            })
            .await?;

        let status = self.get_response(cursor.as_ref());
        events::sql_query_status(&status.to_string(), pre.elapsed());

        Ok(cursor)
    }

    async fn execute(
        &self,
        connection: &mut Connection,
        sql: &str,
        auto_begin: bool,
        fetch: bool,
    ) -> Result<(AdapterResponse, ResultTable)> {
        let mut cursor = self.add_query(connection, sql, auto_begin, None, false).await?;
        let response = self.get_response(cursor.as_ref());

        let fetched = if fetch {
            self.exception_handler(sql, cursor.fetch_all())
                .await
                .map(|rows| ResultTable {
                    columns: cursor.description().unwrap_or_default(),
                    rows,
                })
        } else {
            Ok(ResultTable::default())
        };

        // The cursor is closed even when the fetch failed; the fetch error wins.
        let closed = self.exception_handler(sql, cursor.close()).await;
        let table = fetched?;
        closed?;
        Ok((response, table))
    }
}
