pub mod connection_manager;

pub use crate::domain::model::{
    AdapterResponse, BindValue, ColumnDescription, Connection, ConnectionState, ResultTable, Row,
};
pub use crate::domain::ports::{
    AuthMechanism, ConnectParams, ConnectionManager, Cursor, DriverConnection, ImpalaDriver,
};
pub use crate::utils::error::Result;
