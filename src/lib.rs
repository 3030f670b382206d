pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{ImpalaCredentials, Profiles, DEFAULT_IMPALA_PORT};
pub use crate::core::connection_manager::ImpalaConnectionManager;
pub use crate::core::{AdapterResponse, Connection, ConnectionManager, ConnectionState};
pub use utils::error::{AdapterError, DriverError, Result};
