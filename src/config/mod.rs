#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod profile;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use credentials::{ImpalaCredentials, DEFAULT_IMPALA_PORT};
pub use profile::{Profiles, Target};
