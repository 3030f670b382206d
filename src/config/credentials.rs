use crate::domain::ports::{AuthMechanism, ConnectParams};
use crate::utils::error::Result;
use crate::utils::validation::{validate_host, validate_non_empty_string, validate_port, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_IMPALA_PORT: u16 = 21050;

fn default_port() -> u16 {
    DEFAULT_IMPALA_PORT
}

/// Connection settings for one Impala target.
///
/// `dbname`, `pass` and `user` are accepted as aliases of `database`, `password` and
/// `username`. Setting both an alias and its canonical key is rejected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpalaCredentials {
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default, alias = "user")]
    username: Option<String>,
    #[serde(default, alias = "pass")]
    password: Option<String>,
    schema: String,
    #[serde(alias = "dbname")]
    database: String,
}

impl ImpalaCredentials {
    pub const TYPE: &'static str = "impala";

    /// Keys printed by `dbt debug`. The password is never listed.
    pub const CONNECTION_KEYS: [&'static str; 5] = ["host", "port", "database", "schema", "username"];

    pub fn new(
        host: impl Into<String>,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
        schema: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.unwrap_or(DEFAULT_IMPALA_PORT),
            username,
            password,
            schema: schema.into(),
            database: database.into(),
        }
    }

    pub fn adapter_type(&self) -> &'static str {
        Self::TYPE
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn connection_keys(&self) -> &'static [&'static str] {
        &Self::CONNECTION_KEYS
    }

    /// Identifies the deployment for anonymous usage tracking.
    pub fn unique_field(&self) -> &str {
        &self.host
    }

    pub fn connection_info(&self) -> Vec<(&'static str, String)> {
        self.connection_keys()
            .iter()
            .map(|key| {
                let value = match *key {
                    "host" => self.host.clone(),
                    "port" => self.port.to_string(),
                    "database" => self.database.clone(),
                    "schema" => self.schema.clone(),
                    "username" => self.username.clone().unwrap_or_else(|| "None".to_string()),
                    _ => "None".to_string(),
                };
                (*key, value)
            })
            .collect()
    }

    pub fn connect_params(&self) -> ConnectParams {
        let auth_mechanism = if self.password.is_some() {
            AuthMechanism::Plain
        } else {
            AuthMechanism::NoSasl
        };

        ConnectParams {
            host: self.host.clone(),
            port: self.port,
            user: self.username.clone(),
            password: self.password.clone(),
            database: Some(self.database.clone()),
            auth_mechanism,
        }
    }
}

impl fmt::Debug for ImpalaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImpalaCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("schema", &self.schema)
            .field("database", &self.database)
            .finish()
    }
}

impl Validate for ImpalaCredentials {
    fn validate(&self) -> Result<()> {
        validate_host("host", &self.host)?;
        validate_port("port", self.port)?;
        validate_non_empty_string("schema", &self.schema)?;
        validate_non_empty_string("database", &self.database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> std::result::Result<ImpalaCredentials, toml::de::Error> {
        toml::from_str(content)
    }

    #[test]
    fn test_aliases_resolve_to_canonical_names() {
        let creds = parse(
            r#"
host = "impala.local"
user = "etl"
pass = "s3cret"
schema = "analytics"
dbname = "warehouse"
"#,
        )
        .unwrap();

        assert_eq!(creds.username(), Some("etl"));
        assert_eq!(creds.password(), Some("s3cret"));
        assert_eq!(creds.database(), "warehouse");
    }

    #[test]
    fn test_port_defaults_to_21050() {
        let creds = parse(
            r#"
host = "impala.local"
schema = "analytics"
database = "analytics"
"#,
        )
        .unwrap();

        assert_eq!(creds.port(), DEFAULT_IMPALA_PORT);
        assert_eq!(creds.username(), None);
    }

    #[test]
    fn test_alias_and_canonical_key_conflict() {
        let result = parse(
            r#"
host = "impala.local"
schema = "analytics"
database = "a"
dbname = "b"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_keys_exclude_password() {
        let creds = ImpalaCredentials::new(
            "impala.local",
            None,
            Some("etl".into()),
            Some("s3cret".into()),
            "analytics",
            "analytics",
        );

        assert!(!creds.connection_keys().contains(&"password"));
        let info = creds.connection_info();
        assert_eq!(info[0], ("host", "impala.local".to_string()));
        assert_eq!(info[1], ("port", "21050".to_string()));
        assert!(info.iter().all(|(_, v)| v != "s3cret"));
        assert!(!format!("{:?}", creds).contains("s3cret"));
    }

    #[test]
    fn test_unique_field_is_host() {
        let creds = ImpalaCredentials::new("impala.local", Some(21000), None, None, "s", "d");
        assert_eq!(creds.unique_field(), "impala.local");
        assert_eq!(creds.adapter_type(), "impala");
    }

    #[test]
    fn test_connect_params_auth_mechanism() {
        let anon = ImpalaCredentials::new("h", None, None, None, "s", "d");
        assert_eq!(anon.connect_params().auth_mechanism, AuthMechanism::NoSasl);

        let ldap = ImpalaCredentials::new("h", None, Some("u".into()), Some("p".into()), "s", "d");
        let params = ldap.connect_params();
        assert_eq!(params.auth_mechanism, AuthMechanism::Plain);
        assert_eq!(params.user.as_deref(), Some("u"));
        assert_eq!(params.database.as_deref(), Some("d"));
    }

    #[test]
    fn test_validate() {
        let creds = ImpalaCredentials::new("impala.local", None, None, None, "s", "d");
        assert!(creds.validate().is_ok());

        let bad_port = ImpalaCredentials::new("impala.local", Some(0), None, None, "s", "d");
        assert!(bad_port.validate().is_err());

        let no_schema = ImpalaCredentials::new("impala.local", None, None, None, " ", "d");
        assert!(no_schema.validate().is_err());
    }
}
