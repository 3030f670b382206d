use crate::config::credentials::ImpalaCredentials;
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_THREADS: u32 = 1;

/// Parsed profiles file: profile name to profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Profiles {
    profiles: HashMap<String, Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub target: Option<String>,
    #[serde(default)]
    pub outputs: HashMap<String, toml::Table>,
}

/// A resolved output of a profile.
#[derive(Debug, Clone)]
pub struct Target {
    pub profile_name: String,
    pub target_name: String,
    pub threads: u32,
    pub credentials: ImpalaCredentials,
}

impl Profiles {
    /// Loads profiles from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdapterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AdapterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves a target. Falls back to the profile's default `target` when none is given.
    pub fn target(&self, profile_name: &str, target: Option<&str>) -> Result<Target> {
        let profile =
            self.profiles
                .get(profile_name)
                .ok_or_else(|| AdapterError::MissingConfigError {
                    field: format!("profile '{}'", profile_name),
                })?;

        let target_name = match target {
            Some(name) => name.to_string(),
            None => validate_required_field(&format!("{}.target", profile_name), &profile.target)?
                .clone(),
        };

        let output = profile.outputs.get(&target_name).ok_or_else(|| {
            AdapterError::MissingConfigError {
                field: format!("{}.outputs.{}", profile_name, target_name),
            }
        })?;

        let field = |key: &str| format!("{}.outputs.{}.{}", profile_name, target_name, key);
        let mut output = output.clone();

        match output.remove("type") {
            Some(toml::Value::String(t)) if t == ImpalaCredentials::TYPE => {}
            Some(other) => {
                return Err(AdapterError::InvalidConfigValueError {
                    field: field("type"),
                    value: other.to_string(),
                    reason: format!("Only '{}' targets are supported", ImpalaCredentials::TYPE),
                })
            }
            None => return Err(AdapterError::MissingConfigError { field: field("type") }),
        }

        let threads = match output.remove("threads") {
            None => DEFAULT_THREADS,
            Some(toml::Value::Integer(n)) if n > 0 && n <= u32::MAX as i64 => n as u32,
            Some(other) => {
                return Err(AdapterError::InvalidConfigValueError {
                    field: field("threads"),
                    value: other.to_string(),
                    reason: "Must be a positive integer".to_string(),
                })
            }
        };

        let credentials: ImpalaCredentials = toml::Value::Table(output).try_into().map_err(
            |e: toml::de::Error| AdapterError::ConfigValidationError {
                field: format!("{}.outputs.{}", profile_name, target_name),
                message: e.to_string(),
            },
        )?;
        credentials.validate()?;

        tracing::debug!(
            "Resolved target {}.{} ({}:{})",
            profile_name,
            target_name,
            credentials.host(),
            credentials.port()
        );

        Ok(Target {
            profile_name: profile_name.to_string(),
            target_name,
            threads,
            credentials,
        })
    }

    pub fn credentials(&self, profile_name: &str, target: Option<&str>) -> Result<ImpalaCredentials> {
        self.target(profile_name, target).map(|t| t.credentials)
    }
}

/// Replaces `${VAR}` placeholders from the environment. Unset variables are left as written.
pub fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: &str = r#"
[warehouse]
target = "dev"

[warehouse.outputs.dev]
type = "impala"
host = "impala-dev.local"
schema = "analytics"
dbname = "analytics"
threads = 4

[warehouse.outputs.prod]
type = "impala"
host = "impala-prod.local"
port = 21000
user = "etl"
schema = "analytics"
database = "analytics"

[other]
[other.outputs.dev]
type = "postgres"
host = "pg.local"
schema = "public"
database = "db"
"#;

    #[test]
    fn test_default_target() {
        let profiles = Profiles::from_toml_str(PROFILES).unwrap();
        let target = profiles.target("warehouse", None).unwrap();

        assert_eq!(target.target_name, "dev");
        assert_eq!(target.threads, 4);
        assert_eq!(target.credentials.host(), "impala-dev.local");
        assert_eq!(target.credentials.port(), 21050);
        assert_eq!(target.credentials.database(), "analytics");
    }

    #[test]
    fn test_explicit_target() {
        let profiles = Profiles::from_toml_str(PROFILES).unwrap();
        let creds = profiles.credentials("warehouse", Some("prod")).unwrap();

        assert_eq!(creds.port(), 21000);
        assert_eq!(creds.username(), Some("etl"));
    }

    #[test]
    fn test_missing_profile_and_target() {
        let profiles = Profiles::from_toml_str(PROFILES).unwrap();

        assert!(matches!(
            profiles.target("nope", None),
            Err(AdapterError::MissingConfigError { .. })
        ));
        assert!(matches!(
            profiles.target("warehouse", Some("staging")),
            Err(AdapterError::MissingConfigError { .. })
        ));
        assert!(matches!(
            profiles.target("other", None),
            Err(AdapterError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_rejects_other_adapter_types() {
        let profiles = Profiles::from_toml_str(PROFILES).unwrap();
        let err = profiles.target("other", Some("dev")).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DBT_IMPALA_TEST_HOST", "from-env.local");
        let out = substitute_env_vars("host = \"${DBT_IMPALA_TEST_HOST}\"");
        assert_eq!(out, "host = \"from-env.local\"");

        let untouched = substitute_env_vars("pass = \"${DBT_IMPALA_TEST_UNSET_VAR}\"");
        assert_eq!(untouched, "pass = \"${DBT_IMPALA_TEST_UNSET_VAR}\"");
    }

    #[test]
    fn test_profile_names_sorted() {
        let profiles = Profiles::from_toml_str(PROFILES).unwrap();
        assert_eq!(profiles.profile_names(), vec!["other", "warehouse"]);
    }
}
