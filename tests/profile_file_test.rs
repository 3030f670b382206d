use anyhow::Result;
use dbt_impala::{AdapterError, Profiles};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_profiles(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_profile_from_file_with_env_password() -> Result<()> {
    std::env::set_var("DBT_IMPALA_IT_PASSWORD", "hunter2");

    let file = write_profiles(
        r#"
[jaffle_shop]
target = "dev"

[jaffle_shop.outputs.dev]
type = "impala"
host = "coordinator.impala.internal"
port = 21051
user = "dbt"
pass = "${DBT_IMPALA_IT_PASSWORD}"
schema = "jaffle_shop"
dbname = "jaffle_shop"
threads = 2
"#,
    )?;

    let profiles = Profiles::from_file(file.path())?;
    let target = profiles.target("jaffle_shop", None)?;

    assert_eq!(target.profile_name, "jaffle_shop");
    assert_eq!(target.threads, 2);
    assert_eq!(target.credentials.port(), 21051);
    assert_eq!(target.credentials.password(), Some("hunter2"));
    assert_eq!(target.credentials.username(), Some("dbt"));

    let printed: Vec<String> = target
        .credentials
        .connection_info()
        .into_iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect();
    assert_eq!(
        printed,
        vec![
            "host: coordinator.impala.internal",
            "port: 21051",
            "database: jaffle_shop",
            "schema: jaffle_shop",
            "username: dbt",
        ]
    );
    Ok(())
}

#[test]
fn test_unknown_credential_field_is_rejected() -> Result<()> {
    let file = write_profiles(
        r#"
[p]
target = "dev"

[p.outputs.dev]
type = "impala"
host = "impala.local"
schema = "s"
database = "d"
warehouse = "not-an-impala-setting"
"#,
    )?;

    let profiles = Profiles::from_file(file.path())?;
    let err = profiles.target("p", None).unwrap_err();
    assert!(matches!(err, AdapterError::ConfigValidationError { .. }));
    Ok(())
}

#[test]
fn test_invalid_host_fails_validation() -> Result<()> {
    let profiles = Profiles::from_toml_str(
        r#"
[p.outputs.dev]
type = "impala"
host = "not a host"
schema = "s"
database = "d"
"#,
    )?;

    let err = profiles.target("p", Some("dev")).unwrap_err();
    assert!(matches!(err, AdapterError::InvalidConfigValueError { .. }));
    Ok(())
}

#[test]
fn test_missing_file() {
    let err = Profiles::from_file("/nonexistent/profiles.toml").unwrap_err();
    assert!(matches!(err, AdapterError::IoError(_)));
}

#[test]
fn test_malformed_toml() {
    let err = Profiles::from_toml_str("[p\nhost = ").unwrap_err();
    assert!(matches!(err, AdapterError::ConfigValidationError { .. }));
}
