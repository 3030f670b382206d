use clap::Parser;
use dbt_impala::config::cli::profiles_path;
use dbt_impala::config::Command;
use dbt_impala::utils::error::AdapterError;
use dbt_impala::utils::logger;
use dbt_impala::{CliConfig, Profiles};

fn run_debug(
    profiles_dir: &std::path::Path,
    profile: &str,
    target: Option<&str>,
) -> Result<(), AdapterError> {
    let profiles = Profiles::from_file(profiles_path(profiles_dir))?;
    let target = profiles.target(profile, target)?;
    let credentials = &target.credentials;

    println!("Connection:");
    for (key, value) in credentials.connection_info() {
        println!("  {}: {}", key, value);
    }
    println!("  type: {}", credentials.adapter_type());
    println!("  threads: {}", target.threads);
    Ok(())
}

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = match &config.command {
        Command::Debug {
            profiles_dir,
            profile,
            target,
        } => run_debug(profiles_dir, profile, target.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ dbt-impala failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    println!("✅ All checks passed!");
}
