//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `inventory_core` linkage.
//! - Optionally install the schema into a store and print per-table counts.
//!
//! Usage: `inventory_cli [DB_PATH]`. Without an argument the store is taken
//! from `INVENTORY_DB_PATH` when set. Any other configuration error fails the
//! run.

use inventory_core::config::ENV_DB_PATH;
use inventory_core::{
    init_logging_from_config, install_schema, AppConfig, ConfigError, ConnectionProvider,
    InventoryService, Repository, StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("inventory_core ping={}", inventory_core::ping());
    println!("inventory_core version={}", inventory_core::core_version());

    let config = match resolve_config(std::env::args().nth(1), |key| std::env::var(key).ok()) {
        Ok(Some(config)) => config,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match report(config.store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_report module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Picks the store from the path argument or the environment.
///
/// `Ok(None)` means no store was named at all; the run stops after the
/// linkage probe.
fn resolve_config<F>(path_arg: Option<String>, lookup: F) -> Result<Option<AppConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = path_arg {
        return Ok(Some(AppConfig {
            store: StoreConfig::new(path),
            log_level: None,
            log_dir: None,
        }));
    }

    match AppConfig::from_lookup(lookup) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::MissingKey(key)) if key == ENV_DB_PATH => Ok(None),
        Err(err) => Err(err),
    }
}

fn report(store: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = ConnectionProvider::new(store);
    install_schema(&provider)?;
    println!("store={}", provider.database_path().display());

    let service = InventoryService::new(provider);
    println!("categories={}", service.categories().get_all()?.len());
    println!("providers={}", service.providers().get_all()?.len());
    println!("computers={}", service.computers().get_all()?.len());
    println!("movements={}", service.movements().get_all()?.len());
    println!("users={}", service.users().get_all()?.len());
    log::info!("event=cli_report module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_config;
    use inventory_core::config::{ENV_BUSY_TIMEOUT_MS, ENV_DB_PATH};
    use inventory_core::ConfigError;
    use std::path::PathBuf;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn path_argument_wins_over_environment() {
        let config = resolve_config(Some("/tmp/arg.db".to_string()), env(&[(ENV_DB_PATH, "/x")]))
            .unwrap()
            .unwrap();
        assert_eq!(config.store.database_path, PathBuf::from("/tmp/arg.db"));
    }

    #[test]
    fn missing_database_path_skips_the_report() {
        assert!(resolve_config(None, env(&[])).unwrap().is_none());
    }

    #[test]
    fn invalid_busy_timeout_is_an_error() {
        let err = resolve_config(
            None,
            env(&[(ENV_DB_PATH, "/x"), (ENV_BUSY_TIMEOUT_MS, "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_BUSY_TIMEOUT_MS));
    }

    #[test]
    fn environment_path_is_used_without_argument() {
        let config = resolve_config(None, env(&[(ENV_DB_PATH, "/tmp/env.db")]))
            .unwrap()
            .unwrap();
        assert_eq!(config.store.database_path, PathBuf::from("/tmp/env.db"));
    }
}
