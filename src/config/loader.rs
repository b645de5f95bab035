//! Settings loading.
//!
//! This module provides the [`SettingsLoader`] type, which reads service
//! settings from a YAML file and layers environment variable overrides on top.

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{ServiceError, ServiceResult};

use super::types::Settings;

/// Environment variable naming the YAML settings file.
pub const CONFIG_PATH_ENV: &str = "PAYROLL_CONFIG";

/// Loads and provides access to service settings.
///
/// Settings come from, in increasing priority:
/// 1. Built-in defaults
/// 2. The YAML file named by `PAYROLL_CONFIG` (if set)
/// 3. The environment variables `APP_NAME`, `ENV`, `DEBUG`, `HOST`, `PORT`
///    and `DATABASE_URL`
///
/// # Example
///
/// ```no_run
/// use payroll_service::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/settings.yaml")?;
/// println!("Serving {} on {}", loader.settings().app_name, loader.settings().server.bind_address());
/// # Ok::<(), payroll_service::error::ServiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: Settings,
}

impl SettingsLoader {
    /// Loads settings from a YAML file, without environment overrides.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid settings YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> ServiceResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ServiceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings =
            serde_yaml::from_str(&content).map_err(|e| ServiceError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { settings })
    }

    /// Loads settings from the process environment.
    pub fn from_env() -> ServiceResult<Self> {
        let base = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::with_settings(Settings::default()),
        };
        base.with_overrides(|key| env::var(key).ok())
    }

    /// Wraps already-built settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Applies overrides looked up by variable name.
    ///
    /// `DEBUG` is true only for `"True"` or `"true"`; a `PORT` that is not a
    /// valid port number is a `ConfigParseError`.
    pub fn with_overrides<F>(mut self, lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_name) = lookup("APP_NAME") {
            self.settings.app_name = app_name;
        }
        if let Some(environment) = lookup("ENV") {
            self.settings.environment = environment;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.settings.debug = matches!(debug.as_str(), "True" | "true");
        }
        if let Some(host) = lookup("HOST") {
            self.settings.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.settings.server.port =
                port.parse().map_err(|e| ServiceError::ConfigParseError {
                    path: "PORT".to_string(),
                    message: format!("invalid port '{}': {}", port, e),
                })?;
        }
        if let Some(database_url) = lookup("DATABASE_URL") {
            self.settings.database_url = database_url;
        }
        Ok(self)
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_path() -> &'static str {
        "./config/settings.yaml"
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_load_valid_settings() {
        let result = SettingsLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load settings: {:?}", result.err());

        let settings = result.unwrap().into_settings();
        assert_eq!(settings.app_name, "Salary Management API");
        assert_eq!(settings.server.port, 8000);
        assert!(settings.records.enforce_employee_reference);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = SettingsLoader::load("/nonexistent/settings.yaml");

        match result {
            Err(ServiceError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = env::temp_dir().join(format!("payroll-bad-{}.yaml", std::process::id()));
        fs::write(&path, "server: [not, a, mapping").unwrap();

        let result = SettingsLoader::load(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ServiceError::ConfigParseError { .. })));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let loader = SettingsLoader::with_settings(Settings::default())
            .with_overrides(lookup_from(&[
                ("APP_NAME", "Payroll"),
                ("ENV", "production"),
                ("DEBUG", "True"),
                ("HOST", "127.0.0.1"),
                ("PORT", "3000"),
                ("DATABASE_URL", "sqlite:////var/lib/payroll.db"),
            ]))
            .unwrap();

        let settings = loader.settings();
        assert_eq!(settings.app_name, "Payroll");
        assert_eq!(settings.environment, "production");
        assert!(settings.debug);
        assert_eq!(settings.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(settings.database_url, "sqlite:////var/lib/payroll.db");
    }

    #[test]
    fn test_no_overrides_keeps_settings() {
        let loader = SettingsLoader::with_settings(Settings::default())
            .with_overrides(lookup_from(&[]))
            .unwrap();
        assert_eq!(loader.settings(), &Settings::default());
    }

    #[test]
    fn test_debug_accepts_lowercase_true() {
        let loader = SettingsLoader::with_settings(Settings::default())
            .with_overrides(lookup_from(&[("DEBUG", "true")]))
            .unwrap();
        assert!(loader.settings().debug);
    }

    #[test]
    fn test_debug_false_for_other_values() {
        for value in ["1", "TRUE", "tRuE", "yes", ""] {
            let loader = SettingsLoader::with_settings(Settings::default())
                .with_overrides(lookup_from(&[("DEBUG", value)]))
                .unwrap();
            assert!(!loader.settings().debug, "DEBUG={:?} enabled debug", value);
        }
    }

    #[test]
    fn test_invalid_port_returns_parse_error() {
        let result = SettingsLoader::with_settings(Settings::default())
            .with_overrides(lookup_from(&[("PORT", "eighty")]));

        match result {
            Err(ServiceError::ConfigParseError { path, message }) => {
                assert_eq!(path, "PORT");
                assert!(message.contains("eighty"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }
}
