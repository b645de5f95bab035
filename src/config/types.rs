//! Configuration types for the payroll service.
//!
//! These types map onto the YAML settings file. Every section and field has
//! a default, so a partial file (or no file at all) is valid.

use serde::{Deserialize, Serialize};

/// Database used when neither the settings file nor `DATABASE_URL` names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///database.db";

/// Top-level service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Human-readable application name, logged at startup.
    pub app_name: String,
    /// Deployment environment (e.g., "development", "production").
    pub environment: String,
    /// Enables debug-level logging.
    pub debug: bool,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Rules applied when salary records are created.
    pub records: RecordPolicy,
    /// Where employees and salary records are stored.
    ///
    /// `sqlite:///relative.db` and `sqlite:////absolute/path.db` open a
    /// database file; `sqlite://` and `sqlite:///:memory:` open a private
    /// in-memory database; `memory://` selects the lock-based in-process store.
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Salary Management API".to_string(),
            environment: "development".to_string(),
            debug: false,
            server: ServerConfig::default(),
            records: RecordPolicy::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rules applied when salary records are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordPolicy {
    /// Reject records whose employee id does not exist.
    pub enforce_employee_reference: bool,
    /// Reject records whose period end is not after its start.
    pub validate_period: bool,
}

impl Default for RecordPolicy {
    fn default() -> Self {
        Self {
            enforce_employee_reference: true,
            validate_period: true,
        }
    }
}

impl RecordPolicy {
    /// A policy that stores whatever it is given, as long as the pay
    /// parameters themselves are valid.
    pub fn permissive() -> Self {
        Self {
            enforce_employee_reference: false,
            validate_period: false,
        }
    }
}
