//! Configuration loading for the payroll service.
//!
//! Settings are read from a YAML file and can be overridden from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_service::config::SettingsLoader;
//!
//! let settings = SettingsLoader::from_env().unwrap().into_settings();
//! println!("Starting {}", settings.app_name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, SettingsLoader};
pub use types::{DEFAULT_DATABASE_URL, RecordPolicy, ServerConfig, Settings};
