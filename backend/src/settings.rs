//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `GAMER_SOCIETY_*` environment variables, a config file or
//! command-line flags, in the usual OrthoConfig precedence.

use std::ffi::OsString;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("failed to load settings: {message}")]
    Load { message: String },
}

/// Server settings.
///
/// No `Debug` derive: `api_key` must never reach a log line.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GAMER_SOCIETY")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Shared secret expected in the `access_token` header.
    pub api_key: Option<String>,
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// Comma-separated origins allowed by CORS.
    pub allowed_origins: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Load settings from `args` (program name first) layered over the
    /// environment and any config file.
    pub fn from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::Missing("database_url"))
    }

    pub fn api_key(&self) -> Result<&str, SettingsError> {
        self.api_key
            .as_deref()
            .ok_or(SettingsError::Missing("api_key"))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 6] = [
        "GAMER_SOCIETY_DATABASE_URL",
        "GAMER_SOCIETY_API_KEY",
        "GAMER_SOCIETY_BIND_ADDR",
        "GAMER_SOCIETY_ALLOWED_ORIGINS",
        "GAMER_SOCIETY_POOL_MAX_SIZE",
        "GAMER_SOCIETY_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("gamer-society")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::Missing("database_url"))
        );
        assert_eq!(settings.api_key(), Err(SettingsError::Missing("api_key")));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert!(settings.allowed_origins().is_empty());
        assert_eq!(settings.pool_max_size(), 10);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "GAMER_SOCIETY_DATABASE_URL",
                Some("postgres://gamer@db/society".to_owned()),
            ),
            ("GAMER_SOCIETY_API_KEY", Some("hunter2".to_owned())),
            ("GAMER_SOCIETY_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "GAMER_SOCIETY_ALLOWED_ORIGINS",
                Some("https://a.example, https://b.example,".to_owned()),
            ),
            ("GAMER_SOCIETY_POOL_MAX_SIZE", Some("3".to_owned())),
            ("GAMER_SOCIETY_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), Ok("postgres://gamer@db/society"));
        assert_eq!(settings.api_key(), Ok("hunter2"));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        assert_eq!(
            settings.allowed_origins(),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.pool_max_size(), 3);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "GAMER_SOCIETY_BIND_ADDR").then(|| "nowhere".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { ref value, .. }) if value == "nowhere"
        ));
    }

    #[rstest]
    fn from_args_reads_the_environment() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "GAMER_SOCIETY_DATABASE_URL")
                .then(|| "postgres://env@db/society".to_owned());
            (name, value)
        }));

        let settings =
            AppSettings::from_args([OsString::from("gamer-society")]).expect("settings load");
        assert_eq!(settings.database_url(), Ok("postgres://env@db/society"));
    }

    #[rstest]
    fn unreadable_values_surface_as_load_errors() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "GAMER_SOCIETY_POOL_MAX_SIZE").then(|| "lots".to_owned());
            (name, value)
        }));

        let result = AppSettings::from_args([OsString::from("gamer-society")]);
        assert!(matches!(result, Err(SettingsError::Load { .. })));
    }
}
