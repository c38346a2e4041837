// Configuration module entry point
// Loads layered configuration, the shared credential and the public directory

mod credential;
mod discovery;
mod site;
mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

// Re-export public types
pub use credential::{load_credential, resolve_credential, Credential, CredentialSource, DEFAULT_PASSWORD};
pub use discovery::find_public_dir;
pub use site::SiteSettings;
pub use state::AppState;
pub use types::{
    AuthConfig, Config, HttpConfig, LoggingConfig, MissingCredentialPolicy, PerformanceConfig,
    ServerConfig, SiteConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `PAGEGATE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PAGEGATE";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid route path for {key} '{path}': {source}")]
    InvalidRoutePath {
        key: &'static str,
        path: String,
        #[source]
        source: crate::routing::PathError,
    },

    #[error("password environment variable '{0}' is not set and auth.on_missing = \"refuse\"")]
    MissingCredential(String),

    #[error("no public directory found, tried: {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    PublicDirNotFound(Vec<PathBuf>),

    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; environment variables prefixed with
    /// [`ENV_PREFIX`] override it, and built-in defaults fill the rest.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default(
                "site.public_dir_candidates",
                vec!["public", "../public", "app/public"],
            )?
            .set_default("site.protected_path", "/fall2024.html")?
            .set_default("site.diagnostic_path", "/do-test")?
            .set_default("auth.password_env", "PAGE_PASSWORD")?
            .set_default("auth.on_missing", "refuse")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 65_536)? // 64KB, plenty for a password form
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        assert_eq!(cfg.site.protected_path, "/fall2024.html");
        assert_eq!(cfg.site.diagnostic_path, "/do-test");
        assert_eq!(cfg.auth.on_missing, MissingCredentialPolicy::Refuse);
        assert_eq!(cfg.site.public_dir_candidates[0], "public");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9100

[site]
protected_path = "/members.html"

[auth]
on_missing = "default"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.with_extension("").to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.site.protected_path, "/members.html");
        assert_eq!(cfg.site.diagnostic_path, "/do-test");
        assert_eq!(cfg.auth.on_missing, MissingCredentialPolicy::Default);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        cfg.server.host = "0.0.0.0".to_string();
        cfg.server.port = 8080;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);

        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }
}
