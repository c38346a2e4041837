// Resolved site settings
// Immutable per-process view of the site, built once at startup and shared by the router

use std::path::PathBuf;

use super::credential::Credential;
use super::types::Config;
use super::ConfigError;
use crate::routing::{self, ResolvedPath};

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub public_dir: PathBuf,
    pub protected_path: String,
    pub diagnostic_path: String,
    pub credential: Credential,
    pub max_body_size: u64,
}

impl SiteSettings {
    /// Fails when a configured route path cannot be resolved, since such a
    /// route would never match any request
    pub fn from_config(
        config: &Config,
        public_dir: PathBuf,
        credential: Credential,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            public_dir,
            protected_path: normalize_route_path("site.protected_path", &config.site.protected_path)?,
            diagnostic_path: normalize_route_path("site.diagnostic_path", &config.site.diagnostic_path)?,
            credential,
            max_body_size: config.http.max_body_size,
        })
    }

    /// Absolute location of a resolved path under the public directory
    pub fn file_path(&self, path: &ResolvedPath) -> PathBuf {
        self.public_dir.join(path.relative())
    }
}

/// Run configured paths through the same resolver as requests so that
/// `fall2024.html` and `/fall2024.html` mean the same route
fn normalize_route_path(key: &'static str, path: &str) -> Result<String, ConfigError> {
    routing::resolve(path)
        .map(|resolved| resolved.as_str().to_string())
        .map_err(|source| ConfigError::InvalidRoutePath {
            key,
            path: path.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_normalized() {
        let mut config = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        config.site.protected_path = "fall2024.html".to_string();
        config.site.diagnostic_path = "/checks/./do-test".to_string();

        let site =
            SiteSettings::from_config(&config, "/srv/public".into(), Credential::new("x")).unwrap();
        assert_eq!(site.protected_path, "/fall2024.html");
        assert_eq!(site.diagnostic_path, "/checks/do-test");
    }

    #[test]
    fn test_unresolvable_protected_path_rejected() {
        let mut config = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        config.site.protected_path = "/../fall2024.html".to_string();

        let err = SiteSettings::from_config(&config, "/srv/public".into(), Credential::new("x"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRoutePath { key: "site.protected_path", .. }
        ));
    }

    #[test]
    fn test_unresolvable_diagnostic_path_rejected() {
        let mut config = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        config.site.diagnostic_path = "/do-test%00".to_string();

        let err = SiteSettings::from_config(&config, "/srv/public".into(), Credential::new("x"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRoutePath { key: "site.diagnostic_path", .. }
        ));
    }

    #[test]
    fn test_file_path_joins_under_public_dir() {
        let config = Config::load_from("does-not-exist/pagegate-test-config").unwrap();
        let site =
            SiteSettings::from_config(&config, "/srv/public".into(), Credential::new("x")).unwrap();
        let path = routing::resolve("/styles/main.css").unwrap();
        assert_eq!(site.file_path(&path), PathBuf::from("/srv/public/styles/main.css"));
    }
}
