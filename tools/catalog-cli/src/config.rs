//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "CATALOG_API_BASE_URL";

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Token storage settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply a base URL given on the command line or in the environment.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }

    /// Where the bearer token is stored.
    pub fn token_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.auth.token_path {
            return Ok(PathBuf::from(path));
        }

        match dirs::data_dir() {
            Some(dir) => Ok(dir.join("catalog-cli").join("token.json")),
            None => bail!("No data directory available; set auth.token_path in catalog.toml"),
        }
    }

    /// Check the config, returning (errors, warnings).
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            errors.push("api.base_url is required".to_string());
        } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            errors.push(format!("api.base_url '{}' must be an http(s) URL", base_url));
        } else if !base_url.trim_end_matches('/').ends_with("/api") {
            warnings.push(format!(
                "api.base_url '{}' does not end with /api; product paths are appended directly",
                base_url
            ));
        }

        if let Some(ref path) = self.auth.token_path {
            if path.trim().is_empty() {
                errors.push("auth.token_path must not be empty".to_string());
            }
        }

        (errors, warnings)
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Token storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token file; defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<String>,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default catalog.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Product catalog CLI configuration

[api]
# Overridden by --api-url or {env}
base_url = "{base_url}"

[auth]
# token_path = "/path/to/token.json"
"#,
        env = BASE_URL_ENV,
        base_url = default_base_url()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert!(config.auth.token_path.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_override_wins() {
        let config = CliConfig::default()
            .with_base_url_override(Some("https://shop.example/api".to_string()));
        assert_eq!(config.api.base_url, "https://shop.example/api");

        let unchanged = CliConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(unchanged.api.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_save_and_load_toml_and_json() {
        let dir = TempDir::new().unwrap();
        let mut config = CliConfig::default();
        config.api.base_url = "http://10.0.0.2:5000/api".to_string();
        config.auth.token_path = Some("/tmp/tok.json".to_string());

        for name in ["catalog.toml", "catalog.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            let loaded = CliConfig::load(&path).unwrap();
            assert_eq!(loaded.api.base_url, "http://10.0.0.2:5000/api");
            assert_eq!(loaded.token_path().unwrap(), PathBuf::from("/tmp/tok.json"));
        }
    }

    #[test]
    fn test_check_flags_bad_values() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:5000".to_string();
        let (errors, _) = config.check();
        assert_eq!(errors.len(), 1);

        config.api.base_url = "http://localhost:5000".to_string();
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
