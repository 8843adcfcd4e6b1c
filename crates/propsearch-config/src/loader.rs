//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::finish(Config::default()))
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(Self::finish(config))
    }

    fn finish(mut config: Config) -> Config {
        config.store.path = Self::expand_pathbuf(&config.store.path);
        config.logging.dir = Self::expand_pathbuf(&config.logging.dir);
        config
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "env pattern".to_string(),
            message: e.to_string(),
        })?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.propsearch`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    fn expand_pathbuf(path: &Path) -> PathBuf {
        PathBuf::from(Self::expand_path(&path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EmbeddingBackend, StoreBackend};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.search.structured_limit, 20);
    }

    #[test]
    fn test_load_search_section() {
        let content = r#"
            [search]
            max_price_tolerance = 0.2
            semantic_limit = 5
            landmark_keywords = ["lake", "temple"]
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!((config.search.max_price_tolerance - 0.2).abs() < f64::EPSILON);
        assert!((config.search.min_price_tolerance - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.search.semantic_limit, 5);
        assert_eq!(config.search.landmark_keywords, vec!["lake", "temple"]);
        assert!(config.search.proximity_keywords.contains(&"near".to_string()));
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [store]
            backend = "memory"

            [extractor]
            enabled = false
            model = "llama-3.1-8b-instant"

            [embedding]
            provider = "hash"

            [logging]
            level = "debug"
            file = false
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(!config.extractor.enabled);
        assert_eq!(config.extractor.model, "llama-3.1-8b-instant");
        assert_eq!(config.embedding.provider, EmbeddingBackend::Hash);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/propsearch.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/propsearch.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.store.path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_store_path_tilde_expanded() {
        let content = r#"
            [store]
            path = "~/data/props.db"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let path = config.store.path.to_string_lossy().to_string();
        assert!(!path.starts_with('~'));
        assert!(path.ends_with("/data/props.db"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("PROPSEARCH_TEST_CONFIG_VAR", "hf_secret");
        }
        let content = "api_key = \"${PROPSEARCH_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("hf_secret"));
        unsafe {
            std::env::remove_var("PROPSEARCH_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${PROPSEARCH_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/var/lib/propsearch";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
