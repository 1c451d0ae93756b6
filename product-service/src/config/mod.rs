use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub mongodb: MongoConfig,
    pub storage: StorageBackend,
    /// Base URL advertised on the landing page and in the OpenAPI servers list.
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Mongodb,
    Memory,
}

impl ProductConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Layers the service variables over `common`, reading each through `lookup`.
    pub fn from_lookup<F>(mut common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");

        if let Some(port) = lookup("PORT") {
            common.port = port.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid PORT {}: {}", port, e))
            })?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            common.log_level = level;
        }
        if let Some(endpoint) = lookup("OTLP_ENDPOINT") {
            common.otlp_endpoint = Some(endpoint);
        }

        let storage: StorageBackend = get_env(&lookup, "STORAGE_BACKEND", Some("mongodb"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The in-memory backend never dials out, so no URI is needed.
        let uri = match storage {
            StorageBackend::Mongodb => get_env(&lookup, "MONGODB_URI", None, is_prod)?,
            StorageBackend::Memory => lookup("MONGODB_URI").unwrap_or_default(),
        };

        let database = match lookup("DB_NAME") {
            Some(name) => name,
            None => get_env(&lookup, "MONGODB_DATABASE", Some("products_db"), is_prod)?,
        };

        let public_url = get_env(
            &lookup,
            "PUBLIC_URL",
            Some(&format!("http://localhost:{}", common.port)),
            is_prod,
        )?;

        Ok(ProductConfig {
            common,
            service_name: "product-service".to_string(),
            mongodb: MongoConfig { uri, database },
            storage,
            public_url,
        })
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::Mongodb),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

fn get_env<F>(
    lookup: &F,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_storage_backends() {
        assert_eq!(
            "mongodb".parse::<StorageBackend>(),
            Ok(StorageBackend::Mongodb)
        );
        assert_eq!("Mongo".parse::<StorageBackend>(), Ok(StorageBackend::Mongodb));
        assert_eq!("MEMORY".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    fn from_vars(vars: &[(&str, &str)]) -> Result<ProductConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProductConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    fn unset(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env(&unset, "ANY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env(&unset, "ANY", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        assert!(get_env(&unset, "ANY", None, false).is_err());
    }

    #[test]
    fn mongodb_backend_needs_a_uri() {
        let err = from_vars(&[]).unwrap_err();
        assert!(err.to_string().contains("MONGODB_URI"));
    }

    #[test]
    fn defaults_with_only_a_uri() {
        let config = from_vars(&[("MONGODB_URI", "mongodb://db:27017")]).unwrap();

        assert_eq!(config.storage, StorageBackend::Mongodb);
        assert_eq!(config.mongodb.uri, "mongodb://db:27017");
        assert_eq!(config.mongodb.database, "products_db");
        assert_eq!(config.common.port, 8080);
        assert_eq!(config.public_url, "http://localhost:8080");
    }

    #[test]
    fn port_override_feeds_default_public_url() {
        let config = from_vars(&[("MONGODB_URI", "mongodb://db"), ("PORT", "4000")]).unwrap();

        assert_eq!(config.common.port, 4000);
        assert_eq!(config.public_url, "http://localhost:4000");
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = from_vars(&[("MONGODB_URI", "mongodb://db"), ("PORT", "four")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn explicit_public_url_wins() {
        let config = from_vars(&[
            ("MONGODB_URI", "mongodb://db"),
            ("PORT", "4000"),
            ("PUBLIC_URL", "https://shop.example.com"),
        ])
        .unwrap();

        assert_eq!(config.public_url, "https://shop.example.com");
    }

    #[test]
    fn database_name_prefers_db_name_then_mongodb_database() {
        let config = from_vars(&[
            ("MONGODB_URI", "mongodb://db"),
            ("DB_NAME", "shop"),
            ("MONGODB_DATABASE", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.mongodb.database, "shop");

        let config = from_vars(&[
            ("MONGODB_URI", "mongodb://db"),
            ("MONGODB_DATABASE", "catalog"),
        ])
        .unwrap();
        assert_eq!(config.mongodb.database, "catalog");
    }

    #[test]
    fn memory_backend_runs_without_a_uri() {
        let config = from_vars(&[("STORAGE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.mongodb.uri, "");
    }

    #[test]
    fn prod_requires_explicit_values() {
        let err = from_vars(&[
            ("ENVIRONMENT", "prod"),
            ("MONGODB_URI", "mongodb://db"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }
}
