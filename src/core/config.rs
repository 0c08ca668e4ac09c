//! Configuration management for the pgurl command line tool
//!
//! Settings come from environment variables and can be overridden by
//! command line arguments. Everything is validated before use.

use super::{UrlError, UrlResult};
use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(UrlError::config(format!(
                "PGURL_OUTPUT must be one of: 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Values given on the command line; they take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub output: Option<OutputFormat>,
    pub split: bool,
}

/// Validated settings for one pgurl invocation
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub output: OutputFormat,
    pub split: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: connection URI, required unless given on the command line
    /// - `PGURL_OUTPUT`: `text` or `json` (default: `text`)
    pub fn from_env(overrides: Overrides) -> UrlResult<Self> {
        Self::from_lookup(|key| env::var(key).ok(), overrides)
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F, overrides: Overrides) -> UrlResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match overrides.database_url {
            Some(url) => url,
            None => lookup("DATABASE_URL").ok_or_else(|| {
                UrlError::config("Missing URL argument or DATABASE_URL environment variable")
            })?,
        };

        let output = match overrides.output {
            Some(format) => format,
            None => lookup("PGURL_OUTPUT")
                .map(|value| value.parse::<OutputFormat>())
                .transpose()?
                .unwrap_or_default(),
        };

        Self::validate_and_create(database_url, output, overrides.split)
    }

    fn validate_and_create(
        database_url: String,
        output: OutputFormat,
        split: bool,
    ) -> UrlResult<Self> {
        if database_url.trim().is_empty() {
            return Err(UrlError::config("DATABASE_URL cannot be empty"));
        }

        Ok(Self {
            database_url,
            output,
            split,
        })
    }

    pub fn uses_json(&self) -> bool {
        self.output == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_missing_database_url() {
        let result = AppConfig::from_lookup(lookup_from(&[]), Overrides::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_config_with_database_url_from_env() {
        let config = AppConfig::from_lookup(
            lookup_from(&[("DATABASE_URL", "postgres://localhost/test")]),
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/test");
        assert_eq!(config.output, OutputFormat::Text);
        assert!(!config.split);
    }

    #[test]
    fn test_config_argument_overrides_env() {
        let config = AppConfig::from_lookup(
            lookup_from(&[
                ("DATABASE_URL", "postgres://from-env/db"),
                ("PGURL_OUTPUT", "text"),
            ]),
            Overrides {
                database_url: Some("postgres://from-arg/db".to_string()),
                output: Some(OutputFormat::Json),
                split: true,
            },
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://from-arg/db");
        assert!(config.uses_json());
        assert!(config.split);
    }

    #[test]
    fn test_config_output_from_env() {
        let config = AppConfig::from_lookup(
            lookup_from(&[("DATABASE_URL", "postgres://h"), ("PGURL_OUTPUT", "JSON")]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_config_rejects_unknown_output() {
        let result = AppConfig::from_lookup(
            lookup_from(&[("DATABASE_URL", "postgres://h"), ("PGURL_OUTPUT", "yaml")]),
            Overrides::default(),
        );
        assert!(result.unwrap_err().to_string().contains("PGURL_OUTPUT"));
    }

    #[test]
    fn test_config_rejects_blank_url() {
        let result = AppConfig::from_lookup(
            lookup_from(&[("DATABASE_URL", "   ")]),
            Overrides::default(),
        );
        assert!(result.is_err());
    }
}
