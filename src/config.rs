use std::net::IpAddr;

use axum::http::HeaderValue;
use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. `None` selects the in-memory document store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<HeaderValue>,
    /// Return raw store error text to callers on 500s.
    pub expose_store_errors: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let host: IpAddr = env_or("PORTFOLIO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_HOST: {e}"))?;

        let port: u16 = env_or("PORTFOLIO_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_PORT: {e}"))?;

        let max_body_size: usize = env_or("PORTFOLIO_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = split_list(&env_or("PORTFOLIO_TRUSTED_PROXIES", ""))
            .map(|s| {
                s.parse()
                    .map_err(|e| format!("Invalid PORTFOLIO_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_origins: Vec<HeaderValue> = split_list(&env_or("PORTFOLIO_CORS_ORIGINS", ""))
            .map(|s| {
                HeaderValue::from_str(s)
                    .map_err(|e| format!("Invalid PORTFOLIO_CORS_ORIGINS entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expose_store_errors = parse_bool(&env_or("PORTFOLIO_EXPOSE_STORE_ERRORS", "true"))
            .ok_or("Invalid PORTFOLIO_EXPOSE_STORE_ERRORS: expected true or false")?;

        let log_level = env_or("PORTFOLIO_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            trusted_proxies,
            cors_origins,
            expose_store_errors,
            log_level,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.database_url.is_none());
        assert!(config.expose_store_errors);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.max_body_size, 1_048_576);
    }

    #[test]
    fn parses_lists() {
        let config = load(&[
            ("PORTFOLIO_TRUSTED_PROXIES", "10.0.0.0/8, 127.0.0.1/32"),
            ("PORTFOLIO_CORS_ORIGINS", "https://example.com,"),
            ("PORTFOLIO_EXPOSE_STORE_ERRORS", "no"),
            ("DATABASE_URL", "postgres://localhost/portfolio"),
        ])
        .unwrap();
        assert_eq!(config.trusted_proxies.len(), 2);
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static("https://example.com")]);
        assert!(!config.expose_store_errors);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/portfolio"));
    }

    #[test]
    fn rejects_bad_values() {
        let err = load(&[("PORTFOLIO_PORT", "eighty")]).unwrap_err();
        assert!(err.contains("PORTFOLIO_PORT"));

        let err = load(&[("PORTFOLIO_TRUSTED_PROXIES", "not-a-cidr")]).unwrap_err();
        assert!(err.contains("not-a-cidr"));

        let err = load(&[("PORTFOLIO_EXPOSE_STORE_ERRORS", "maybe")]).unwrap_err();
        assert!(err.contains("PORTFOLIO_EXPOSE_STORE_ERRORS"));
    }
}
