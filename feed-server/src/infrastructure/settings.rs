use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) static_dir: String,
    pub(crate) seed_demo_posts: bool,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins =
            parse_cors_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string()));
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string());
        let seed_demo_posts = parse_bool(&lookup, "SEED_DEMO_POSTS", true)?;
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            http_addr,
            cors_origins,
            log_level,
            static_dir,
            seed_demo_posts,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
    }
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Settings, parse_cors_origins};

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let settings = settings_from(&[]).expect("defaults must be valid");

        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.cors_origins, ["*"]);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.static_dir, "static");
        assert!(settings.seed_demo_posts);
        assert_eq!(settings.http_request_body_limit_bytes, 1024 * 1024);
        assert_eq!(settings.http_concurrency_limit, 256);
        assert_eq!(settings.http_request_timeout_secs, 10);
    }

    #[test]
    fn log_level_prefers_log_level_over_rust_log() {
        let settings = settings_from(&[("LOG_LEVEL", "debug"), ("RUST_LOG", "warn")])
            .expect("must be valid");
        assert_eq!(settings.log_level, "debug");

        let settings = settings_from(&[("RUST_LOG", "warn")]).expect("must be valid");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn seed_flag_is_parsed() {
        let settings = settings_from(&[("SEED_DEMO_POSTS", "false")]).expect("must be valid");
        assert!(!settings.seed_demo_posts);

        assert!(settings_from(&[("SEED_DEMO_POSTS", "maybe")]).is_err());
    }

    #[test]
    fn zero_or_garbage_limits_are_rejected() {
        assert!(settings_from(&[("HTTP_CONCURRENCY_LIMIT", "0")]).is_err());
        assert!(settings_from(&[("HTTP_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings_from(&[("HTTP_REQUEST_BODY_LIMIT_BYTES", "-1")]).is_err());
    }

    #[test]
    fn cors_origins_are_trimmed_and_split() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test");
        assert_eq!(origins, ["http://a.test", "http://b.test"]);
    }
}
