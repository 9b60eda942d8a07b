use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_TTL_MINUTES: i64 = 60 * 24 * 7;
/// One year. Keeps `exp` far inside the representable timestamp range.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// `None` means any origin is accepted.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub http: HttpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "reelreview".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "reelreview-users".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref())?,
        };
        let raw_origin =
            std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".into());
        let http = HttpConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(5001),
            cors_origin: clean_cors_origin(&raw_origin),
        };
        Ok(Self {
            database_url,
            jwt,
            http,
        })
    }
}

/// Token lifetime in minutes; unset means [`DEFAULT_TTL_MINUTES`].
pub fn parse_ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TTL_MINUTES);
    };
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_MINUTES is not a number: {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

/// Normalizes a configured CORS origin: trims it, collapses a doubled scheme
/// (`https://http://host`) and drops a trailing slash. `*` and blank map to `None`.
pub fn clean_cors_origin(raw: &str) -> Option<String> {
    let mut origin = raw.trim();
    if origin.is_empty() || origin == "*" {
        return None;
    }

    let mut owned = String::new();
    for outer in ["https://", "http://"] {
        if let Some(rest) = origin.strip_prefix(outer) {
            if rest.starts_with("http://") || rest.starts_with("https://") {
                owned = rest.to_string();
            }
        }
    }
    if !owned.is_empty() {
        origin = &owned;
    }

    Some(origin.trim_end_matches('/').to_string())
}
