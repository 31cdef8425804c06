use thiserror::Error;

use crate::auth::JwtConfig;

/// Configuration loading errors. Any of these stops the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in {0} environment")]
    MissingSecret(String),

    #[error("JWT_SECRET must be at least {min} characters long (got {len})")]
    WeakSecret { len: usize, min: usize },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | ENVIRONMENT | production | only a literal `development` allows an ephemeral secret and plain cookies |
/// | HTTP_PORT | 3000 | |
/// | DATABASE_URL | sqlite:staffdesk.db | |
/// | JWT_SECRET | (none) | required outside development, at least 32 characters |
/// | JWT_EXPIRATION_MINUTES | 1440 | session lifetime, also the cookie max-age |
/// | JWT_ISSUER | staffdesk | |
/// | JWT_AUDIENCE | staffdesk-web | |
/// | DEFAULT_DEPARTMENT_CODE | HR | department assigned on self-signup |
/// | EMPLOYEE_CODE_PREFIX | EMP | prefix of generated employee codes |
/// | LOG_LEVEL | info | |
/// | LOG_JSON | false | |
/// | LOG_DIR | (none) | enables daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub default_department_code: String,
    pub employee_code_prefix: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unset means production: the ephemeral secret must be opted into
        let environment = lookup("ENVIRONMENT")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "production".into());

        Ok(Self {
            http_port: parse_or(&lookup, "HTTP_PORT", 3000)?,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:staffdesk.db".into()),
            jwt: JwtConfig::from_lookup(&lookup, &environment)?,
            default_department_code: lookup("DEFAULT_DEPARTMENT_CODE")
                .unwrap_or_else(|| "HR".into()),
            employee_code_prefix: lookup("EMPLOYEE_CODE_PREFIX").unwrap_or_else(|| "EMP".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_or(&lookup, "LOG_JSON", false)?,
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Cookies carry `Secure` outside development
    pub fn secure_cookies(&self) -> bool {
        !self.is_development()
    }

    /// Session cookie max-age, kept equal to the token lifetime
    pub fn session_max_age_secs(&self) -> i64 {
        self.jwt.expiration_minutes * 60
    }
}

/// Parse an optional variable, falling back to `default` when unset
pub(crate) fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        _ => Ok(default),
    }
}
