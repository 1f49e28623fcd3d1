use std::env;

pub const DEFAULT_SMS_CODE: &str = "1234";
pub const DEFAULT_EMAIL_CODE: &str = "5555";

/// Which table store the service mirrors to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Hosted table API, selected by `TABLE_STORE_URL` + `TABLE_STORE_KEY`.
    Rest { url: String, key: String },
    /// Direct database connection, selected by `DATABASE_URL`.
    Postgres { database_url: String },
    /// No credentials: in-memory demo data only.
    Mock,
}

impl BackendConfig {
    pub fn label(&self) -> &'static str {
        match self {
            BackendConfig::Rest { .. } => "rest",
            BackendConfig::Postgres { .. } => "postgres",
            BackendConfig::Mock => "mock",
        }
    }
}

/// Test codes accepted by the phone and email verification steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCodes {
    pub sms: String,
    pub email: String,
}

impl Default for VerificationCodes {
    fn default() -> Self {
        Self {
            sms: DEFAULT_SMS_CODE.to_string(),
            email: DEFAULT_EMAIL_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub backend: BackendConfig,
    pub verification: VerificationCodes,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match get("APP_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("APP_PORT must be a port number: {e}"))?,
            None => 3000,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET is not set; sessions will not survive a restart");
                uuid::Uuid::new_v4().to_string()
            }
        };

        let backend = match (get("TABLE_STORE_URL"), get("TABLE_STORE_KEY"), get("DATABASE_URL")) {
            (Some(url), Some(key), _) => BackendConfig::Rest { url, key },
            (Some(_), None, _) | (None, Some(_), _) => {
                anyhow::bail!("TABLE_STORE_URL and TABLE_STORE_KEY must be set together")
            }
            (None, None, Some(database_url)) => BackendConfig::Postgres { database_url },
            (None, None, None) => BackendConfig::Mock,
        };

        let defaults = VerificationCodes::default();
        let verification = VerificationCodes {
            sms: get("SMS_TEST_CODE").unwrap_or(defaults.sms),
            email: get("EMAIL_TEST_CODE").unwrap_or(defaults.email),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            backend,
            verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn no_credentials_means_mock_mode() {
        let cfg = config(&[("JWT_SECRET", "s"), ("TABLE_STORE_URL", "  ")]).unwrap();
        assert_eq!(cfg.backend, BackendConfig::Mock);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.verification, VerificationCodes::default());
    }

    #[test]
    fn rest_credentials_win_over_database_url() {
        let cfg = config(&[
            ("TABLE_STORE_URL", "https://x.example.co"),
            ("TABLE_STORE_KEY", "anon"),
            ("DATABASE_URL", "postgres://localhost/market"),
        ])
        .unwrap();
        assert_eq!(cfg.backend.label(), "rest");

        let cfg = config(&[("DATABASE_URL", "postgres://localhost/market")]).unwrap();
        assert_eq!(cfg.backend.label(), "postgres");
    }

    #[test]
    fn half_configured_rest_store_is_an_error() {
        assert!(config(&[("TABLE_STORE_URL", "https://x.example.co")]).is_err());
        assert!(config(&[("APP_PORT", "http")]).is_err());
    }

    #[test]
    fn verification_codes_are_configurable() {
        let cfg = config(&[("SMS_TEST_CODE", "0000"), ("EMAIL_TEST_CODE", "9999")]).unwrap();
        assert_eq!(cfg.verification.sms, "0000");
        assert_eq!(cfg.verification.email, "9999");
    }
}
