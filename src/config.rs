/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, secret id, 特権 subject など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,

    /// Identifier of the token-verification secret in the secret store.
    pub auth_secret_id: String,

    /// Subjects that bypass the directory lookup and get unrestricted access.
    /// Empty by default: deployments opt in explicitly instead of relying on
    /// a magic built-in name.
    pub privileged_subjects: Vec<String>,

    pub token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let auth_secret_id =
            std::env::var("AUTH_SECRET_ID").map_err(|_| ConfigError::Missing("AUTH_SECRET_ID"))?;
        if auth_secret_id.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_SECRET_ID"));
        }

        let privileged_subjects =
            parse_subject_list(&std::env::var("PRIVILEGED_SUBJECTS").unwrap_or_default());

        let token_leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        Ok(Self {
            addr,
            database_url,
            app_env,
            auth_secret_id,
            privileged_subjects,
            token_leeway_seconds,
        })
    }
}

// Comma-separated, whitespace-tolerant. Empty entries are dropped.
fn parse_subject_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_list_splits_and_trims() {
        assert_eq!(
            parse_subject_list("admin, ops-root ,svc"),
            vec!["admin", "ops-root", "svc"]
        );
    }

    #[test]
    fn subject_list_empty_input_gives_empty_list() {
        assert!(parse_subject_list("").is_empty());
        assert!(parse_subject_list(" , ,").is_empty());
    }
}
