use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mail: MailConfig,
    pub gemini: GeminiConfig,
    pub cors: CorsConfig,
    /// Replaces the built-in personal information document when set.
    pub personal_info_path: Option<PathBuf>,
    pub otlp_endpoint: Option<String>,
}

/// Outbound mail settings.
///
/// Host, port, user and password may be absent at startup; the contact
/// endpoint checks them on every request and reports a configuration error
/// instead of sending.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<Secret<String>>,
    pub from_name: String,
    /// Mailbox receiving contact notifications. Falls back to `user`.
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl MailConfig {
    /// Names of the required settings that are not configured.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.host.as_deref().map_or(true, str::is_empty) {
            missing.push("EMAIL_HOST");
        }
        if self.port.is_none() {
            missing.push("EMAIL_PORT");
        }
        if self.user.as_deref().map_or(true, str::is_empty) {
            missing.push("EMAIL_USER");
        }
        if self.password.is_none() {
            missing.push("EMAIL_PASS");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_settings().is_empty()
    }

    pub fn owner_mailbox(&self) -> Option<&str> {
        self.owner_email
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.user.as_deref())
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let mail = MailConfig {
            host: optional_env("EMAIL_HOST", is_prod)?,
            port: optional_env("EMAIL_PORT", is_prod)?
                .map(|port| {
                    port.parse::<u16>().map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "EMAIL_PORT must be a valid port number: {}",
                            e
                        ))
                    })
                })
                .transpose()?,
            user: optional_env("EMAIL_USER", is_prod)?,
            password: optional_env("EMAIL_PASS", is_prod)?.map(Secret::new),
            from_name: get_env("EMAIL_FROM_NAME", "Portfolio Contact"),
            owner_email: optional_env("EMAIL_OWNER", false)?,
        };

        let gemini = GeminiConfig {
            api_key: optional_env("GEMINI_API_KEY", is_prod)?.map(Secret::new),
            model: get_env("GEMINI_MODEL", "gemini-2.0-flash"),
            api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            timeout_secs: get_env("GEMINI_TIMEOUT_SECS", "120").parse().unwrap_or(120),
        };

        let cors = CorsConfig {
            allowed_origins: optional_env("CORS_ALLOWED_ORIGINS", false)?
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        };

        Ok(RelayConfig {
            common: common_config,
            mail,
            gemini,
            cors,
            personal_info_path: optional_env("PERSONAL_INFO_PATH", false)?.map(PathBuf::from),
            otlp_endpoint: optional_env("OTLP_ENDPOINT", false)?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional_env(key: &str, required: bool) -> Result<Option<String>, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
        _ if required => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_config() -> MailConfig {
        MailConfig {
            host: Some("smtp.example.com".to_string()),
            port: Some(465),
            user: Some("owner@example.com".to_string()),
            password: Some(Secret::new("app-password".to_string())),
            from_name: "Portfolio Contact".to_string(),
            owner_email: None,
        }
    }

    #[test]
    fn test_complete_mail_config() {
        let config = mail_config();
        assert!(config.is_complete());
        assert_eq!(config.owner_mailbox(), Some("owner@example.com"));
    }

    #[test]
    fn test_missing_mail_settings_are_named() {
        let config = MailConfig {
            host: Some(String::new()),
            password: None,
            ..mail_config()
        };
        assert_eq!(config.missing_settings(), vec!["EMAIL_HOST", "EMAIL_PASS"]);
        assert!(!config.is_complete());
    }

    #[test]
    fn test_owner_email_overrides_user() {
        let config = MailConfig {
            owner_email: Some("inbox@example.com".to_string()),
            ..mail_config()
        };
        assert_eq!(config.owner_mailbox(), Some("inbox@example.com"));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.dev, ,https://b.dev "),
            vec!["https://a.dev".to_string(), "https://b.dev".to_string()]
        );
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let rendered = format!("{:?}", mail_config());
        assert!(!rendered.contains("app-password"));
    }
}
