use std::time::Duration;

use anyhow::bail;
use tracing::warn;

/// Fallback signing secret for local development. `from_env` refuses to
/// start in production without an explicit secret, so this value can never
/// sign anything that matters.
const DEV_FALLBACK_SECRET: &str = "dev-only-insecure-secret-do-not-use-in-prod";

/// Placeholder invitation code for local development only.
const DEV_FALLBACK_INVITATION_CODE: &str = "dev-invitation-code";

const DEFAULT_TOKEN_TTL_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub invitation_code: String,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/portfolio.db".into());

        let auth = AuthConfig {
            secret: resolve_secret(environment, std::env::var("JWT_SECRET").ok())?,
            invitation_code: resolve_invitation_code(
                environment,
                std::env::var("INVITATION_CODE").ok(),
            )?,
            token_ttl: Duration::from_secs(
                std::env::var("JWT_TTL_DAYS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TOKEN_TTL_DAYS)
                    * 24
                    * 60
                    * 60,
            ),
        };

        Ok(Self {
            environment,
            database_url,
            auth,
        })
    }
}

/// Tokens are forgeable by anyone who knows the signing secret, so a
/// missing secret is fatal in production. Development gets a fixed fallback
/// and a warning on every startup.
fn resolve_secret(environment: Environment, raw: Option<String>) -> anyhow::Result<String> {
    match raw {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ if environment.is_production() => bail!(
            "JWT_SECRET is not set; refusing to start in production with a guessable signing secret"
        ),
        _ => {
            warn!(
                "JWT_SECRET not set; using an insecure development fallback. \
                 Set JWT_SECRET before deploying"
            );
            Ok(DEV_FALLBACK_SECRET.into())
        }
    }
}

fn resolve_invitation_code(
    environment: Environment,
    raw: Option<String>,
) -> anyhow::Result<String> {
    match raw {
        Some(code) if !code.is_empty() => Ok(code),
        _ if environment.is_production() => {
            bail!("INVITATION_CODE is not set; registration cannot be gated in production")
        }
        _ => {
            warn!("INVITATION_CODE not set; using the development placeholder");
            Ok(DEV_FALLBACK_INVITATION_CODE.into())
        }
    }
}
