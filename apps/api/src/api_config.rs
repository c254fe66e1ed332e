use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use url::Url;
use venue_core::AppError;

const DEFAULT_AUTH_SERVICE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth_service_url: Url,
    pub auth_service_timeout: Duration,
    pub jwt_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let database_url = required_non_empty(&lookup, "DATABASE_URL")?;
        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);

        let auth_service_url = required_non_empty(&lookup, "AUTH_SERVICE_URL")?;
        let auth_service_url = Url::parse(auth_service_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid AUTH_SERVICE_URL '{auth_service_url}': {error}"))
        })?;
        if !matches!(auth_service_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "AUTH_SERVICE_URL must use http or https, got '{}'",
                auth_service_url.scheme()
            )));
        }

        let auth_service_timeout = match lookup("AUTH_SERVICE_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_AUTH_SERVICE_TIMEOUT_MS),
            Some(value) => {
                let millis = value.trim().parse::<u64>().map_err(|error| {
                    AppError::Validation(format!("invalid AUTH_SERVICE_TIMEOUT_MS: {error}"))
                })?;
                if millis == 0 {
                    return Err(AppError::Validation(
                        "AUTH_SERVICE_TIMEOUT_MS must be greater than zero".to_owned(),
                    ));
                }
                Duration::from_millis(millis)
            }
        };

        let jwt_secret = required_non_empty(&lookup, "JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters"
            )));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty() && value != "*");

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            auth_service_url,
            auth_service_timeout,
            jwt_secret,
            api_host,
            api_port,
            cors_allowed_origin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
