use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub smoke: SmokeConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    /// Applies to remote checks only; in-process dispatch has no timeout
    pub request_timeout_secs: u64,
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub default_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        Self::for_environment(environment).with_env_overrides()
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SMOKE_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("SMOKE_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Smoke overrides
        if let Ok(v) = env::var("SMOKE_REQUEST_TIMEOUT_SECS") {
            self.smoke.request_timeout_secs = v.parse().unwrap_or(self.smoke.request_timeout_secs);
        }
        if let Ok(v) = env::var("SMOKE_PARALLEL") {
            self.smoke.parallel = v.parse().unwrap_or(self.smoke.parallel);
        }

        // Logging overrides
        if let Ok(v) = env::var("SMOKE_LOG_FILTER") {
            self.logging.default_filter = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    /// Socket address string for the status server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            smoke: SmokeConfig {
                request_timeout_secs: 30,
                parallel: false,
            },
            logging: LoggingConfig {
                default_filter: "status_smoke=debug,tower_http=debug".to_string(),
            },
            security: SecurityConfig { enable_cors: true },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            smoke: SmokeConfig {
                request_timeout_secs: 10,
                parallel: true,
            },
            logging: LoggingConfig {
                default_filter: "status_smoke=info,tower_http=info".to_string(),
            },
            security: SecurityConfig { enable_cors: true },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            smoke: SmokeConfig {
                request_timeout_secs: 5,
                parallel: true,
            },
            logging: LoggingConfig {
                default_filter: "status_smoke=info".to_string(),
            },
            security: SecurityConfig { enable_cors: false },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert!(!config.smoke.parallel);
        assert!(config.security.enable_cors);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.smoke.request_timeout_secs, 5);
        assert!(!config.security.enable_cors);
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
