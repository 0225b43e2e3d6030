use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://support-base-production.up.railway.app/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
    pub environment: String,
    pub enable_logging: bool,
    pub request_timeout_ms: u32,
    pub live_events: LiveEventsConfig,
    pub push: PushConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            request_timeout_ms: 15_000,
            live_events: LiveEventsConfig::default(),
            push: PushConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Backoff del stream SSE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveEventsConfig {
    pub reconnect_initial_ms: u32,
    pub reconnect_max_ms: u32,
}

impl Default for LiveEventsConfig {
    fn default() -> Self {
        Self {
            reconnect_initial_ms: 1_000,
            reconnect_max_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    pub service_worker_path: String,
    /// Espera tras cargar la app con sesión restaurada
    pub bootstrap_delay_ms: u32,
    /// Espera tras un login nuevo
    pub login_delay_ms: u32,
}

impl PushConfig {
    /// Sesión restaurada al arrancar: espera larga; login nuevo: corta
    pub fn registration_delay_ms(&self, restored: bool) -> u32 {
        if restored {
            self.bootstrap_delay_ms
        } else {
            self.login_delay_ms
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            service_worker_path: "/sw.js".to_string(),
            bootstrap_delay_ms: 2_000,
            login_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub customer_orders_limit: u32,
    pub analytics_weeks: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            customer_orders_limit: 25,
            analytics_weeks: 12,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: option_env!("API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            request_timeout_ms: parse_or(option_env!("REQUEST_TIMEOUT_MS"), defaults.request_timeout_ms),
            live_events: LiveEventsConfig {
                reconnect_initial_ms: parse_or(
                    option_env!("SSE_RECONNECT_INITIAL_MS"),
                    defaults.live_events.reconnect_initial_ms,
                ),
                reconnect_max_ms: parse_or(
                    option_env!("SSE_RECONNECT_MAX_MS"),
                    defaults.live_events.reconnect_max_ms,
                ),
            },
            push: PushConfig {
                service_worker_path: option_env!("SERVICE_WORKER_PATH")
                    .map(str::to_string)
                    .unwrap_or(defaults.push.service_worker_path),
                bootstrap_delay_ms: parse_or(
                    option_env!("PUSH_BOOTSTRAP_DELAY_MS"),
                    defaults.push.bootstrap_delay_ms,
                ),
                login_delay_ms: parse_or(option_env!("PUSH_LOGIN_DELAY_MS"), defaults.push.login_delay_ms),
            },
            ui: UiConfig {
                customer_orders_limit: parse_or(
                    option_env!("CUSTOMER_ORDERS_LIMIT"),
                    defaults.ui.customer_orders_limit,
                ),
                analytics_weeks: parse_or(option_env!("ANALYTICS_WEEKS"), defaults.ui.analytics_weeks),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel máximo de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = AppConfig::default();
        assert_eq!(config.live_events.reconnect_initial_ms, 1_000);
        assert_eq!(config.live_events.reconnect_max_ms, 30_000);
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.push.service_worker_path, "/sw.js");
        assert!(!config.api_base.ends_with('/'));
    }

    #[test]
    fn restored_session_waits_longer_than_login() {
        let push = PushConfig::default();
        assert_eq!(push.registration_delay_ms(true), 2_000);
        assert_eq!(push.registration_delay_ms(false), 1_000);
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or::<u32>(Some(" 42 "), 7), 42);
        assert_eq!(parse_or::<u32>(Some("abc"), 7), 7);
        assert_eq!(parse_or::<u32>(None, 7), 7);
        assert!(!parse_or::<bool>(Some("false"), true));
    }
}
