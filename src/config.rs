use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATA_DIR: &str = "data";
const GEMINI_MODEL: &str = "gemini-2.5-pro";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_TEMPERATURE: f32 = 0.7;
const CREATE_FAILURE_RATE: f64 = 0.3;
const DELETE_FAILURE_RATE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    File(PathBuf),
    Memory,
}

/// Artificial delays that make the mock backend feel like a network service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub login: Duration,
    pub session_lookup: Duration,
    pub list_trips: Duration,
    pub delete_trip: Duration,
    pub failed_create: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            session_lookup: Duration::from_millis(200),
            list_trips: Duration::from_millis(500),
            delete_trip: Duration::from_millis(1000),
            failed_create: Duration::from_millis(1500),
        }
    }
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            session_lookup: Duration::ZERO,
            list_trips: Duration::ZERO,
            delete_trip: Duration::ZERO,
            failed_create: Duration::ZERO,
        }
    }
}

pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub gemini: GeminiConfig,
    pub latency: LatencyConfig,
    pub create_failure_rate: f64,
    pub delete_failure_rate: f64,
    pub cors_allowed_origin: Option<String>,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage = match var("TRIP_PLANNER_STORAGE").as_deref() {
            Some("memory") => StorageBackend::Memory,
            other => {
                if let Some(value) = other.filter(|v| *v != "file") {
                    log::warn!("Unknown TRIP_PLANNER_STORAGE {:?}, using file storage", value);
                }
                StorageBackend::File(PathBuf::from(
                    var("TRIP_PLANNER_DATA_DIR").unwrap_or_else(|| DATA_DIR.to_string()),
                ))
            }
        };

        let latency = match var("SIMULATED_LATENCY").as_deref() {
            Some("off") | Some("false") | Some("0") => LatencyConfig::none(),
            _ => LatencyConfig::default(),
        };

        Self {
            host: var("HOST").unwrap_or_else(|| HOST.to_string()),
            port: parse_or("PORT", var("PORT"), PORT),
            storage,
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
                model: var("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
                base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
                temperature: parse_or("GEMINI_TEMPERATURE", var("GEMINI_TEMPERATURE"), GEMINI_TEMPERATURE),
            },
            latency,
            create_failure_rate: parse_rate("CREATE_FAILURE_RATE", var("CREATE_FAILURE_RATE"), CREATE_FAILURE_RATE),
            delete_failure_rate: parse_rate("DELETE_FAILURE_RATE", var("DELETE_FAILURE_RATE"), DELETE_FAILURE_RATE),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
            environment: var("RUST_ENV").unwrap_or_else(|| "development".to_string()),
        }
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Could not parse {}={:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

fn parse_rate(name: &str, value: Option<String>, default: f64) -> f64 {
    let rate = parse_or(name, value, default);
    if (0.0..=1.0).contains(&rate) {
        rate
    } else {
        log::warn!("{} must be between 0 and 1, got {}", name, rate);
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_mock_backend() {
        let cfg = config(&[]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.storage, StorageBackend::File(PathBuf::from("data")));
        assert_eq!(cfg.gemini.api_key, None);
        assert_eq!(cfg.gemini.model, "gemini-2.5-pro");
        assert_eq!(cfg.latency, LatencyConfig::default());
        assert_eq!(cfg.create_failure_rate, 0.3);
        assert_eq!(cfg.delete_failure_rate, 0.2);
    }

    #[test]
    fn gemini_key_prefers_specific_variable() {
        let cfg = config(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "specific")]);
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("specific"));

        let cfg = config(&[("API_KEY", "generic")]);
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("generic"));

        let cfg = config(&[("API_KEY", "  ")]);
        assert_eq!(cfg.gemini.api_key, None);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[
            ("PORT", "eighty"),
            ("DELETE_FAILURE_RATE", "1.5"),
            ("CREATE_FAILURE_RATE", "0"),
        ]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.delete_failure_rate, 0.2);
        assert_eq!(cfg.create_failure_rate, 0.0);
    }

    #[test]
    fn memory_storage_and_no_latency() {
        let cfg = config(&[("TRIP_PLANNER_STORAGE", "memory"), ("SIMULATED_LATENCY", "off")]);
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.latency, LatencyConfig::none());
    }
}
