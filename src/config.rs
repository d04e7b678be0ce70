use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

// --- CONFIG AGGREGATOR ---

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub broker: BrokerConfig,
}

impl Config {
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Self::load)
    }

    fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            server: ServerConfig::load(),
            broker: BrokerConfig::load(),
        }
    }
}

// --- MODULES ---

// SERVER
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    fn load() -> Self {
        Self {
            host:      get_env("SERVER_HOST", "127.0.0.1".to_string()),
            port:      get_env("SERVER_PORT", 8000),
            log_level: Self::log_level(),
        }
    }

    /// Readable before `Config::global()`, so `main` can set up tracing first.
    pub fn log_level() -> String {
        env::var("LOGBROKER_LOG").unwrap_or_else(|_| "info".to_string())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// BROKER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    pub producer_id_prefix: String,
    pub consumer_id_prefix: String,
    /// Hex characters appended to generated ids (`consumer-1a2b3c4d`).
    pub id_suffix_len: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            producer_id_prefix: "producer".to_string(),
            consumer_id_prefix: "consumer".to_string(),
            id_suffix_len: 8,
        }
    }
}

impl BrokerConfig {
    fn load() -> Self {
        let defaults = Self::default();
        Self {
            producer_id_prefix: get_env("PRODUCER_ID_PREFIX", defaults.producer_id_prefix),
            consumer_id_prefix: get_env("CONSUMER_ID_PREFIX", defaults.consumer_id_prefix),
            id_suffix_len:      get_env("ID_SUFFIX_LEN", defaults.id_suffix_len),
        }
    }
}

// --- PRIVATE HELPER ---

fn get_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Config error: {} has invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
