use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExchangeSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

fn default_base_url() -> String {
    "https://api.bingx.com".to_string()
}

fn default_key_file() -> String {
    "keys.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Poll {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server")]
    pub server: Server,
    #[serde(default = "default_exchange_settings")]
    pub exchange: ExchangeSettings,
    #[serde(default = "default_poll")]
    pub poll: Poll,
}

fn default_server() -> Server {
    Server {
        host: default_host(),
        port: default_port(),
    }
}

fn default_exchange_settings() -> ExchangeSettings {
    ExchangeSettings {
        base_url: default_base_url(),
        key_file: default_key_file(),
    }
}

fn default_poll() -> Poll {
    Poll {
        interval_secs: default_interval_secs(),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: default_server(),
            exchange: default_exchange_settings(),
            poll: default_poll(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Try to find config file in multiple locations
        let config_file = format!("{}.toml", run_mode);
        let possible_paths = vec![
            format!("config/{}", config_file),
            format!("../config/{}", config_file),
        ];

        let mut config_path = None;
        for path in &possible_paths {
            if std::path::Path::new(path).exists() {
                config_path = Some(path.clone());
                break;
            }
        }

        // A missing file is fine, every section carries defaults
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(&path.replace(".toml", "")).required(true));
        }

        if let Ok(base_url) = std::env::var("BINGX_BASE_URL") {
            builder = builder.set_override("exchange.base_url", base_url)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
