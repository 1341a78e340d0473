use std::fs;
use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration for the Registrar service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the hosted backend
    pub backend_url: String,
    /// API key for the hosted backend
    pub backend_api_key: String,
    /// Root URL of the text-generation API
    pub ai_api_url: String,
    /// API key for the text-generation API
    pub ai_api_key: String,
    /// Model identifier used for report generation
    pub ai_model: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for the backend URL
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Optional update for the backend API key
    #[serde(default)]
    pub backend_api_key: Option<String>,
    /// Optional update for the generation API URL
    #[serde(default)]
    pub ai_api_url: Option<String>,
    /// Optional update for the generation API key
    #[serde(default)]
    pub ai_api_key: Option<String>,
    /// Optional update for the generation model
    #[serde(default)]
    pub ai_model: Option<String>,
    /// Optional update for the listen port
    #[serde(default)]
    pub port: Option<u16>,
}

/// Command line arguments for the application
#[derive(Parser, Debug)]
#[clap(name = "registrar", about = "A student grade management service")]
pub struct CliArgs {
    /// Root URL of the hosted backend
    #[clap(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// API key for the hosted backend
    #[clap(long, env = "BACKEND_API_KEY")]
    pub backend_api_key: Option<String>,

    /// Root URL of the text-generation API
    #[clap(long, env = "AI_API_URL")]
    pub ai_api_url: Option<String>,

    /// API key for the text-generation API
    #[clap(long, env = "AI_API_KEY")]
    pub ai_api_key: Option<String>,

    /// Model identifier used for report generation
    #[clap(long, env = "AI_MODEL")]
    pub ai_model: Option<String>,

    /// Port to listen on
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            backend_url: update.backend_url.unwrap_or(self.backend_url),
            backend_api_key: update.backend_api_key.unwrap_or(self.backend_api_key),
            ai_api_url: update.ai_api_url.unwrap_or(self.ai_api_url),
            ai_api_key: update.ai_api_key.unwrap_or(self.ai_api_key),
            ai_model: update.ai_model.unwrap_or(self.ai_model),
            port: update.port.unwrap_or(self.port),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config() -> Config {
    Config {
        backend_url: "http://localhost:54321".to_string(),
        backend_api_key: String::new(),
        ai_api_url: "https://generativelanguage.googleapis.com".to_string(),
        ai_api_key: String::new(),
        ai_model: "gemini-1.5-flash".to_string(),
        port: 3000,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // if the config path is None, return the default config
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        backend_url: args.backend_url,
        backend_api_key: args.backend_api_key,
        ai_api_url: args.ai_api_url,
        ai_api_key: args.ai_api_key,
        ai_model: args.ai_model,
        port: args.port,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_path = match ProjectDirs::from("com", "registrar", "registrar") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    };

    let config = base_config()
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: backend_url={}, ai_api_url={}, ai_model={}, port={}",
        config.backend_url, config.ai_api_url, config.ai_model, config.port
    );

    config
}
