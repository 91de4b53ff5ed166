use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `llm.api_key`
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend (`trunk build` output), optional
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Only "openai" (and OpenAI-compatible endpoints) is supported
    pub provider: String,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
}

impl LlmConfig {
    /// API key from the environment first, then from the file.
    /// Empty strings count as missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        let non_empty = |key: &String| !key.trim().is_empty();
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(non_empty)
            .or_else(|| self.api_key.clone().filter(non_empty))
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[llm]
provider = "openai"
model = "gpt-4o-mini"
temperature = 0.2
max_tokens = 4096
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Resolve the static directory relative to the executable directory.
/// Returns `None` when not configured or the directory does not exist.
pub fn get_static_dir(config: &Config) -> Option<PathBuf> {
    let dir = config.server.static_dir.as_deref()?;
    let path = Path::new(dir);

    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join(path)))
            .filter(|p| p.exists())
            .unwrap_or_else(|| PathBuf::from(dir))
    };

    resolved.exists().then_some(resolved)
}
