use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "cms";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_DIR_NAME: &str = "data";
pub const CREDENTIALS_FILE_NAME: &str = "users.yml";

const CREDENTIALS_TEMPLATE: &str = "\
# username: bcrypt hash
# generate a hash with `cms hash-password <password>`
{}
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the HTML server
    #[serde(default = "default_app_port")]
    pub app_port: u16,
    /// Document directory (defaults to <cms_dir>/data)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Credential file (defaults to <cms_dir>/users.yml)
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    /// Only send the session cookie over https
    #[serde(default)]
    pub secure_cookies: bool,
    /// Seconds of inactivity before a session expires
    #[serde(default = "default_session_inactivity_secs")]
    pub session_inactivity_secs: u64,
}

fn default_app_port() -> u16 {
    4567
}

fn default_session_inactivity_secs() -> u64 {
    24 * 60 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_port: default_app_port(),
            data_dir: None,
            credentials_path: None,
            secure_cookies: false,
            session_inactivity_secs: default_session_inactivity_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the cms directory (~/.cms)
    pub cms_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the document directory
    pub data_path: PathBuf,
    /// Path to the credential file
    pub credentials_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the cms directory path (custom or default ~/.cms)
    pub fn cms_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new cms state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let cms_dir = Self::cms_dir(custom_path)?;

        if cms_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&cms_dir)?;

        let config = config.unwrap_or_default();
        let config_path = cms_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        let data_path = Self::resolve_data_path(&cms_dir, &config);
        fs::create_dir_all(&data_path)?;

        let credentials_path = Self::resolve_credentials_path(&cms_dir, &config);
        if !credentials_path.exists() {
            fs::write(&credentials_path, CREDENTIALS_TEMPLATE)?;
        }

        Ok(Self {
            cms_dir,
            config_path,
            data_path,
            credentials_path,
            config,
        })
    }

    /// Load existing state from the cms directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let cms_dir = Self::cms_dir(custom_path)?;

        if !cms_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = cms_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        let data_path = Self::resolve_data_path(&cms_dir, &config);
        let credentials_path = Self::resolve_credentials_path(&cms_dir, &config);

        Ok(Self {
            cms_dir,
            config_path,
            data_path,
            credentials_path,
            config,
        })
    }

    fn resolve_data_path(cms_dir: &std::path::Path, config: &AppConfig) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| cms_dir.join(DATA_DIR_NAME))
    }

    fn resolve_credentials_path(cms_dir: &std::path::Path, config: &AppConfig) -> PathBuf {
        config
            .credentials_path
            .clone()
            .unwrap_or_else(|| cms_dir.join(CREDENTIALS_FILE_NAME))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("cms directory not initialized. Run 'cms init' first")]
    NotInitialized,

    #[error("cms directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
