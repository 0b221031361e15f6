//! Configuration management module.
//!
//! This module handles loading and saving the client configuration: the
//! portal base URL, endpoint paths, the optional anti-forgery token, and
//! the message/redirect timing knobs.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const SESSION_FILE_NAME: &str = "session.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/portal-cli";

/// Oversees management of the configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub login_endpoint: String,
    pub dashboard_url: String,
    pub gov_auth_url: String,
    pub csrf_token: Option<String>,
    pub error_timeout_ms: u64,
    pub redirect_delay_ms: u64,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    pub api_base_url: String,
    #[serde(default = "default_login_endpoint")]
    pub login_endpoint: String,
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
    #[serde(default = "default_gov_auth_url")]
    pub gov_auth_url: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default = "default_error_timeout_ms")]
    pub error_timeout_ms: u64,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_login_endpoint() -> String {
    "/api/login".to_string()
}

fn default_dashboard_url() -> String {
    "/dashboard".to_string()
}

fn default_gov_auth_url() -> String {
    "/auth/govbr".to_string()
}

fn default_error_timeout_ms() -> u64 {
    5000
}

fn default_redirect_delay_ms() -> u64 {
    500
}

impl Config {
    /// Return a new instance with default paths and timings and no server
    /// URL.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: None,
            login_endpoint: default_login_endpoint(),
            dashboard_url: default_dashboard_url(),
            gov_auth_url: default_gov_auth_url(),
            csrf_token: None,
            error_timeout_ms: default_error_timeout_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. A missing file is not an error; the server URL can
    /// still arrive from the command line.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        // Specify config file path
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        // If file exists, extract the endpoint set and timing knobs
        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = Some(data.api_base_url);
            self.login_endpoint = data.login_endpoint;
            self.dashboard_url = data.dashboard_url;
            self.gov_auth_url = data.gov_auth_url;
            self.csrf_token = data.csrf_token;
            self.error_timeout_ms = data.error_timeout_ms;
            self.redirect_delay_ms = data.redirect_delay_ms;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_base_url: self
                .api_base_url
                .clone()
                .ok_or(ConfigError::ServerUrlNotSet)?,
            login_endpoint: self.login_endpoint.clone(),
            dashboard_url: self.dashboard_url.clone(),
            gov_auth_url: self.gov_auth_url.clone(),
            csrf_token: self.csrf_token.clone(),
            error_timeout_ms: self.error_timeout_ms,
            redirect_delay_ms: self.redirect_delay_ms,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the path of the session token store, next to the
    /// configuration file.
    ///
    pub fn session_file_path(&self) -> Result<PathBuf, AppError> {
        match &self.file_path {
            Some(file_path) => match file_path.parent() {
                Some(parent) => Ok(parent.join(SESSION_FILE_NAME)),
                None => Err(ConfigError::FilePathNotSet.into()),
            },
            None => Ok(Config::default_path()?.join(SESSION_FILE_NAME)),
        }
    }

    /// Error banner lifetime.
    ///
    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }

    /// Pause between a successful login and the redirect.
    ///
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Returns the path buffer for the default path to the configuration
    /// file or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
