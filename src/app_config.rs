use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::StgResult;

/// - στιγμή, a moment in time
pub const APP_NAME: &'static str = "stigmi";
pub const APP_DISPLAY_NAME: &'static str = "στιγμή";
pub const CACHE_EXT: &'static str = "stg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_matches_file")]
    pub matches_file: String,
    #[serde(default = "default_unmatched_file")]
    pub unmatched_file: String,
    #[serde(default = "default_whisper_command")]
    pub whisper_command: String,
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            matches_file: default_matches_file(),
            unmatched_file: default_unmatched_file(),
            whisper_command: default_whisper_command(),
            whisper_model: default_whisper_model(),
        }
    }
}

impl AppConfig {
    fn create_new() -> StgResult<Self> {
        let data_dir =
            get_data_dir().ok_or_else(|| String::from("Could not determine data directory"))?;
        Ok(Self {
            data_dir,
            ..Self::default()
        })
    }
    pub fn load() -> StgResult<AppConfig> {
        let config = load_config()?;
        // Create data dir if it doesn't exist
        std::fs::create_dir_all(&config.data_dir)?;
        Ok(config)
    }
    pub fn matches_path(&self) -> PathBuf {
        self.output_dir.join(&self.matches_file)
    }
    pub fn unmatched_path(&self) -> PathBuf {
        self.output_dir.join(&self.unmatched_file)
    }
}

fn default_data_dir() -> PathBuf {
    get_data_dir().unwrap_or_else(|| PathBuf::from(".").join(APP_NAME))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_matches_file() -> String {
    String::from("keyword_timestamps.csv")
}

fn default_unmatched_file() -> String {
    String::from("keywords_not_found.csv")
}

fn default_whisper_command() -> String {
    String::from("whisper")
}

fn default_whisper_model() -> String {
    String::from("base")
}

fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
}

fn get_config_path() -> Option<PathBuf> {
    get_project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

fn get_data_dir() -> Option<PathBuf> {
    get_project_dirs().map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
}

fn load_config() -> StgResult<AppConfig> {
    let config_path =
        get_config_path().ok_or_else(|| String::from("Could not determine config directory"))?;

    // Create parent directories if they don't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !config_path.exists() {
        // Create default config if it doesn't exist
        let new_config = AppConfig::create_new()?;
        let toml = toml::to_string_pretty(&new_config)?;
        std::fs::write(&config_path, toml)?;
    }

    Ok(build_config(Some(config_path))?)
}

/// File values first, then `STIGMI_*` environment variables on top.
fn build_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path));
    }
    builder
        .add_source(Environment::with_prefix("STIGMI"))
        .build()?
        .try_deserialize()
}
