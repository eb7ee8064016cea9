//! Configuration management using igdb_features.toml and environment variables

use igdb_features_core::constants::{DEFAULT_MAX_FILTER_OPTIONS, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_PATH: &str = "igdb_features.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Twitch application client id (also sent as the IGDB `Client-ID` header)
    #[serde(default)]
    pub twitch_client_id: String,

    /// Twitch application client secret
    #[serde(default)]
    pub twitch_client_secret: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Records per page (IGDB maximum is 500)
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Options per filter predicate before a request is split
    #[serde(default = "default_max_filter_options")]
    pub max_filter_options: usize,

    /// SQLite document store (None = app data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Reference year used when no --year is given
    #[serde(default = "default_year")]
    pub year: i32,

    #[serde(default = "default_raw_database")]
    pub raw_database: String,

    #[serde(default = "default_silver_database")]
    pub silver_database: String,

    #[serde(default)]
    pub collections: Collections,
}

/// Collection names inside the raw and silver databases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default = "default_release_dates_collection")]
    pub release_dates: String,
    #[serde(default = "default_involved_companies_list_collection")]
    pub involved_companies_list: String,
    #[serde(default = "default_involved_companies_collection")]
    pub involved_companies: String,
    #[serde(default = "default_multiplayer_modes_collection")]
    pub multiplayer_modes: String,
    #[serde(default = "default_game_info_collection")]
    pub game_info: String,
    #[serde(default = "default_games_silver_collection")]
    pub games_silver: String,
}

fn default_api_base_url() -> String {
    "https://api.igdb.com/v4".to_string()
}

fn default_token_url() -> String {
    "https://id.twitch.tv/oauth2/token".to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_filter_options() -> usize {
    DEFAULT_MAX_FILTER_OPTIONS
}

fn default_year() -> i32 {
    2022
}

fn default_raw_database() -> String {
    "datamaster_raw".to_string()
}

fn default_silver_database() -> String {
    "datamaster_silver".to_string()
}

fn default_release_dates_collection() -> String {
    "game_release_dates_raw".to_string()
}

fn default_involved_companies_list_collection() -> String {
    "involved_companies_list_raw".to_string()
}

fn default_involved_companies_collection() -> String {
    "involved_companies_raw".to_string()
}

fn default_multiplayer_modes_collection() -> String {
    "multiplayer_modes_raw".to_string()
}

fn default_game_info_collection() -> String {
    "game_info_raw".to_string()
}

fn default_games_silver_collection() -> String {
    "games_silver".to_string()
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            release_dates: default_release_dates_collection(),
            involved_companies_list: default_involved_companies_list_collection(),
            involved_companies: default_involved_companies_collection(),
            multiplayer_modes: default_multiplayer_modes_collection(),
            game_info: default_game_info_collection(),
            games_silver: default_games_silver_collection(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            twitch_client_id: String::new(),
            twitch_client_secret: String::new(),
            api_base_url: default_api_base_url(),
            token_url: default_token_url(),
            page_size: default_page_size(),
            max_filter_options: default_max_filter_options(),
            database_path: None,
            year: default_year(),
            raw_database: default_raw_database(),
            silver_database: default_silver_database(),
            collections: Collections::default(),
        }
    }
}

impl Config {
    /// Load config from igdb_features.toml (defaults if missing), then apply
    /// `.env` / environment overrides
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file(Path::new(CONFIG_PATH));
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn load_file(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Error parsing {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Error reading {}: {}", path.display(), e),
        }

        Config::default()
    }

    /// Secrets and the database location may come from the environment
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("TWITCH_ID") {
            self.twitch_client_id = id;
        }
        if let Some(secret) = lookup("TWITCH_SECRET") {
            self.twitch_client_secret = secret;
        }
        if let Some(path) = lookup("IGDB_DATABASE_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Check if Twitch credentials are configured
    pub fn has_credentials(&self) -> bool {
        !self.twitch_client_id.is_empty() && !self.twitch_client_secret.is_empty()
    }

    /// Resolve the document store path, defaulting to the app data directory
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "igdb-features") {
            let data_dir = proj_dirs.data_dir();
            if let Err(e) = fs::create_dir_all(data_dir) {
                tracing::warn!("Failed to create data directory: {}", e);
                return PathBuf::from("igdb_features.db");
            }
            data_dir.join("igdb_features.db")
        } else {
            PathBuf::from("igdb_features.db")
        }
    }
}
