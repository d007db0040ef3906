//! Runtime configuration from environment (.env is loaded by main)

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "threedaysfit.db";
pub const DEFAULT_PLAYER: &str = "paplay";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub firestore_project_id: Option<String>,
    pub google_client_id: Option<String>,
    pub sound_file: Option<PathBuf>,
    pub sound_player: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            firestore_project_id: None,
            google_client_id: None,
            sound_file: None,
            sound_player: DEFAULT_PLAYER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: get(&["THREEDAYSFIT_DB"]).unwrap_or(defaults.db_path),
            firestore_project_id: get(&["FIRESTORE_PROJECT_ID", "VITE_FIRESTORE_PROJECT_ID"]),
            google_client_id: get(&["GOOGLE_CLIENT_ID", "VITE_GOOGLE_CLIENT_ID"]),
            sound_file: get(&["THREEDAYSFIT_SOUND"]).map(PathBuf::from),
            sound_player: get(&["THREEDAYSFIT_PLAYER"]).unwrap_or(defaults.sound_player),
        }
    }
}
