use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_REGION: &str = "na1";
const DATA_DIR_NAME: &str = ".league_coach";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub region: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let region = env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let data_dir = env::var("LEAGUE_COACH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(DATA_DIR_NAME)
            });

        Config {
            api_key,
            region,
            data_dir,
        }
    }

    /// Only the fetch path needs a key; offline analyses run without one.
    pub fn api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })
    }

    pub fn user_store_path(&self, game_name: &str, tag_line: &str) -> PathBuf {
        let sanitized_name = game_name.replace(' ', "_");
        self.data_dir
            .join("users")
            .join(format!("{}_{}.json", sanitized_name, tag_line))
    }

    pub fn reference_path(&self) -> PathBuf {
        self.data_dir.join("reference_matches.json")
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join("items.json")
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.data_dir.join("plots")
    }
}
