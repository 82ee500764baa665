use crate::engine::model::AnalyzedMatch;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reads a JSON list from `path`. Missing or corrupt files read as empty.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            warn!(path = %path.display(), "file not found, returning empty list");
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "failed to parse records, returning empty list");
        Vec::new()
    })
}

pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records).map_err(|e| {
        AppError::JsonError(format!("Failed to serialize records: {}", e))
    })?;
    fs::write(path, json)?;
    Ok(())
}

/// Flat list of analyzed matches for one player (or a reference population),
/// oldest first.
#[derive(Debug)]
pub struct MatchStore {
    path: PathBuf,
    pub matches: Vec<AnalyzedMatch>,
}

impl MatchStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let matches = load_records(&path);
        MatchStore { path, matches }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn find(&self, match_id: &str) -> Option<&AnalyzedMatch> {
        self.matches.iter().find(|m| m.match_id() == match_id)
    }

    pub fn latest(&self) -> Option<&AnalyzedMatch> {
        self.matches.last()
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.find(match_id).is_some()
    }

    /// Adds matches not already stored and returns how many were new.
    pub fn merge(&mut self, new_matches: Vec<AnalyzedMatch>) -> usize {
        let mut known: HashSet<String> =
            self.matches.iter().map(|m| m.match_id().to_string()).collect();

        let before = self.matches.len();
        for new_match in new_matches {
            if known.insert(new_match.match_id().to_string()) {
                self.matches.push(new_match);
            }
        }

        // Stable, so equal creation times keep insertion order.
        self.matches.sort_by_key(|m| m.stats.game_creation);
        self.matches.len() - before
    }

    pub fn save(&self) -> Result<(), AppError> {
        save_records(&self.path, &self.matches)?;
        info!(path = %self.path.display(), count = self.matches.len(), "saved match store");
        Ok(())
    }
}
