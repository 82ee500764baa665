use super::champion_games;
use crate::engine::model::AnalyzedMatch;
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Champions need at least this many sampled games to be ranked.
pub const MIN_RANKED_GAMES: usize = 5;
const SKILL_ORDER_LEVELS: usize = 11;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionStats {
    pub champion: String,
    pub games_played: usize,
    pub wins: usize,
    pub win_rate: f64,
}

impl ChampionStats {
    pub fn new(champion: String) -> Self {
        ChampionStats {
            champion,
            games_played: 0,
            wins: 0,
            win_rate: 0.0,
        }
    }

    fn record(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.wins += 1;
        }
        self.win_rate = self.wins as f64 / self.games_played as f64;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RankBy {
    WinRate,
    GamesPlayed,
}

/// Groups games by champion, in alphabetical order.
pub struct ChampionStatsTracker {
    stats: BTreeMap<String, ChampionStats>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        ChampionStatsTracker {
            stats: BTreeMap::new(),
        }
    }

    pub fn add_game(&mut self, champion: &str, won: bool) {
        self.stats
            .entry(champion.to_string())
            .or_insert_with(|| ChampionStats::new(champion.to_string()))
            .record(won);
    }

    pub fn get_stats(&self) -> Vec<ChampionStats> {
        self.stats.values().cloned().collect()
    }
}

impl Default for ChampionStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Top `top_n` champions of the reference population that clear the
/// sample-size floor. Ties keep alphabetical order.
pub fn rank_champions(matches: &[AnalyzedMatch], sort_by: RankBy, top_n: usize) -> Vec<ChampionStats> {
    let mut tracker = ChampionStatsTracker::new();
    for m in matches {
        tracker.add_game(&m.stats.champion, m.stats.win);
    }

    let mut ranked: Vec<ChampionStats> = tracker
        .get_stats()
        .into_iter()
        .filter(|s| s.games_played >= MIN_RANKED_GAMES)
        .collect();

    match sort_by {
        RankBy::WinRate => ranked.sort_by(|a, b| {
            b.win_rate
                .partial_cmp(&a.win_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        RankBy::GamesPlayed => ranked.sort_by(|a, b| b.games_played.cmp(&a.games_played)),
    }
    ranked.truncate(top_n);
    ranked
}

pub fn skill_key(slot: i32) -> char {
    match slot {
        1 => 'Q',
        2 => 'W',
        3 => 'E',
        4 => 'R',
        _ => '?',
    }
}

/// Most frequent value; ties go to the value seen first.
pub(crate) fn most_common<T: PartialEq + Copy>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // max_by_key keeps the last maximum, so walk in reverse.
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value)
}

/// Majority-vote skill order for `champion`, one key per level, stopping at
/// the first level no game reached.
pub fn common_skill_order(matches: &[AnalyzedMatch], champion: &str) -> AnalysisResult<Vec<char>> {
    let games = champion_games(matches, Some(champion));
    if games.is_empty() {
        return Err(AnalysisError::NoData(format!(
            "No games found for {} in the database.",
            champion
        )));
    }

    let orders: Vec<&[i32]> = games
        .iter()
        .map(|m| m.timeline.skill_level_order.as_slice())
        .filter(|order| !order.is_empty())
        .collect();
    if orders.is_empty() {
        return Err(AnalysisError::NoData(format!(
            "Skill level data is missing for {} games.",
            champion
        )));
    }

    let mut common_order = Vec::new();
    for level in 0..SKILL_ORDER_LEVELS {
        let Some(slot) = most_common(orders.iter().filter_map(|order| order.get(level).copied())) else {
            break;
        };
        common_order.push(skill_key(slot));
    }
    Ok(common_order)
}

pub fn format_skill_order(order: &[char]) -> String {
    order
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
