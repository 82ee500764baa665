//! Read-only analyses over analyzed matches. Every function here is pure: it
//! takes already-loaded records and returns a report or an [`AnalysisError`].
//!
//! [`AnalysisError`]: crate::error::AnalysisError

pub mod averages;
pub mod build;
pub mod champion_stats;
pub mod gold;
pub mod matchup;
pub mod metric;
pub mod objectives;
pub mod playstyle;
pub mod report;

use crate::engine::model::AnalyzedMatch;

/// Formats a game clock in milliseconds as `MM:SS`.
pub fn ms_to_min_sec(ms: i64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Arithmetic mean; an empty input averages to 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Matches played on `champion` (case-insensitive), or all of them.
pub fn champion_games<'a>(
    matches: &'a [AnalyzedMatch],
    champion: Option<&str>,
) -> Vec<&'a AnalyzedMatch> {
    match champion {
        Some(name) => matches.iter().filter(|m| m.is_champion(name)).collect(),
        None => matches.iter().collect(),
    }
}

/// `DRAGON` -> `Dragon`, `BARON_NASHOR` -> `Baron Nashor`.
pub fn title_case(raw: &str) -> String {
    raw.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_game_clock() {
        assert_eq!(ms_to_min_sec(0), "00:00");
        assert_eq!(ms_to_min_sec(61_999), "01:01");
        assert_eq!(ms_to_min_sec(840_000), "14:00");
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn title_cases_objective_types() {
        assert_eq!(title_case("BARON_NASHOR"), "Baron Nashor");
        assert_eq!(title_case("DRAGON"), "Dragon");
    }
}
