use super::metric::Metric;
use super::{champion_games, mean};
use crate::engine::model::AnalyzedMatch;
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

pub const MIN_TREND_GAMES: usize = 3;
const TREND_MARGIN: f64 = 0.05;

/// Mean of `metric` over the matches on `champion` (or all matches).
/// Returns 0 when nothing matches.
pub fn average_stat(matches: &[AnalyzedMatch], metric: Metric, champion: Option<&str>) -> f64 {
    let values: Vec<f64> = champion_games(matches, champion)
        .into_iter()
        .map(|m| metric.value(&m.stats))
        .collect();
    mean(&values)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Upward,
    Downward,
    Stable,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Upward => "Upward",
            Trend::Downward => "Downward",
            Trend::Stable => "Stable",
        }
    }

    fn classify(first_half: f64, second_half: f64) -> Self {
        if second_half > first_half * (1.0 + TREND_MARGIN) {
            Trend::Upward
        } else if second_half < first_half * (1.0 - TREND_MARGIN) {
            Trend::Downward
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub metric: String,
    pub trend: Trend,
    pub games_analyzed: usize,
    pub average_of_first_half: f64,
    pub average_of_second_half: f64,
    pub insight: String,
}

/// Compares the older and newer halves of the last `num_games` matches.
/// `history` must be oldest first.
pub fn performance_trend(
    history: &[AnalyzedMatch],
    metric: Metric,
    num_games: usize,
) -> AnalysisResult<TrendReport> {
    if history.len() < MIN_TREND_GAMES {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_TREND_GAMES,
            found: history.len(),
        });
    }

    let recent = &history[history.len().saturating_sub(num_games)..];
    if recent.len() < MIN_TREND_GAMES {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_TREND_GAMES,
            found: recent.len(),
        });
    }

    let values: Vec<f64> = recent.iter().map(|m| metric.value(&m.stats)).collect();
    let (first_half, second_half) = values.split_at(values.len() / 2);
    let average_of_first_half = mean(first_half);
    let average_of_second_half = mean(second_half);
    let trend = Trend::classify(average_of_first_half, average_of_second_half);

    Ok(TrendReport {
        metric: metric.key().to_string(),
        trend,
        games_analyzed: values.len(),
        average_of_first_half,
        average_of_second_half,
        insight: format!(
            "Your performance for '{}' is on a(n) {} trend over the last {} games.",
            metric.key(),
            trend.label().to_lowercase(),
            values.len()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::StatRecord;

    fn game(champion: &str, vision: f64) -> AnalyzedMatch {
        AnalyzedMatch {
            stats: StatRecord {
                champion: champion.to_string(),
                vision_score: vision,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn history(values: &[f64]) -> Vec<AnalyzedMatch> {
        values.iter().map(|v| game("Lulu", *v)).collect()
    }

    #[test]
    fn average_over_empty_filter_is_zero() {
        let games = history(&[10.0, 20.0]);
        assert_eq!(average_stat(&games, Metric::VisionScore, Some("Braum")), 0.0);
        assert_eq!(average_stat(&[], Metric::VisionScore, None), 0.0);
    }

    #[test]
    fn average_filters_champion_case_insensitively() {
        let games = vec![game("Lulu", 10.0), game("Braum", 50.0), game("Lulu", 30.0)];
        assert_eq!(average_stat(&games, Metric::VisionScore, Some("lulu")), 20.0);
        assert_eq!(average_stat(&games, Metric::VisionScore, None), 30.0);
    }

    #[test]
    fn six_percent_rise_is_upward() {
        let report = performance_trend(&history(&[10.0, 10.0, 10.6, 10.6]), Metric::VisionScore, 10).unwrap();
        assert_eq!(report.trend, Trend::Upward);
        assert_eq!(report.games_analyzed, 4);
    }

    #[test]
    fn six_percent_drop_is_downward() {
        let report = performance_trend(&history(&[10.0, 10.0, 9.4, 9.4]), Metric::VisionScore, 10).unwrap();
        assert_eq!(report.trend, Trend::Downward);
    }

    #[test]
    fn two_percent_change_is_stable() {
        let report = performance_trend(&history(&[10.0, 10.0, 10.2, 10.2]), Metric::VisionScore, 10).unwrap();
        assert_eq!(report.trend, Trend::Stable);
        assert!(report.insight.contains("stable trend over the last 4 games"));
    }

    #[test]
    fn odd_window_puts_middle_game_in_second_half() {
        let report = performance_trend(&history(&[1.0, 10.0, 10.0, 10.0, 40.0]), Metric::VisionScore, 10).unwrap();
        assert_eq!(report.average_of_first_half, 5.5);
        assert_eq!(report.average_of_second_half, 20.0);
    }

    #[test]
    fn only_most_recent_games_are_used() {
        let report = performance_trend(&history(&[100.0, 10.0, 10.0, 10.6, 10.6]), Metric::VisionScore, 4).unwrap();
        assert_eq!(report.games_analyzed, 4);
        assert_eq!(report.trend, Trend::Upward);
    }

    #[test]
    fn fewer_than_three_games_is_insufficient() {
        assert_eq!(
            performance_trend(&history(&[1.0, 2.0]), Metric::VisionScore, 10),
            Err(AnalysisError::InsufficientData { needed: 3, found: 2 })
        );
        assert_eq!(
            performance_trend(&history(&[1.0, 2.0, 3.0, 4.0]), Metric::VisionScore, 2),
            Err(AnalysisError::InsufficientData { needed: 3, found: 2 })
        );
    }
}
