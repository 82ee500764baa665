use super::mean;
use crate::engine::model::{AnalyzedMatch, GoldSample};
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

pub const GOLD_CHECKPOINT_MS: i64 = 14 * 60 * 1000;
const LANE_OPPONENT_POSITION: &str = "UTILITY";

pub fn gold_per_minute(gold: i64, game_duration_secs: i64) -> f64 {
    let minutes = game_duration_secs as f64 / 60.0;
    if minutes > 0.0 {
        gold as f64 / minutes
    } else {
        0.0
    }
}

/// Gold of the first sample at or after `checkpoint`, or 0 if the timeline
/// ends before it.
pub fn gold_at(samples: &[GoldSample], checkpoint: i64) -> i64 {
    samples
        .iter()
        .find(|s| s.timestamp >= checkpoint)
        .map(|s| s.gold)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldEfficiencyReport {
    pub your_champion: String,
    pub enemy_champion: Option<String>,
    pub your_gpm: f64,
    pub enemy_gpm: f64,
    pub pro_average_gpm: f64,
    pub gold_difference_at_14_mins: i64,
    pub comparison_insight: String,
}

/// Compares the player's income with the enemy support and the reference
/// population on the same champion.
pub fn gold_efficiency(
    record: &AnalyzedMatch,
    reference: &[AnalyzedMatch],
) -> AnalysisResult<GoldEfficiencyReport> {
    let stats = &record.stats;
    if stats.champion.is_empty() {
        return Err(AnalysisError::NotFound("Champion name in user match data".to_string()));
    }
    let Some(user) = stats.roster_entry(&stats.puuid) else {
        return Err(AnalysisError::NotFound("User's participant data".to_string()));
    };
    let opponent = stats
        .all_participants
        .iter()
        .find(|p| p.team_position == LANE_OPPONENT_POSITION && p.team_id != user.team_id);

    let your_gpm = gold_per_minute(stats.gold_earned, stats.game_duration);
    let enemy_gpm = opponent
        .map(|p| gold_per_minute(p.gold_earned, stats.game_duration))
        .unwrap_or(0.0);

    let your_gold = gold_at(&record.timeline.gold_timeline, GOLD_CHECKPOINT_MS);
    let enemy_gold = opponent
        .map(|p| gold_at(&p.gold_timeline, GOLD_CHECKPOINT_MS))
        .unwrap_or(0);
    let gold_difference_at_14_mins = your_gold - enemy_gold;

    let reference_gpms: Vec<f64> = reference
        .iter()
        .filter(|m| m.stats.champion == stats.champion && m.stats.game_duration > 0)
        .map(|m| gold_per_minute(m.stats.gold_earned, m.stats.game_duration))
        .collect();
    let pro_average_gpm = mean(&reference_gpms);

    Ok(GoldEfficiencyReport {
        your_champion: stats.champion.clone(),
        enemy_champion: opponent.map(|p| p.champion_name.clone()),
        your_gpm,
        enemy_gpm,
        pro_average_gpm,
        gold_difference_at_14_mins,
        comparison_insight: format!(
            "Your GPM was {:.2} vs. your opponent's {:.2}. At 14 minutes, you had a gold difference of {}. The pro average GPM for {} is {:.2}.",
            your_gpm, enemy_gpm, gold_difference_at_14_mins, stats.champion, pro_average_gpm
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::{RosterEntry, StatRecord, TimelineBundle};

    fn samples(points: &[(i64, i64)]) -> Vec<GoldSample> {
        points
            .iter()
            .map(|(timestamp, gold)| GoldSample {
                timestamp: *timestamp,
                gold: *gold,
            })
            .collect()
    }

    fn entry(puuid: &str, champion: &str, position: &str, team_id: i32, gold: i64) -> RosterEntry {
        RosterEntry {
            puuid: puuid.to_string(),
            champion_name: champion.to_string(),
            team_position: position.to_string(),
            team_id,
            gold_earned: gold,
            ..Default::default()
        }
    }

    fn record() -> AnalyzedMatch {
        let mut opponent = entry("them", "Pyke", "UTILITY", 200, 9000);
        opponent.gold_timeline = samples(&[(780_000, 4000), (840_000, 4300), (900_000, 4700)]);
        AnalyzedMatch {
            stats: StatRecord {
                puuid: "me".to_string(),
                champion: "Janna".to_string(),
                game_duration: 1800,
                gold_earned: 7500,
                all_participants: vec![
                    entry("me", "Janna", "UTILITY", 100, 7500),
                    entry("ally", "Jinx", "BOTTOM", 100, 12000),
                    opponent,
                ],
                ..Default::default()
            },
            timeline: TimelineBundle {
                gold_timeline: samples(&[(780_000, 3500), (845_000, 3900)]),
                ..Default::default()
            },
        }
    }

    fn reference_game(champion: &str, gold: i64, duration: i64) -> AnalyzedMatch {
        AnalyzedMatch {
            stats: StatRecord {
                champion: champion.to_string(),
                gold_earned: gold,
                game_duration: duration,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn gold_at_uses_first_sample_at_or_after_checkpoint() {
        let s = samples(&[(780_000, 1), (845_000, 2), (900_000, 3)]);
        assert_eq!(gold_at(&s, GOLD_CHECKPOINT_MS), 2);
        assert_eq!(gold_at(&s[..1], GOLD_CHECKPOINT_MS), 0);
    }

    #[test]
    fn gpm_guards_zero_duration() {
        assert_eq!(gold_per_minute(6000, 1200), 300.0);
        assert_eq!(gold_per_minute(6000, 0), 0.0);
    }

    #[test]
    fn compares_against_enemy_support_and_reference() {
        let reference = vec![
            reference_game("Janna", 9000, 1800),
            reference_game("Janna", 6000, 1200),
            reference_game("Janna", 6000, 0),
            reference_game("Karma", 20000, 1200),
        ];
        let report = gold_efficiency(&record(), &reference).unwrap();
        assert_eq!(report.enemy_champion.as_deref(), Some("Pyke"));
        assert_eq!(report.your_gpm, 250.0);
        assert_eq!(report.enemy_gpm, 300.0);
        assert_eq!(report.gold_difference_at_14_mins, 3900 - 4300);
        assert_eq!(report.pro_average_gpm, 300.0);
    }

    #[test]
    fn missing_user_entry_is_not_found() {
        let mut r = record();
        r.stats.puuid = "stranger".to_string();
        assert!(matches!(gold_efficiency(&r, &[]), Err(AnalysisError::NotFound(_))));
    }
}
