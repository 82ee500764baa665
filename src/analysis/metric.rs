use crate::engine::model::StatRecord;
use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Declares the metric set once: variant, stored key, and how to read it.
macro_rules! metrics {
    ($($variant:ident => $key:literal, |$s:ident| $read:expr;)+) => {
        /// Numeric per-match stats that can be averaged or trended.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Metric {
            $($variant,)+
        }

        impl Metric {
            pub const ALL: &'static [Metric] = &[$(Metric::$variant,)+];

            /// Canonical key, matching the stored record's field name.
            pub fn key(&self) -> &'static str {
                match self {
                    $(Metric::$variant => $key,)+
                }
            }

            pub fn value(&self, stats: &StatRecord) -> f64 {
                match self {
                    $(Metric::$variant => {
                        let $s = stats;
                        $read
                    })+
                }
            }
        }
    };
}

metrics! {
    GameDuration => "gameDuration", |s| s.game_duration as f64;
    Kills => "kills", |s| f64::from(s.kills);
    Deaths => "deaths", |s| f64::from(s.deaths);
    Assists => "assists", |s| f64::from(s.assists);
    KillParticipation => "killParticipation", |s| s.kill_participation;
    GoldEarned => "goldEarned", |s| s.gold_earned as f64;

    VisionScore => "visionScore", |s| s.vision_score;
    WardsPlaced => "wardsPlaced", |s| f64::from(s.wards_placed);
    WardsKilled => "wardsKilled", |s| f64::from(s.wards_killed);
    DetectorWardsPlaced => "detectorWardsPlaced", |s| f64::from(s.detector_wards_placed);
    VisionWardsBoughtInGame => "visionWardsBoughtInGame", |s| f64::from(s.vision_wards_bought_in_game);
    VisionScoreAdvantageLaneOpponent => "visionScoreAdvantageLaneOpponent", |s| s.vision_score_advantage_lane_opponent;
    VisionScorePerMinute => "visionScorePerMinute", |s| s.vision_score_per_minute;

    TotalTimeCCingOthers => "totalTimeCCingOthers", |s| s.total_time_cc_others;
    TotalHealsOnTeammates => "totalHealsOnTeammates", |s| s.total_heals_on_teammates;
    TotalDamageShieldedOnTeammates => "totalDamageShieldedOnTeammates", |s| s.total_damage_shielded_on_teammates;
    EnemyChampionImmobilizations => "enemyChampionImmobilizations", |s| s.enemy_champion_immobilizations;
    SaveAllyFromDeath => "saveAllyFromDeath", |s| s.save_ally_from_death;
    SkillshotsHit => "skillshotsHit", |s| s.skillshots_hit;
    DamageTakenOnTeamPercentage => "damageTakenOnTeamPercentage", |s| s.damage_taken_on_team_percentage;

    AssistMePings => "assistMePings", |s| f64::from(s.assist_me_pings);
    EnemyMissingPings => "enemyMissingPings", |s| f64::from(s.enemy_missing_pings);
    EnemyVisionPings => "enemyVisionPings", |s| f64::from(s.enemy_vision_pings);
    OnMyWayPings => "onMyWayPings", |s| f64::from(s.on_my_way_pings);
    VisionClearedPings => "visionClearedPings", |s| f64::from(s.vision_cleared_pings);

    ControlWardTimeCoverageInRiverOrEnemyHalf => "controlWardTimeCoverageInRiverOrEnemyHalf", |s| s.control_ward_time_coverage_in_river_or_enemy_half;
    HighestCrowdControlScore => "highestCrowdControlScore", |s| s.highest_crowd_control_score;
    ControlWardsPlaced => "controlWardsPlaced", |s| s.control_wards_placed;
    EffectiveHealAndShielding => "effectiveHealAndShielding", |s| s.effective_heal_and_shielding;
    ImmobilizeAndKillWithAlly => "immobilizeAndKillWithAlly", |s| s.immobilize_and_kill_with_ally;
    KnockEnemyIntoTeamAndKill => "knockEnemyIntoTeamAndKill", |s| s.knock_enemy_into_team_and_kill;
    StealthWardsPlaced => "stealthWardsPlaced", |s| s.stealth_wards_placed;
    WardsGuarded => "wardsGuarded", |s| s.wards_guarded;
    WardTakedowns => "wardTakedowns", |s| s.ward_takedowns;
    WardTakedownsBefore20M => "wardTakedownsBefore20M", |s| s.ward_takedowns_before_20m;
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Metric {
    type Err = AppError;

    /// Accepts the canonical key in any case, snake_case, or kebab-case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(name);
        Metric::ALL
            .iter()
            .copied()
            .find(|metric| fold_name(metric.key()) == folded)
            .ok_or_else(|| AppError::UnknownMetric(name.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_one_metric() {
        for alias in ["visionScore", "visionscore", "vision_score", "VISION_SCORE", "vision-score"] {
            assert_eq!(alias.parse::<Metric>().unwrap(), Metric::VisionScore);
        }
        assert_eq!(
            "kill_participation".parse::<Metric>().unwrap(),
            Metric::KillParticipation
        );
        assert_eq!(
            "vision_score_per_minute".parse::<Metric>().unwrap(),
            Metric::VisionScorePerMinute
        );
    }

    #[test]
    fn unknown_metric_is_rejected() {
        assert!(matches!(
            "pentakills".parse::<Metric>(),
            Err(AppError::UnknownMetric(name)) if name == "pentakills"
        ));
    }

    #[test]
    fn every_key_round_trips() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), *metric);
        }
    }

    #[test]
    fn support_stats_are_reachable_by_key() {
        let stats = StatRecord {
            save_ally_from_death: 2.0,
            enemy_champion_immobilizations: 14.0,
            assist_me_pings: 3,
            ward_takedowns_before_20m: 5.0,
            vision_wards_bought_in_game: 7,
            detector_wards_placed: 6,
            game_duration: 1800,
            ..Default::default()
        };
        let read = |name: &str| name.parse::<Metric>().unwrap().value(&stats);
        assert_eq!(read("saveAllyFromDeath"), 2.0);
        assert_eq!(read("enemy_champion_immobilizations"), 14.0);
        assert_eq!(read("assistMePings"), 3.0);
        assert_eq!(read("wardTakedownsBefore20M"), 5.0);
        assert_eq!(read("visionWardsBoughtInGame"), 7.0);
        assert_eq!(read("detector-wards-placed"), 6.0);
        assert_eq!(read("gameDuration"), 1800.0);
    }

    #[test]
    fn keys_are_distinct_after_folding() {
        let mut folded: Vec<String> = Metric::ALL.iter().map(|m| fold_name(m.key())).collect();
        folded.sort();
        folded.dedup();
        assert_eq!(folded.len(), Metric::ALL.len());
    }
}
