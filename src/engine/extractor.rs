//! Flattens one participant's aggregate match stats into a [`StatRecord`].
//!
//! Some concepts are reported under different names across patches. Each of
//! those is resolved through a [`Fallback`] chain: candidates are read in the
//! declared order and the first present, non-zero value wins. The chains are
//! part of the stored output format, so reordering them changes history.

use super::model::{RosterEntry, StatRecord};
use crate::api::models::{MatchDto, ParticipantDto};
use tracing::debug;

#[derive(Clone, Copy)]
pub enum FieldSource {
    Participant(&'static str, fn(&ParticipantDto) -> Option<f64>),
    Challenge(&'static str),
}

impl FieldSource {
    pub fn name(&self) -> &'static str {
        match self {
            FieldSource::Participant(name, _) => name,
            FieldSource::Challenge(name) => name,
        }
    }

    fn read(&self, participant: &ParticipantDto) -> Option<f64> {
        match self {
            FieldSource::Participant(_, get) => get(participant),
            FieldSource::Challenge(key) => participant.challenge(key),
        }
    }
}

pub struct Fallback {
    pub concept: &'static str,
    pub sources: &'static [FieldSource],
}

impl Fallback {
    pub fn resolve(&self, participant: &ParticipantDto) -> f64 {
        for source in self.sources {
            match source.read(participant) {
                Some(value) if value != 0.0 => {
                    debug!(concept = self.concept, source = source.name(), value, "fallback resolved");
                    return value;
                }
                _ => {}
            }
        }
        0.0
    }
}

pub const CC_TIME: Fallback = Fallback {
    concept: "totalTimeCCingOthers",
    sources: &[
        FieldSource::Participant("totalTimeCCingOthers", |p| p.total_time_cc_others),
        FieldSource::Participant("timeCCingOthers", |p| p.time_cc_others),
        FieldSource::Challenge("totalTimeCCDealt"),
    ],
};

pub const SHIELDING: Fallback = Fallback {
    concept: "totalDamageShieldedOnTeammates",
    sources: &[
        FieldSource::Participant("totalDamageShieldedOnTeammates", |p| {
            p.total_damage_shielded_on_teammates
        }),
        FieldSource::Participant("totalDamageShielded", |p| p.total_damage_shielded),
        FieldSource::Challenge("effectiveHealAndShielding"),
    ],
};

pub const HEALING: Fallback = Fallback {
    concept: "totalHealsOnTeammates",
    sources: &[
        FieldSource::Participant("totalHealsOnTeammates", |p| p.total_heals_on_teammates),
        FieldSource::Challenge("effectiveHealAndShielding"),
    ],
};

fn non_empty(name: &Option<String>) -> Option<String> {
    name.as_ref().filter(|n| !n.is_empty()).cloned()
}

fn roster_entry(p: &ParticipantDto) -> RosterEntry {
    RosterEntry {
        participant_id: p.participant_id,
        puuid: p.puuid.clone(),
        champion_name: p.champion_name.clone(),
        team_position: p.team_position.clone(),
        team_id: p.team_id,
        win: p.win,
        kills: p.kills,
        deaths: p.deaths,
        assists: p.assists,
        gold_earned: p.gold_earned,
        item0: p.item0,
        gold_timeline: Vec::new(),
    }
}

/// Returns `None` when `puuid` did not play in the match.
pub fn extract_stats(match_data: &MatchDto, puuid: &str) -> Option<StatRecord> {
    let p = match_data
        .info
        .participants
        .iter()
        .find(|p| p.puuid == puuid)?;
    let challenge = |key: &str| p.challenge(key).unwrap_or(0.0);

    Some(StatRecord {
        match_id: match_data.metadata.match_id.clone(),
        puuid: p.puuid.clone(),
        player_name: non_empty(&p.riot_id_game_name).or_else(|| non_empty(&p.summoner_name)),
        champion: p.champion_name.clone(),
        team_id: p.team_id,
        team_position: p.team_position.clone(),
        win: p.win,
        game_duration: match_data.info.game_duration,
        game_creation: match_data.info.game_creation,
        all_participants: match_data.info.participants.iter().map(roster_entry).collect(),

        kills: p.kills,
        deaths: p.deaths,
        assists: p.assists,
        kill_participation: challenge("killParticipation"),
        gold_earned: p.gold_earned,

        items: p.items(),

        vision_score: p.vision_score,
        wards_placed: p.wards_placed,
        wards_killed: p.wards_killed,
        detector_wards_placed: p.detector_wards_placed,
        vision_wards_bought_in_game: p.vision_wards_bought_in_game,
        vision_score_advantage_lane_opponent: challenge("visionScoreAdvantageLaneOpponent"),
        vision_score_per_minute: challenge("visionScorePerMinute"),

        total_time_cc_others: CC_TIME.resolve(p),
        total_heals_on_teammates: HEALING.resolve(p),
        total_damage_shielded_on_teammates: SHIELDING.resolve(p),
        enemy_champion_immobilizations: challenge("enemyChampionImmobilizations"),
        save_ally_from_death: challenge("saveAllyFromDeath"),
        skillshots_hit: challenge("skillshotsHit"),
        damage_taken_on_team_percentage: challenge("damageTakenOnTeamPercentage"),

        assist_me_pings: p.assist_me_pings,
        enemy_missing_pings: p.enemy_missing_pings,
        enemy_vision_pings: p.enemy_vision_pings,
        on_my_way_pings: p.on_my_way_pings,
        vision_cleared_pings: p.vision_cleared_pings,

        control_ward_time_coverage_in_river_or_enemy_half: challenge(
            "controlWardTimeCoverageInRiverOrEnemyHalf",
        ),
        highest_crowd_control_score: challenge("highestCrowdControlScore"),
        control_wards_placed: challenge("controlWardsPlaced"),
        effective_heal_and_shielding: challenge("effectiveHealAndShielding"),
        immobilize_and_kill_with_ally: challenge("immobilizeAndKillWithAlly"),
        knock_enemy_into_team_and_kill: challenge("knockEnemyIntoTeamAndKill"),
        stealth_wards_placed: challenge("stealthWardsPlaced"),
        wards_guarded: challenge("wardsGuarded"),
        ward_takedowns: challenge("wardTakedowns"),
        ward_takedowns_before_20m: challenge("wardTakedownsBefore20M"),
    })
}
