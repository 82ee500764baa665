//! Derived records produced by the engine. Everything here is plain data that
//! serializes straight to the flat per-player JSON store.

use super::geometry::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathingPoint {
    pub timestamp: i64,
    pub position: Position,
    pub distance_from_tower: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathEvent {
    pub timestamp: i64,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub killer_id: i32,
    #[serde(default)]
    pub assisting_participant_ids: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatKind {
    Kill,
    Assist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: CombatKind,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveTake {
    pub timestamp: i64,
    #[serde(rename = "type", default)]
    pub objective_type: Option<String>,
    #[serde(default)]
    pub lane: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl ObjectiveTake {
    /// Dragons (any element) and Baron are the epic objectives.
    pub fn is_epic_monster(&self) -> bool {
        self.objective_type
            .as_deref()
            .map(|t| t.contains("DRAGON") || t.contains("BARON_NASHOR"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisionKind {
    Placed,
    Killed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionEvent {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: VisionKind,
    #[serde(default)]
    pub ward_type: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemEventKind {
    ItemPurchased,
    ItemSold,
    ItemUndo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEvent {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: ItemEventKind,
    #[serde(rename = "itemId", default)]
    pub item_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldSample {
    pub timestamp: i64,
    pub gold: i64,
}

/// One participant's view of a match timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineBundle {
    pub early_game_pathing: Vec<PathingPoint>,
    pub full_game_pathing: Vec<PathingPoint>,
    pub death_positions: Vec<DeathEvent>,
    pub enemy_objective_takes: Vec<ObjectiveTake>,
    pub ally_objective_takes: Vec<ObjectiveTake>,
    /// Skill slots 1-4 (Q/W/E/R) in the order they were levelled.
    pub skill_level_order: Vec<i32>,
    pub vision_events: Vec<VisionEvent>,
    pub item_events: Vec<ItemEvent>,
    pub combat_events: Vec<CombatEvent>,
    pub gold_timeline: Vec<GoldSample>,
}

impl TimelineBundle {
    pub fn is_empty(&self) -> bool {
        self.full_game_pathing.is_empty()
            && self.death_positions.is_empty()
            && self.enemy_objective_takes.is_empty()
            && self.ally_objective_takes.is_empty()
            && self.skill_level_order.is_empty()
            && self.vision_events.is_empty()
            && self.item_events.is_empty()
            && self.combat_events.is_empty()
            && self.gold_timeline.is_empty()
    }
}

/// Summary of one of the ten players, kept for opponent and matchup lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterEntry {
    pub participant_id: i32,
    pub puuid: String,
    pub champion_name: String,
    pub team_position: String,
    pub team_id: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i64,
    pub item0: i32,
    pub gold_timeline: Vec<GoldSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatRecord {
    pub match_id: String,
    pub puuid: String,
    pub player_name: Option<String>,
    pub champion: String,
    pub team_id: i32,
    pub team_position: String,
    pub win: bool,
    pub game_duration: i64,
    pub game_creation: i64,
    pub all_participants: Vec<RosterEntry>,

    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kill_participation: f64,
    pub gold_earned: i64,

    /// Final loadout, slots 0-5 plus the trinket in slot 6.
    pub items: [i32; 7],

    pub vision_score: f64,
    pub wards_placed: i32,
    pub wards_killed: i32,
    pub detector_wards_placed: i32,
    pub vision_wards_bought_in_game: i32,
    pub vision_score_advantage_lane_opponent: f64,
    pub vision_score_per_minute: f64,

    #[serde(rename = "totalTimeCCingOthers")]
    pub total_time_cc_others: f64,
    pub total_heals_on_teammates: f64,
    pub total_damage_shielded_on_teammates: f64,
    pub enemy_champion_immobilizations: f64,
    pub save_ally_from_death: f64,
    pub skillshots_hit: f64,
    pub damage_taken_on_team_percentage: f64,

    pub assist_me_pings: i32,
    pub enemy_missing_pings: i32,
    pub enemy_vision_pings: i32,
    pub on_my_way_pings: i32,
    pub vision_cleared_pings: i32,

    pub control_ward_time_coverage_in_river_or_enemy_half: f64,
    pub highest_crowd_control_score: f64,
    pub control_wards_placed: f64,
    pub effective_heal_and_shielding: f64,
    pub immobilize_and_kill_with_ally: f64,
    pub knock_enemy_into_team_and_kill: f64,
    pub stealth_wards_placed: f64,
    pub wards_guarded: f64,
    pub ward_takedowns: f64,
    #[serde(rename = "wardTakedownsBefore20M")]
    pub ward_takedowns_before_20m: f64,
}

impl StatRecord {
    pub fn roster_entry(&self, puuid: &str) -> Option<&RosterEntry> {
        self.all_participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn roster_champion(&self, champion_name: &str) -> Option<&RosterEntry> {
        self.all_participants
            .iter()
            .find(|p| p.champion_name == champion_name)
    }
}

/// Stats and timeline bundle for one (player, match) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedMatch {
    #[serde(flatten)]
    pub stats: StatRecord,
    #[serde(flatten)]
    pub timeline: TimelineBundle,
}

impl AnalyzedMatch {
    pub fn match_id(&self) -> &str {
        &self.stats.match_id
    }

    pub fn is_champion(&self, champion_name: &str) -> bool {
        self.stats.champion.eq_ignore_ascii_case(champion_name)
    }
}
