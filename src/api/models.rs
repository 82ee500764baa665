use crate::engine::geometry::Position;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// Match V5 response
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub game_creation: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

/// Per-player aggregate stats. Several concepts are reported under more than
/// one name depending on the game patch, so those candidates stay optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub participant_id: i32,
    pub champion_id: i32,
    pub champion_name: String,
    pub team_id: i32,
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    pub win: bool,
    pub riot_id_game_name: Option<String>,
    pub summoner_name: Option<String>,

    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i64,

    pub item0: i32,
    pub item1: i32,
    pub item2: i32,
    pub item3: i32,
    pub item4: i32,
    pub item5: i32,
    pub item6: i32,

    pub vision_score: f64,
    pub wards_placed: i32,
    pub wards_killed: i32,
    pub detector_wards_placed: i32,
    pub vision_wards_bought_in_game: i32,

    pub assist_me_pings: i32,
    pub enemy_missing_pings: i32,
    pub enemy_vision_pings: i32,
    pub on_my_way_pings: i32,
    pub vision_cleared_pings: i32,

    #[serde(rename = "totalTimeCCingOthers")]
    pub total_time_cc_others: Option<f64>,
    #[serde(rename = "timeCCingOthers")]
    pub time_cc_others: Option<f64>,
    pub total_damage_shielded_on_teammates: Option<f64>,
    pub total_damage_shielded: Option<f64>,
    pub total_heals_on_teammates: Option<f64>,

    pub challenges: HashMap<String, Value>,
}

impl ParticipantDto {
    pub fn items(&self) -> [i32; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }

    /// Numeric challenge value; booleans and arrays in the bag read as absent.
    pub fn challenge(&self, key: &str) -> Option<f64> {
        self.challenges.get(key).and_then(Value::as_f64)
    }
}

// Match V5 timeline response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineDto {
    pub metadata: TimelineMetadata,
    pub info: TimelineInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineInfo {
    pub frames: Vec<FrameDto>,
    pub participants: Vec<TimelineParticipantDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineParticipantDto {
    pub participant_id: i32,
    pub puuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameDto {
    pub timestamp: i64,
    /// Keyed by participant id as a string ("1".."10").
    pub participant_frames: BTreeMap<String, ParticipantFrameDto>,
    pub events: Vec<EventDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantFrameDto {
    pub participant_id: i32,
    pub position: Option<Position>,
    pub total_gold: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventDto {
    SkillLevelUp(SkillLevelUpDto),
    ItemPurchased(ItemEventDto),
    ItemSold(ItemEventDto),
    ItemUndo(ItemEventDto),
    WardPlaced(WardEventDto),
    WardKilled(WardEventDto),
    ChampionKill(ChampionKillDto),
    EliteMonsterKill(ObjectiveKillDto),
    BuildingKill(ObjectiveKillDto),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillLevelUpDto {
    pub timestamp: i64,
    pub participant_id: i32,
    pub skill_slot: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemEventDto {
    pub timestamp: i64,
    pub participant_id: i32,
    pub item_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WardEventDto {
    pub timestamp: i64,
    pub creator_id: Option<i32>,
    pub killer_id: Option<i32>,
    pub ward_type: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampionKillDto {
    pub timestamp: i64,
    pub killer_id: i32,
    pub victim_id: i32,
    pub assisting_participant_ids: Vec<i32>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectiveKillDto {
    pub timestamp: i64,
    pub killer_team_id: Option<i32>,
    pub team_id: Option<i32>,
    pub monster_type: Option<String>,
    pub building_type: Option<String>,
    pub lane_type: Option<String>,
    pub position: Option<Position>,
}

impl ObjectiveKillDto {
    pub fn killer_team(&self) -> Option<i32> {
        self.killer_team_id.or(self.team_id)
    }

    pub fn objective_type(&self) -> Option<&str> {
        self.monster_type
            .as_deref()
            .or(self.building_type.as_deref())
    }
}

// Data Dragon item.json response
#[derive(Debug, Deserialize)]
pub struct DataDragonItems {
    #[serde(default)]
    pub version: String,
    pub data: HashMap<String, DataDragonItem>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataDragonItem {
    pub name: String,
    #[serde(default)]
    pub plaintext: String,
    #[serde(default)]
    pub gold: Option<DataDragonGold>,
    #[serde(default)]
    pub image: Option<DataDragonImage>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataDragonGold {
    #[serde(default)]
    pub total: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataDragonImage {
    pub full: String,
}
