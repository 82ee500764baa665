use super::build::{build_path, ShoppingTrip};
use crate::engine::model::{AnalyzedMatch, CombatKind, VisionEvent, VisionKind};
use crate::error::{AnalysisError, AnalysisResult};
use crate::items::ItemCatalog;
use crate::plot::MapPlotter;
use serde::Serialize;
use std::path::PathBuf;

pub const LANE_DEATHS_CUTOFF_MS: i64 = 14 * 60 * 1000;
pub const LANING_PHASE_END_MS: i64 = 15 * 60 * 1000;

/// A report section that may be missing; serializes as the section itself or
/// as `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    Ready(T),
    Unavailable { error: String },
}

impl<T> From<AnalysisResult<T>> for Section<T> {
    fn from(result: AnalysisResult<T>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(e) => Section::Unavailable {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisionReport {
    pub vision_score: f64,
    pub wards_placed: i32,
    pub wards_killed: i32,
    pub control_wards_bought: i32,
    pub control_wards_placed: usize,
    pub stealth_wards_placed: usize,
}

fn placed(events: &[VisionEvent], ward_type: &str) -> usize {
    events
        .iter()
        .filter(|e| e.kind == VisionKind::Placed && e.ward_type.as_deref() == Some(ward_type))
        .count()
}

pub fn vision_control(record: &AnalyzedMatch) -> VisionReport {
    let events = &record.timeline.vision_events;
    VisionReport {
        vision_score: record.stats.vision_score,
        wards_placed: record.stats.wards_placed,
        wards_killed: record.stats.wards_killed,
        control_wards_bought: record.stats.vision_wards_bought_in_game,
        control_wards_placed: placed(events, "CONTROL_WARD"),
        stealth_wards_placed: placed(events, "SIGHT_WARD"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaningPhaseReport {
    pub deaths_before_14_mins: usize,
    pub ward_takedowns_before_20_mins: f64,
}

pub fn laning_phase(record: &AnalyzedMatch) -> LaningPhaseReport {
    LaningPhaseReport {
        deaths_before_14_mins: record
            .timeline
            .death_positions
            .iter()
            .filter(|d| d.timestamp <= LANE_DEATHS_CUTOFF_MS)
            .count(),
        ward_takedowns_before_20_mins: record.stats.ward_takedowns_before_20m,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub champion: String,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub vision_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaningBreakdown {
    #[serde(flatten)]
    pub phase: LaningPhaseReport,
    pub laning_kills: usize,
    pub laning_assists: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisionBreakdown {
    #[serde(flatten)]
    pub report: VisionReport,
    pub vision_events_log: Vec<VisionEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnalysis {
    pub match_id: String,
    pub match_summary: MatchSummary,
    pub laning_phase: LaningBreakdown,
    pub build_path: Section<Vec<ShoppingTrip>>,
    pub vision_report: VisionBreakdown,
    pub teamfight_map_path: Option<PathBuf>,
}

/// Everything known about one game in a single report. The plotter is an
/// external collaborator; its path is passed through untouched.
pub fn comprehensive_analysis(
    record: &AnalyzedMatch,
    catalog: &ItemCatalog,
    plotter: Option<&dyn MapPlotter>,
) -> GameAnalysis {
    let laning_combat = |kind: CombatKind| {
        record
            .timeline
            .combat_events
            .iter()
            .filter(|e| e.kind == kind && e.timestamp <= LANING_PHASE_END_MS)
            .count()
    };
    let stats = &record.stats;

    GameAnalysis {
        match_id: stats.match_id.clone(),
        match_summary: MatchSummary {
            champion: stats.champion.clone(),
            win: stats.win,
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            vision_score: stats.vision_score,
        },
        laning_phase: LaningBreakdown {
            phase: laning_phase(record),
            laning_kills: laning_combat(CombatKind::Kill),
            laning_assists: laning_combat(CombatKind::Assist),
        },
        build_path: build_path(record, catalog).into(),
        vision_report: VisionBreakdown {
            report: vision_control(record),
            vision_events_log: record.timeline.vision_events.clone(),
        },
        teamfight_map_path: plotter.and_then(|p| p.plot_combat(record)),
    }
}

/// Match id of the most recent stored game (`history` is oldest first).
pub fn latest_match_id(history: &[AnalyzedMatch]) -> AnalysisResult<&str> {
    history
        .last()
        .map(AnalyzedMatch::match_id)
        .ok_or_else(|| AnalysisError::NoData("No user data found. Please fetch games first.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::{CombatEvent, DeathEvent, StatRecord, TimelineBundle};

    fn vision(kind: VisionKind, ward_type: &str) -> VisionEvent {
        VisionEvent {
            timestamp: 0,
            kind,
            ward_type: Some(ward_type.to_string()),
            position: None,
        }
    }

    fn combat(timestamp: i64, kind: CombatKind) -> CombatEvent {
        CombatEvent {
            timestamp,
            kind,
            position: None,
        }
    }

    fn death(timestamp: i64) -> DeathEvent {
        DeathEvent {
            timestamp,
            position: None,
            killer_id: 1,
            assisting_participant_ids: Vec::new(),
        }
    }

    fn record() -> AnalyzedMatch {
        AnalyzedMatch {
            stats: StatRecord {
                match_id: "KR_5".to_string(),
                champion: "Renata".to_string(),
                vision_score: 88.0,
                wards_placed: 20,
                vision_wards_bought_in_game: 6,
                ward_takedowns_before_20m: 4.0,
                ..Default::default()
            },
            timeline: TimelineBundle {
                vision_events: vec![
                    vision(VisionKind::Placed, "CONTROL_WARD"),
                    vision(VisionKind::Placed, "SIGHT_WARD"),
                    vision(VisionKind::Placed, "SIGHT_WARD"),
                    vision(VisionKind::Killed, "CONTROL_WARD"),
                    vision(VisionKind::Placed, "YELLOW_TRINKET"),
                ],
                death_positions: vec![death(400_000), death(840_000), death(840_001)],
                combat_events: vec![
                    combat(300_000, CombatKind::Kill),
                    combat(500_000, CombatKind::Assist),
                    combat(900_000, CombatKind::Assist),
                    combat(900_001, CombatKind::Kill),
                ],
                ..Default::default()
            },
        }
    }

    #[test]
    fn vision_report_counts_placements_by_type() {
        let report = vision_control(&record());
        assert_eq!(report.control_wards_placed, 1);
        assert_eq!(report.stealth_wards_placed, 2);
        assert_eq!(report.control_wards_bought, 6);
    }

    #[test]
    fn laning_phase_counts_deaths_through_fourteen_minutes() {
        let report = laning_phase(&record());
        assert_eq!(report.deaths_before_14_mins, 2);
        assert_eq!(report.ward_takedowns_before_20_mins, 4.0);
    }

    #[test]
    fn comprehensive_report_embeds_sections() {
        let analysis = comprehensive_analysis(&record(), &ItemCatalog::default(), None);
        assert_eq!(analysis.laning_phase.laning_kills, 1);
        assert_eq!(analysis.laning_phase.laning_assists, 2);
        assert_eq!(analysis.vision_report.vision_events_log.len(), 5);
        assert!(analysis.teamfight_map_path.is_none());

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["build_path"]["error"], "No item purchase events found.");
        assert_eq!(json["laning_phase"]["deaths_before_14_mins"], 2);
    }

    #[test]
    fn latest_match_is_last_in_history() {
        let mut older = record();
        older.stats.match_id = "KR_4".to_string();
        assert_eq!(latest_match_id(&[older, record()]), Ok("KR_5"));
        assert!(latest_match_id(&[]).is_err());
    }
}
