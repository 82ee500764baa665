use super::geometry::{distance, Position};
use super::model::{
    CombatEvent, CombatKind, DeathEvent, GoldSample, ItemEvent, ItemEventKind, ObjectiveTake,
    PathingPoint, TimelineBundle, VisionEvent, VisionKind,
};
use super::resolver::{enemy_team, BLUE_TEAM};
use crate::api::models::{EventDto, FrameDto, ItemEventDto, ObjectiveKillDto, TimelineDto};
use tracing::debug;

pub const EARLY_GAME_END_MS: i64 = 20 * 60 * 1000;

// Each team's own bottom-lane outer turret.
const BLUE_BOT_TOWER: Position = Position::new(10565, 1045);
const RED_BOT_TOWER: Position = Position::new(4325, 13865);

pub fn home_tower(team_id: i32) -> Position {
    if team_id == BLUE_TEAM {
        BLUE_BOT_TOWER
    } else {
        RED_BOT_TOWER
    }
}

/// Walks the frames of `timeline` and collects everything attributable to
/// `participant_id`. A missing timeline yields an empty bundle.
pub fn reconstruct(
    timeline: Option<&TimelineDto>,
    participant_id: i32,
    team_id: i32,
) -> TimelineBundle {
    let Some(timeline) = timeline else {
        debug!(participant_id, "no timeline available, returning empty bundle");
        return TimelineBundle::default();
    };

    let mut reconstructor = Reconstructor::new(participant_id, team_id);
    for frame in frames_in_order(timeline) {
        reconstructor.visit_frame(frame);
    }
    reconstructor.bundle
}

/// Frames by ascending timestamp; frames sharing a timestamp keep their order.
fn frames_in_order(timeline: &TimelineDto) -> Vec<&FrameDto> {
    let mut frames: Vec<&FrameDto> = timeline.info.frames.iter().collect();
    frames.sort_by_key(|frame| frame.timestamp);
    frames
}

/// `totalGold` samples for any participant, one per frame that reports it.
pub fn gold_timeline(timeline: Option<&TimelineDto>, participant_id: i32) -> Vec<GoldSample> {
    let Some(timeline) = timeline else {
        return Vec::new();
    };
    let key = participant_id.to_string();
    frames_in_order(timeline)
        .into_iter()
        .filter_map(|frame| {
            let gold = frame.participant_frames.get(&key)?.total_gold?;
            Some(GoldSample {
                timestamp: frame.timestamp,
                gold,
            })
        })
        .collect()
}

struct Reconstructor {
    participant_id: i32,
    frame_key: String,
    team_id: i32,
    enemy_team_id: i32,
    tower: Position,
    bundle: TimelineBundle,
}

impl Reconstructor {
    fn new(participant_id: i32, team_id: i32) -> Self {
        Reconstructor {
            participant_id,
            frame_key: participant_id.to_string(),
            team_id,
            enemy_team_id: enemy_team(team_id),
            tower: home_tower(team_id),
            bundle: TimelineBundle::default(),
        }
    }

    fn visit_frame(&mut self, frame: &FrameDto) {
        let timestamp = frame.timestamp;

        if let Some(participant_frame) = frame.participant_frames.get(&self.frame_key) {
            if let Some(position) = participant_frame.position {
                let point = PathingPoint {
                    timestamp,
                    position,
                    distance_from_tower: distance(&position, &self.tower).round() as i64,
                };
                if timestamp <= EARLY_GAME_END_MS {
                    self.bundle.early_game_pathing.push(point.clone());
                }
                self.bundle.full_game_pathing.push(point);
            }
            if let Some(gold) = participant_frame.total_gold {
                self.bundle.gold_timeline.push(GoldSample { timestamp, gold });
            }
        }

        for event in &frame.events {
            self.visit_event(timestamp, event);
        }
    }

    fn visit_event(&mut self, timestamp: i64, event: &EventDto) {
        let me = self.participant_id;
        match event {
            EventDto::SkillLevelUp(e) if e.participant_id == me => {
                self.bundle.skill_level_order.push(e.skill_slot);
            }
            EventDto::ItemPurchased(e) => self.item(timestamp, ItemEventKind::ItemPurchased, e),
            EventDto::ItemSold(e) => self.item(timestamp, ItemEventKind::ItemSold, e),
            EventDto::ItemUndo(e) => self.item(timestamp, ItemEventKind::ItemUndo, e),
            EventDto::WardPlaced(e) if e.creator_id == Some(me) => {
                self.bundle.vision_events.push(VisionEvent {
                    timestamp,
                    kind: VisionKind::Placed,
                    ward_type: e.ward_type.clone(),
                    position: e.position,
                });
            }
            EventDto::WardKilled(e) if e.killer_id == Some(me) => {
                self.bundle.vision_events.push(VisionEvent {
                    timestamp,
                    kind: VisionKind::Killed,
                    ward_type: e.ward_type.clone(),
                    position: e.position,
                });
            }
            EventDto::ChampionKill(e) => {
                // Victim, killer and assister are checked in that order; one
                // event never lands in more than one sequence.
                if e.victim_id == me {
                    self.bundle.death_positions.push(DeathEvent {
                        timestamp: if e.timestamp > 0 { e.timestamp } else { timestamp },
                        position: e.position,
                        killer_id: e.killer_id,
                        assisting_participant_ids: e.assisting_participant_ids.clone(),
                    });
                } else if e.killer_id == me {
                    self.combat(timestamp, CombatKind::Kill, e.position);
                } else if e.assisting_participant_ids.contains(&me) {
                    self.combat(timestamp, CombatKind::Assist, e.position);
                }
            }
            EventDto::EliteMonsterKill(e) | EventDto::BuildingKill(e) => {
                self.objective(timestamp, e);
            }
            _ => {}
        }
    }

    fn item(&mut self, timestamp: i64, kind: ItemEventKind, event: &ItemEventDto) {
        if event.participant_id != self.participant_id {
            return;
        }
        self.bundle.item_events.push(ItemEvent {
            timestamp,
            kind,
            item_id: event.item_id,
        });
    }

    fn combat(&mut self, timestamp: i64, kind: CombatKind, position: Option<Position>) {
        self.bundle.combat_events.push(CombatEvent {
            timestamp,
            kind,
            position,
        });
    }

    fn objective(&mut self, timestamp: i64, event: &ObjectiveKillDto) {
        let take = ObjectiveTake {
            timestamp,
            objective_type: event.objective_type().map(str::to_string),
            lane: event.lane_type.clone(),
            position: event.position,
        };
        match event.killer_team() {
            Some(team) if team == self.enemy_team_id => self.bundle.enemy_objective_takes.push(take),
            Some(team) if team == self.team_id => self.bundle.ally_objective_takes.push(take),
            _ => {}
        }
    }
}
