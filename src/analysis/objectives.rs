use super::{ms_to_min_sec, title_case};
use crate::engine::geometry::distance;
use crate::engine::model::{AnalyzedMatch, ObjectiveTake, PathingPoint};
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

pub const PRESENT_RADIUS: f64 = 3000.0;
pub const OPPOSITE_SIDE_RADIUS: f64 = 8000.0;
pub const CRITICAL_WINDOW_MS: i64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Proximity {
    Present,
    Nearby,
    OppositeSide,
}

impl Proximity {
    /// Below 3000 is present, above 8000 is the opposite side.
    pub fn classify(distance: f64) -> Self {
        if distance < PRESENT_RADIUS {
            Proximity::Present
        } else if distance > OPPOSITE_SIDE_RADIUS {
            Proximity::OppositeSide
        } else {
            Proximity::Nearby
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Proximity::Present => "You were present at the objective.",
            Proximity::Nearby => "You were nearby, but not directly at the objective.",
            Proximity::OppositeSide => "You were on the opposite side of the map.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    fn label(&self) -> &'static str {
        match self {
            Side::Ally => "Ally",
            Side::Enemy => "Enemy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveInsight {
    pub timestamp: i64,
    pub team: Side,
    pub objective_type: String,
    pub distance: f64,
    pub proximity: Proximity,
    pub insight: String,
}

/// Pathing sample closest in time to `timestamp`; the earlier one wins ties.
pub fn closest_point(pathing: &[PathingPoint], timestamp: i64) -> Option<&PathingPoint> {
    pathing
        .iter()
        .enumerate()
        .min_by_key(|(index, p)| ((p.timestamp - timestamp).abs(), *index))
        .map(|(_, p)| p)
}

/// Where the player stood whenever a dragon or baron fell.
pub fn objective_proximity(record: &AnalyzedMatch) -> AnalysisResult<Vec<ObjectiveInsight>> {
    let tagged = |takes: &[ObjectiveTake], side: Side| -> Vec<(Side, ObjectiveTake)> {
        takes
            .iter()
            .filter(|o| o.is_epic_monster())
            .map(|o| (side, o.clone()))
            .collect()
    };
    let mut objectives = tagged(&record.timeline.ally_objective_takes, Side::Ally);
    objectives.extend(tagged(&record.timeline.enemy_objective_takes, Side::Enemy));
    if objectives.is_empty() {
        return Err(AnalysisError::NoData(
            "No Dragon or Baron takes were found in this game's timeline data.".to_string(),
        ));
    }

    let pathing = &record.timeline.full_game_pathing;
    if pathing.is_empty() {
        return Err(AnalysisError::NoData(
            "No pathing data available to analyze proximity.".to_string(),
        ));
    }

    objectives.sort_by_key(|(_, o)| o.timestamp);
    let insights = objectives
        .into_iter()
        .filter_map(|(side, objective)| {
            let objective_position = objective.position?;
            let player = closest_point(pathing, objective.timestamp)?;
            let d = distance(&player.position, &objective_position);
            let proximity = Proximity::classify(d);
            let objective_type = title_case(objective.objective_type.as_deref().unwrap_or("OBJECTIVE"));
            Some(ObjectiveInsight {
                timestamp: objective.timestamp,
                team: side,
                insight: format!(
                    "At {}, the {} team took a {}. {}",
                    ms_to_min_sec(objective.timestamp),
                    side.label(),
                    objective_type,
                    proximity.describe()
                ),
                objective_type,
                distance: d,
                proximity,
            })
        })
        .collect();
    Ok(insights)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalMoment {
    pub death_timestamp: i64,
    pub objective_timestamp: i64,
    pub objective_type: String,
    pub description: String,
}

/// Deaths followed within a minute by an enemy objective.
pub fn critical_moments(record: &AnalyzedMatch) -> Vec<CriticalMoment> {
    let mut moments = Vec::new();
    for death in &record.timeline.death_positions {
        for objective in &record.timeline.enemy_objective_takes {
            let gap = objective.timestamp - death.timestamp;
            if gap > 0 && gap <= CRITICAL_WINDOW_MS {
                let objective_type = title_case(objective.objective_type.as_deref().unwrap_or("OBJECTIVE"));
                moments.push(CriticalMoment {
                    death_timestamp: death.timestamp,
                    objective_timestamp: objective.timestamp,
                    description: format!(
                        "At {}, a death was followed by the enemy taking a {} within a minute. This suggests the death created a critical opening.",
                        ms_to_min_sec(death.timestamp),
                        objective_type
                    ),
                    objective_type,
                });
            }
        }
    }
    moments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Position;
    use crate::engine::model::{DeathEvent, TimelineBundle};

    fn take(timestamp: i64, kind: &str, position: Option<Position>) -> ObjectiveTake {
        ObjectiveTake {
            timestamp,
            objective_type: Some(kind.to_string()),
            lane: None,
            position,
        }
    }

    fn point(timestamp: i64, x: i32, y: i32) -> PathingPoint {
        PathingPoint {
            timestamp,
            position: Position::new(x, y),
            distance_from_tower: 0,
        }
    }

    fn death(timestamp: i64) -> DeathEvent {
        DeathEvent {
            timestamp,
            position: None,
            killer_id: 7,
            assisting_participant_ids: Vec::new(),
        }
    }

    #[test]
    fn proximity_bands() {
        assert_eq!(Proximity::classify(2500.0), Proximity::Present);
        assert_eq!(Proximity::classify(9000.0), Proximity::OppositeSide);
        assert_eq!(Proximity::classify(5000.0), Proximity::Nearby);
        assert_eq!(Proximity::classify(3000.0), Proximity::Nearby);
        assert_eq!(Proximity::classify(8000.0), Proximity::Nearby);
    }

    #[test]
    fn closest_point_prefers_earlier_on_tie() {
        let pathing = vec![point(60_000, 1, 1), point(120_000, 2, 2)];
        assert_eq!(closest_point(&pathing, 90_000).unwrap().timestamp, 60_000);
        assert_eq!(closest_point(&pathing, 100_000).unwrap().timestamp, 120_000);
        assert!(closest_point(&[], 0).is_none());
    }

    #[test]
    fn classifies_each_epic_objective() {
        let record = AnalyzedMatch {
            timeline: TimelineBundle {
                full_game_pathing: vec![point(600_000, 0, 0), point(1_200_000, 0, 0), point(1_500_000, 0, 0)],
                ally_objective_takes: vec![
                    take(610_000, "DRAGON", Some(Position::new(1500, 2000))),
                    take(700_000, "RIFTHERALD", Some(Position::new(0, 0))),
                ],
                enemy_objective_takes: vec![
                    take(1_490_000, "BARON_NASHOR", Some(Position::new(5400, 7200))),
                    take(1_190_000, "DRAGON", Some(Position::new(3000, 4000))),
                    take(1_300_000, "DRAGON", None),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let insights = objective_proximity(&record).unwrap();
        let summary: Vec<_> = insights.iter().map(|i| (i.team, i.proximity)).collect();
        assert_eq!(
            summary,
            vec![
                (Side::Ally, Proximity::Present),
                (Side::Enemy, Proximity::Nearby),
                (Side::Enemy, Proximity::OppositeSide),
            ]
        );
        assert_eq!(
            insights[2].insight,
            "At 24:50, the Enemy team took a Baron Nashor. You were on the opposite side of the map."
        );
    }

    #[test]
    fn no_epic_objectives_is_reported() {
        let record = AnalyzedMatch::default();
        assert!(matches!(objective_proximity(&record), Err(AnalysisError::NoData(_))));
    }

    #[test]
    fn deaths_shortly_before_enemy_objectives_are_critical() {
        let record = AnalyzedMatch {
            timeline: TimelineBundle {
                death_positions: vec![death(100_000)],
                enemy_objective_takes: vec![
                    take(140_000, "DRAGON", None),
                    take(170_000, "BARON_NASHOR", None),
                    take(90_000, "RIFTHERALD", None),
                    take(100_000, "TOWER_BUILDING", None),
                    take(160_000, "HORDE", None),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let moments = critical_moments(&record);
        let flagged: Vec<_> = moments.iter().map(|m| m.objective_timestamp).collect();
        assert_eq!(flagged, vec![140_000, 160_000]);
        assert!(moments[0].description.starts_with("At 01:40, a death was followed by the enemy taking a Dragon"));
    }
}
