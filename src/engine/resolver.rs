use crate::api::models::{MatchDto, TimelineDto};

pub const BLUE_TEAM: i32 = 100;
pub const RED_TEAM: i32 = 200;

/// A player's seat inside a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub participant_id: i32,
    pub team_id: i32,
}

pub fn enemy_team(team_id: i32) -> i32 {
    if team_id == BLUE_TEAM {
        RED_TEAM
    } else {
        BLUE_TEAM
    }
}

/// Anything that lists the ten participants of a match.
pub trait ParticipantDirectory {
    fn seat_of(&self, puuid: &str) -> Option<Seat>;
}

impl ParticipantDirectory for MatchDto {
    fn seat_of(&self, puuid: &str) -> Option<Seat> {
        self.info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| Seat {
                participant_id: p.participant_id,
                team_id: p.team_id,
            })
    }
}

impl ParticipantDirectory for TimelineDto {
    fn seat_of(&self, puuid: &str) -> Option<Seat> {
        // Timeline participants carry no team: seats 1-5 are blue, 6-10 red.
        self.info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| Seat {
                participant_id: p.participant_id,
                team_id: if p.participant_id <= 5 { BLUE_TEAM } else { RED_TEAM },
            })
    }
}

/// Returns the seat for `puuid`, or `None` when the player was not in the match.
pub fn resolve_participant<D: ParticipantDirectory + ?Sized>(
    directory: &D,
    puuid: &str,
) -> Option<Seat> {
    directory.seat_of(puuid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{
        MatchInfo, MatchMetadata, ParticipantDto, TimelineInfo, TimelineParticipantDto,
    };

    fn match_with(puuids: &[(&str, i32, i32)]) -> MatchDto {
        MatchDto {
            metadata: MatchMetadata {
                match_id: "NA1_1".to_string(),
            },
            info: MatchInfo {
                game_duration: 1800,
                game_creation: 0,
                participants: puuids
                    .iter()
                    .map(|(puuid, id, team)| ParticipantDto {
                        puuid: puuid.to_string(),
                        participant_id: *id,
                        team_id: *team,
                        ..Default::default()
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn resolves_seat_from_match() {
        let m = match_with(&[("a", 1, 100), ("b", 7, 200)]);
        assert_eq!(
            resolve_participant(&m, "b"),
            Some(Seat {
                participant_id: 7,
                team_id: 200
            })
        );
    }

    #[test]
    fn absent_player_is_none() {
        let m = match_with(&[("a", 1, 100)]);
        assert_eq!(resolve_participant(&m, "zzz"), None);
    }

    #[test]
    fn timeline_seat_infers_team_from_id() {
        let timeline = TimelineDto {
            info: TimelineInfo {
                participants: vec![
                    TimelineParticipantDto {
                        participant_id: 4,
                        puuid: "blue".to_string(),
                    },
                    TimelineParticipantDto {
                        participant_id: 9,
                        puuid: "red".to_string(),
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve_participant(&timeline, "blue").map(|s| s.team_id), Some(100));
        assert_eq!(resolve_participant(&timeline, "red").map(|s| s.team_id), Some(200));
    }

    #[test]
    fn enemy_team_flips() {
        assert_eq!(enemy_team(100), 200);
        assert_eq!(enemy_team(200), 100);
    }
}
