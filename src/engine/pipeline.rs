use super::extractor::extract_stats;
use super::model::AnalyzedMatch;
use super::resolver::resolve_participant;
use super::timeline::{gold_timeline, reconstruct};
use crate::api::models::{MatchDto, TimelineDto};
use crate::error::AppError;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Where raw matches are downloaded from.
pub trait MatchSource {
    /// `Ok(None)` means the match does not exist.
    fn fetch_match(&self, match_id: &str) -> Result<Option<MatchDto>, AppError>;
    fn fetch_timeline(&self, match_id: &str) -> Option<TimelineDto>;
}

/// A fetched match and its timeline, if the timeline could be fetched.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub detail: MatchDto,
    pub timeline: Option<TimelineDto>,
}

/// Builds the analyzed record for `puuid`, or `None` if they did not play.
pub fn analyze_match(
    detail: &MatchDto,
    timeline: Option<&TimelineDto>,
    puuid: &str,
) -> Option<AnalyzedMatch> {
    let Some(seat) = resolve_participant(detail, puuid) else {
        debug!(match_id = %detail.metadata.match_id, "player not in match");
        return None;
    };
    let mut stats = extract_stats(detail, puuid)?;

    if timeline.is_none() {
        warn!(match_id = %detail.metadata.match_id, "timeline missing, keeping stats only");
    }
    let bundle = reconstruct(timeline, seat.participant_id, seat.team_id);
    for entry in &mut stats.all_participants {
        entry.gold_timeline = gold_timeline(timeline, entry.participant_id);
    }

    Some(AnalyzedMatch {
        stats,
        timeline: bundle,
    })
}

/// Whether `puuid` played `position` (e.g. `UTILITY`) in this match.
pub fn plays_position(detail: &MatchDto, puuid: &str, position: &str) -> bool {
    detail
        .info
        .participants
        .iter()
        .any(|p| p.puuid == puuid && p.team_position.eq_ignore_ascii_case(position))
}

/// Downloads each match and its timeline. A match that fails to download is
/// logged and skipped. With a `position`, off-role matches are dropped before
/// their timeline is requested. `on_fetched` runs once per id.
pub fn collect_raw_matches<S: MatchSource + ?Sized>(
    source: &S,
    match_ids: &[String],
    puuid: &str,
    position: Option<&str>,
    mut on_fetched: impl FnMut(),
) -> Vec<RawMatch> {
    let mut raw = Vec::with_capacity(match_ids.len());
    for match_id in match_ids {
        let fetched = source.fetch_match(match_id);
        on_fetched();
        let detail = match fetched {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                warn!(match_id = %match_id, "match not found, skipping");
                continue;
            }
            Err(e) => {
                warn!(match_id = %match_id, error = %e, "failed to fetch match, skipping");
                continue;
            }
        };
        if let Some(position) = position {
            if !plays_position(&detail, puuid, position) {
                debug!(match_id = %match_id, position, "off-role match, skipping");
                continue;
            }
        }
        let timeline = source.fetch_timeline(match_id);
        raw.push(RawMatch { detail, timeline });
    }
    raw
}

/// Analyzes every match independently; output order follows input order.
pub fn analyze_batch(matches: &[RawMatch], puuid: &str) -> Vec<AnalyzedMatch> {
    matches
        .par_iter()
        .filter_map(|raw| analyze_match(&raw.detail, raw.timeline.as_ref(), puuid))
        .collect()
}
