use super::averages::average_stat;
use super::metric::Metric;
use crate::engine::model::AnalyzedMatch;
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

const VISION_MARGIN: f64 = 1.15;
const KILL_PARTICIPATION_MARGIN: f64 = 1.10;
const HIGH_DEATHS_MARGIN: f64 = 1.20;
const LOW_DEATHS_MARGIN: f64 = 0.80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaystyleReport {
    pub inferred_playstyle: String,
    pub evidence: Vec<String>,
}

impl PlaystyleReport {
    pub fn supporting_evidence(&self) -> String {
        self.evidence.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaystyleAverages {
    pub vision_score: f64,
    pub kill_participation: f64,
    pub deaths: f64,
}

impl PlaystyleAverages {
    pub fn from_matches(matches: &[AnalyzedMatch], champion: &str) -> Self {
        PlaystyleAverages {
            vision_score: average_stat(matches, Metric::VisionScore, Some(champion)),
            kill_participation: average_stat(matches, Metric::KillParticipation, Some(champion)),
            deaths: average_stat(matches, Metric::Deaths, Some(champion)),
        }
    }
}

/// Labels the user against the reference averages. The rules run in a fixed
/// order and a later label replaces an earlier one, while every rule that
/// fires still contributes its evidence.
pub fn classify_playstyle(user: PlaystyleAverages, reference: PlaystyleAverages) -> PlaystyleReport {
    let mut playstyle = "Balanced";
    let mut evidence = Vec::new();

    if user.vision_score > reference.vision_score * VISION_MARGIN {
        playstyle = "Vision-Focused Controller";
        evidence.push(format!(
            "Your average Vision Score ({:.2}) is higher than the pro average ({:.2}).",
            user.vision_score, reference.vision_score
        ));
    }
    if user.kill_participation > reference.kill_participation * KILL_PARTICIPATION_MARGIN {
        playstyle = "Aggressive Playmaker";
        evidence.push(format!(
            "Your Kill Participation ({:.2}%) is higher than the pro average ({:.2}%).",
            user.kill_participation * 100.0,
            reference.kill_participation * 100.0
        ));
    }
    if user.deaths > reference.deaths * HIGH_DEATHS_MARGIN {
        evidence.push(format!(
            "You tend to have more deaths ({:.2}) than pros, suggesting a high-risk style.",
            user.deaths
        ));
    } else if user.deaths < reference.deaths * LOW_DEATHS_MARGIN {
        playstyle = "Safe/Defensive Player";
        evidence.push(format!(
            "Your average deaths ({:.2}) are lower than the pro average ({:.2}).",
            user.deaths, reference.deaths
        ));
    }
    if evidence.is_empty() {
        evidence.push("Your stats are very similar to pro averages.".to_string());
    }

    PlaystyleReport {
        inferred_playstyle: playstyle.to_string(),
        evidence,
    }
}

pub fn determine_playstyle(
    user_matches: &[AnalyzedMatch],
    reference_matches: &[AnalyzedMatch],
    champion: &str,
) -> AnalysisResult<PlaystyleReport> {
    let user = PlaystyleAverages::from_matches(user_matches, champion);
    let reference = PlaystyleAverages::from_matches(reference_matches, champion);

    if user.vision_score == 0.0 || reference.vision_score == 0.0 {
        return Err(AnalysisError::NoData(format!(
            "Not enough data for {} to determine a playstyle.",
            champion
        )));
    }

    Ok(classify_playstyle(user, reference))
}
