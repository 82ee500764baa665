use crate::engine::model::{AnalyzedMatch, CombatEvent, DeathEvent, PathingPoint};
use crate::store::save_records;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Renders map artifacts for a match. Implementations return the path of
/// what they produced, or `None` if nothing could be drawn.
pub trait MapPlotter {
    fn plot_combat(&self, record: &AnalyzedMatch) -> Option<PathBuf>;
    fn plot_pathing(&self, record: &AnalyzedMatch) -> Option<PathBuf>;
}

#[derive(Serialize)]
struct CombatPlot<'a> {
    match_id: &'a str,
    champion: &'a str,
    deaths: &'a [DeathEvent],
    combat_events: &'a [CombatEvent],
}

#[derive(Serialize)]
struct PathingPlot<'a> {
    match_id: &'a str,
    champion: &'a str,
    early_game_pathing: &'a [PathingPoint],
    full_game_pathing: &'a [PathingPoint],
}

/// Writes the plotted subset of a match as JSON for an external renderer.
pub struct JsonPlotExporter {
    out_dir: PathBuf,
}

impl JsonPlotExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        JsonPlotExporter {
            out_dir: out_dir.into(),
        }
    }

    fn write<T: Serialize>(&self, name: String, plot: T) -> Option<PathBuf> {
        let path = self.out_dir.join(name);
        match save_records(&path, &[plot]) {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to export plot data");
                None
            }
        }
    }
}

impl MapPlotter for JsonPlotExporter {
    fn plot_combat(&self, record: &AnalyzedMatch) -> Option<PathBuf> {
        let timeline = &record.timeline;
        if timeline.death_positions.is_empty() && timeline.combat_events.is_empty() {
            return None;
        }
        self.write(
            format!("{}_combat.json", record.match_id()),
            CombatPlot {
                match_id: record.match_id(),
                champion: &record.stats.champion,
                deaths: &timeline.death_positions,
                combat_events: &timeline.combat_events,
            },
        )
    }

    fn plot_pathing(&self, record: &AnalyzedMatch) -> Option<PathBuf> {
        let timeline = &record.timeline;
        if timeline.full_game_pathing.is_empty() {
            return None;
        }
        self.write(
            format!("{}_pathing.json", record.match_id()),
            PathingPlot {
                match_id: record.match_id(),
                champion: &record.stats.champion,
                early_game_pathing: &timeline.early_game_pathing,
                full_game_pathing: &timeline.full_game_pathing,
            },
        )
    }
}
