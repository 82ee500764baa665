use super::champion_stats::most_common;
use crate::engine::model::AnalyzedMatch;
use crate::error::{AnalysisError, AnalysisResult};
use crate::items::ItemCatalog;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupSide {
    pub champion: String,
    /// Percentage of the matchup games this champion won.
    pub win_rate: f64,
    pub average_kills: f64,
    pub average_deaths: f64,
    pub average_assists: f64,
    pub most_common_first_item: Option<String>,
}

impl MatchupSide {
    pub fn average_kda(&self) -> String {
        format!(
            "{:.1}/{:.1}/{:.1}",
            self.average_kills, self.average_deaths, self.average_assists
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupReport {
    pub matchup: String,
    pub games_analyzed: usize,
    pub your_champion_stats: MatchupSide,
    pub enemy_champion_stats: MatchupSide,
    pub advice: String,
}

fn side_stats(games: &[&AnalyzedMatch], champion: &str, catalog: &ItemCatalog) -> MatchupSide {
    let (mut wins, mut kills, mut deaths, mut assists) = (0usize, 0i64, 0i64, 0i64);
    let mut first_items = Vec::new();
    for entry in games.iter().filter_map(|g| g.stats.roster_champion(champion)) {
        if entry.win {
            wins += 1;
        }
        kills += i64::from(entry.kills);
        deaths += i64::from(entry.deaths);
        assists += i64::from(entry.assists);
        if entry.item0 != 0 {
            first_items.push(entry.item0);
        }
    }

    // Averages are over every matchup game, as in the roster-wide view.
    let n = games.len().max(1) as f64;
    MatchupSide {
        champion: champion.to_string(),
        win_rate: wins as f64 / n * 100.0,
        average_kills: kills as f64 / n,
        average_deaths: deaths as f64 / n,
        average_assists: assists as f64 / n,
        most_common_first_item: most_common(first_items)
            .and_then(|id| catalog.name(id))
            .map(str::to_string),
    }
}

/// Reference games where both champions were on the rift, and how each fared.
pub fn matchup_advice(
    reference: &[AnalyzedMatch],
    catalog: &ItemCatalog,
    your_champion: &str,
    enemy_champion: &str,
) -> AnalysisResult<MatchupReport> {
    let games: Vec<&AnalyzedMatch> = reference
        .iter()
        .filter(|g| {
            g.stats.roster_champion(your_champion).is_some()
                && g.stats.roster_champion(enemy_champion).is_some()
        })
        .collect();
    if games.is_empty() {
        return Err(AnalysisError::NoData(format!(
            "No pro games found for the {} vs. {} matchup.",
            your_champion, enemy_champion
        )));
    }

    let yours = side_stats(&games, your_champion, catalog);
    let theirs = side_stats(&games, enemy_champion, catalog);
    let item_or_na = |side: &MatchupSide| {
        side.most_common_first_item
            .clone()
            .unwrap_or_else(|| "N/A".to_string())
    };
    let advice = format!(
        "In this matchup, {} has a {:.2}% win rate against {}. Your average KDA is {} vs. their {}. A common start is {} while they often start with {}.",
        your_champion,
        yours.win_rate,
        enemy_champion,
        yours.average_kda(),
        theirs.average_kda(),
        item_or_na(&yours),
        item_or_na(&theirs),
    );

    Ok(MatchupReport {
        matchup: format!("{} vs. {}", your_champion, enemy_champion),
        games_analyzed: games.len(),
        your_champion_stats: yours,
        enemy_champion_stats: theirs,
        advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::{RosterEntry, StatRecord};
    use crate::items::ItemInfo;

    fn entry(champion: &str, win: bool, kda: (i32, i32, i32), item0: i32) -> RosterEntry {
        RosterEntry {
            champion_name: champion.to_string(),
            win,
            kills: kda.0,
            deaths: kda.1,
            assists: kda.2,
            item0,
            ..Default::default()
        }
    }

    fn game(roster: Vec<RosterEntry>) -> AnalyzedMatch {
        AnalyzedMatch {
            stats: StatRecord {
                all_participants: roster,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::new(vec![ItemInfo {
            id: 3858,
            name: "Relic Shield".to_string(),
            cost: Some(400),
            image_url: None,
            plaintext: String::new(),
        }])
    }

    #[test]
    fn only_games_with_both_champions_count() {
        let reference = vec![
            game(vec![entry("Leona", true, (1, 2, 10), 3858), entry("Nautilus", false, (0, 4, 6), 3850)]),
            game(vec![entry("Leona", false, (0, 5, 4), 3858), entry("Nautilus", true, (2, 1, 12), 0)]),
            game(vec![entry("Leona", true, (9, 9, 9), 3858), entry("Thresh", false, (0, 0, 0), 0)]),
        ];
        let report = matchup_advice(&reference, &catalog(), "Leona", "Nautilus").unwrap();
        assert_eq!(report.games_analyzed, 2);
        assert_eq!(report.your_champion_stats.win_rate, 50.0);
        assert_eq!(report.your_champion_stats.average_kda(), "0.5/3.5/7.0");
        assert_eq!(
            report.your_champion_stats.most_common_first_item.as_deref(),
            Some("Relic Shield")
        );
        assert_eq!(report.enemy_champion_stats.most_common_first_item, None);
        assert!(report.advice.contains("they often start with N/A"));
    }

    #[test]
    fn unknown_matchup_is_reported() {
        let err = matchup_advice(&[], &catalog(), "Leona", "Rell").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No pro games found for the Leona vs. Rell matchup."
        );
    }
}
