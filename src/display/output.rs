use colored::*;
use league_coach::analysis::averages::TrendReport;
use league_coach::analysis::build::{CommonBuild, GoldSpendReport, ShoppingTrip};
use league_coach::analysis::champion_stats::{format_skill_order, ChampionStats};
use league_coach::analysis::gold::GoldEfficiencyReport;
use league_coach::analysis::matchup::MatchupReport;
use league_coach::analysis::metric::Metric;
use league_coach::analysis::objectives::{CriticalMoment, ObjectiveInsight, Proximity};
use league_coach::analysis::playstyle::PlaystyleReport;
use league_coach::analysis::report::{GameAnalysis, LaningPhaseReport, Section, VisionReport};
use league_coach::engine::model::AnalyzedMatch;
use league_coach::error::AnalysisError;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    match_id: String,
    played: String,
    champion: String,
    result: String,
    kda: String,
    vision: String,
}

#[derive(Tabled)]
struct ChampionRow {
    rank: String,
    champion: String,
    games: String,
    win_rate: String,
}

#[derive(Tabled)]
struct BuildRow {
    slot: String,
    item: String,
    cost: String,
    popularity: String,
}

#[derive(Tabled)]
struct TripRow {
    time: String,
    items: String,
}

#[derive(Tabled)]
struct StatRow {
    stat: String,
    value: String,
}

fn header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn stat_rows(pairs: Vec<(&str, String)>) {
    print_table(
        pairs
            .into_iter()
            .map(|(stat, value)| StatRow {
                stat: stat.to_string(),
                value,
            })
            .collect(),
    );
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_analysis_error(error: &AnalysisError) {
    println!("{} {}", "⚠️".yellow(), error.to_string().yellow());
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => display_error(&e.to_string()),
    }
}

pub fn display_match_history(matches: &[AnalyzedMatch]) {
    if matches.is_empty() {
        println!("{}", "No stored matches".yellow());
        return;
    }
    let wins = matches.iter().filter(|m| m.stats.win).count();
    let win_rate = (wins as f64 / matches.len() as f64) * 100.0;

    header(&format!("📊 MATCH HISTORY ({} Games)", matches.len()));
    println!(
        "{} {} W / {} L ({:.1}% WR)\n",
        "📈 Overall:".bold(),
        wins.to_string().green(),
        (matches.len() - wins).to_string().red(),
        win_rate
    );

    let rows = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| MatchRow {
            number: format!("{}", idx + 1),
            match_id: m.stats.match_id.clone(),
            played: chrono::DateTime::from_timestamp_millis(m.stats.game_creation)
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            champion: m.stats.champion.clone(),
            result: if m.stats.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            },
            kda: format!("{}/{}/{}", m.stats.kills, m.stats.deaths, m.stats.assists),
            vision: format!("{:.0}", m.stats.vision_score),
        })
        .collect();
    print_table::<MatchRow>(rows);
}

pub fn display_average(metric: Metric, champion: Option<&str>, value: f64) {
    let scope = champion.unwrap_or("all champions");
    println!("{} average {} on {}: {:.2}", "📈".cyan(), metric.key().bold(), scope, value);
}

pub fn display_playstyle(report: &PlaystyleReport) {
    header("🎭 PLAYSTYLE");
    println!("{} {}\n", "Inferred:".bold(), report.inferred_playstyle.green().bold());
    for line in &report.evidence {
        println!("  • {}", line);
    }
    println!();
}

pub fn display_champion_ranking(ranking: &[ChampionStats]) {
    header("🏆 TOP CHAMPIONS (reference games)");
    if ranking.is_empty() {
        println!("{}", "No champion has enough games to rank".yellow());
        return;
    }
    let rows = ranking
        .iter()
        .enumerate()
        .map(|(idx, s)| ChampionRow {
            rank: format!("#{}", idx + 1),
            champion: s.champion.clone(),
            games: s.games_played.to_string(),
            win_rate: format!("{:.1}%", s.win_rate * 100.0),
        })
        .collect();
    print_table::<ChampionRow>(rows);
}

pub fn display_build(build: &CommonBuild) {
    header(&format!("🛠️ COMMON BUILD: {} ({} games)", build.champion, build.games_analyzed));
    let mut rows = Vec::new();
    if let Some(boots) = &build.boots {
        rows.push(BuildRow {
            slot: "Boots".to_string(),
            item: boots.name.clone(),
            cost: boots.cost.map(|c| c.to_string()).unwrap_or_default(),
            popularity: percent(boots.popularity),
        });
    }
    for (idx, item) in build.core_items.iter().enumerate() {
        rows.push(BuildRow {
            slot: format!("Core {}", idx + 1),
            item: item.name.clone(),
            cost: item.cost.map(|c| c.to_string()).unwrap_or_default(),
            popularity: percent(item.popularity),
        });
    }
    print_table(rows);
}

pub fn display_build_path(trips: &[ShoppingTrip]) {
    header("🛒 BUILD PATH");
    let rows = trips
        .iter()
        .map(|t| TripRow {
            time: t.timestamp_str.clone(),
            items: t
                .items
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    print_table::<TripRow>(rows);
}

pub fn display_gold_spend(report: &GoldSpendReport) {
    header("💰 GOLD SPENT");
    stat_rows(vec![
        ("Spent on purchases", report.total_gold_spent_on_purchases.to_string()),
        ("Final build value", report.final_build_cost.to_string()),
        ("Final items", report.final_build_items.join(", ")),
    ]);
}

pub fn display_gold_efficiency(report: &GoldEfficiencyReport) {
    header("💰 GOLD EFFICIENCY");
    let diff = report.gold_difference_at_14_mins;
    let diff_str = if diff >= 0 {
        format!("+{}", diff).green().to_string()
    } else {
        diff.to_string().red().to_string()
    };
    stat_rows(vec![
        ("Your champion", report.your_champion.clone()),
        (
            "Enemy support",
            report.enemy_champion.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
        ("Your GPM", format!("{:.2}", report.your_gpm)),
        ("Enemy GPM", format!("{:.2}", report.enemy_gpm)),
        ("Reference GPM", format!("{:.2}", report.pro_average_gpm)),
        ("Gold diff @14", diff_str),
    ]);
    println!("{}\n", report.comparison_insight);
}

pub fn display_vision(report: &VisionReport) {
    header("👁️ VISION CONTROL");
    stat_rows(vec![
        ("Vision score", format!("{:.0}", report.vision_score)),
        ("Wards placed", report.wards_placed.to_string()),
        ("Wards killed", report.wards_killed.to_string()),
        ("Control wards bought", report.control_wards_bought.to_string()),
        ("Control wards placed", report.control_wards_placed.to_string()),
        ("Stealth wards placed", report.stealth_wards_placed.to_string()),
    ]);
}

pub fn display_laning(report: &LaningPhaseReport) {
    header("🛤️ LANING PHASE");
    stat_rows(vec![
        ("Deaths before 14:00", report.deaths_before_14_mins.to_string()),
        (
            "Ward takedowns before 20:00",
            format!("{:.0}", report.ward_takedowns_before_20_mins),
        ),
    ]);
}

pub fn display_game_analysis(analysis: &GameAnalysis) {
    let summary = &analysis.match_summary;
    header(&format!("🎮 GAME REPORT {}", analysis.match_id));
    println!(
        "{} {} {}/{}/{} | vision {:.0}\n",
        summary.champion.bold(),
        if summary.win { "WIN".green() } else { "LOSS".red() },
        summary.kills,
        summary.deaths,
        summary.assists,
        summary.vision_score
    );
    display_laning(&analysis.laning_phase.phase);
    println!(
        "Kills / assists before 15:00: {} / {}\n",
        analysis.laning_phase.laning_kills, analysis.laning_phase.laning_assists
    );
    match &analysis.build_path {
        Section::Ready(trips) => display_build_path(trips),
        Section::Unavailable { error } => println!("{} {}\n", "⚠️".yellow(), error.yellow()),
    }
    display_vision(&analysis.vision_report.report);
    if let Some(path) = &analysis.teamfight_map_path {
        display_success(&format!("Positioning map generated: {}", path.display()));
    }
}

pub fn display_critical_moments(deaths: usize, moments: &[CriticalMoment]) {
    header("⏱️ CRITICAL MOMENTS");
    if deaths == 0 {
        println!("{}", "No deaths found in this game. Great job!".green());
    } else if moments.is_empty() {
        println!("No critical moments found.");
    } else {
        for moment in moments {
            println!("  • {}", moment.description);
        }
    }
    println!();
}

pub fn display_objectives(insights: &[ObjectiveInsight]) {
    header("🐉 OBJECTIVE PROXIMITY");
    if insights.is_empty() {
        println!("No relevant objective insights found.\n");
        return;
    }
    for insight in insights {
        let line = match insight.proximity {
            Proximity::Present => insight.insight.green(),
            Proximity::Nearby => insight.insight.yellow(),
            Proximity::OppositeSide => insight.insight.red(),
        };
        println!("  • {} ({:.0} units)", line, insight.distance);
    }
    println!();
}

pub fn display_skill_order(champion: &str, order: &[char]) {
    println!("{} {}: {}", "📚 Skill order for".cyan(), champion.bold(), format_skill_order(order));
}

pub fn display_trend(report: &TrendReport) {
    header(&format!("📉 TREND: {}", report.metric));
    stat_rows(vec![
        ("Games analyzed", report.games_analyzed.to_string()),
        ("Older half average", format!("{:.2}", report.average_of_first_half)),
        ("Newer half average", format!("{:.2}", report.average_of_second_half)),
        ("Trend", report.trend.label().to_string()),
    ]);
    println!("{}\n", report.insight);
}

pub fn display_matchup(report: &MatchupReport) {
    header(&format!("⚔️ MATCHUP: {} ({} games)", report.matchup, report.games_analyzed));
    for side in [&report.your_champion_stats, &report.enemy_champion_stats] {
        println!(
            "  {}: {:.2}% WR, KDA {}, first item {}",
            side.champion.bold(),
            side.win_rate,
            side.average_kda(),
            side.most_common_first_item.as_deref().unwrap_or("N/A")
        );
    }
    println!("\n{}\n", report.advice);
}

pub fn display_latest(match_id: &str) {
    println!("{} {}", "Latest match:".bold(), match_id);
}
