use std::fs;
use std::path::PathBuf;

use league_coach::analysis::averages::{average_stat, performance_trend, Trend};
use league_coach::analysis::build::{build_path, common_build, gold_spend};
use league_coach::analysis::champion_stats::{common_skill_order, rank_champions, RankBy};
use league_coach::analysis::gold::gold_efficiency;
use league_coach::analysis::matchup::matchup_advice;
use league_coach::analysis::metric::Metric;
use league_coach::analysis::objectives::{critical_moments, objective_proximity, Proximity, Side};
use league_coach::analysis::playstyle::determine_playstyle;
use league_coach::analysis::report::{comprehensive_analysis, laning_phase, vision_control};
use league_coach::engine::model::AnalyzedMatch;
use league_coach::engine::pipeline::analyze_match;
use league_coach::items::ItemCatalog;
use league_coach::plot::JsonPlotExporter;
use serde_json::Value;

const COACH: &str = "puuid-coach";

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_json(name: &str) -> Value {
    let raw = fs::read_to_string(fixture_path(name)).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid JSON")
}

fn catalog() -> ItemCatalog {
    ItemCatalog::load(&fixture_path("items.json"))
}

/// The fixture game seen by `puuid`, with a few overrides for variety.
fn game_for(puuid: &str, match_id: &str, creation: i64, vision_score: f64) -> AnalyzedMatch {
    let mut detail = read_json("match_detail.json");
    detail["metadata"]["matchId"] = Value::from(match_id);
    detail["info"]["gameCreation"] = Value::from(creation);
    if let Some(participants) = detail["info"]["participants"].as_array_mut() {
        for p in participants.iter_mut().filter(|p| p["puuid"] == puuid) {
            p["visionScore"] = Value::from(vision_score);
        }
    }
    let detail = serde_json::from_value(detail).unwrap();
    let timeline = serde_json::from_value(read_json("match_timeline.json")).unwrap();
    analyze_match(&detail, Some(&timeline), puuid).expect("player is in the fixture")
}

fn fixture_game() -> AnalyzedMatch {
    game_for(COACH, "NA1_5000000001", 1_760_000_000_000, 72.0)
}

#[test]
fn build_path_groups_purchases_into_trips() {
    let trips = build_path(&fixture_game(), &catalog()).unwrap();
    let times: Vec<&str> = trips.iter().map(|t| t.timestamp_str.as_str()).collect();
    assert_eq!(times, vec!["00:00", "08:30", "25:00"]);
    assert_eq!(trips[1].items[0].name, "Ionian Boots of Lucidity");
    assert_eq!(trips[1].items[1].name, "Locket of the Iron Solari");
}

#[test]
fn gold_spend_prices_purchases_and_final_build() {
    let report = gold_spend(&fixture_game(), &catalog());
    assert_eq!(report.total_gold_spent_on_purchases, 5850);
    assert_eq!(report.final_build_cost, 5400);
    assert_eq!(
        report.final_build_items,
        vec![
            "Locket of the Iron Solari",
            "Ionian Boots of Lucidity",
            "Redemption",
            "Oracle Lens"
        ]
    );
}

#[test]
fn gold_efficiency_compares_with_enemy_support() {
    let reference = vec![game_for(COACH, "NA1_REF", 1, 60.0)];
    let report = gold_efficiency(&fixture_game(), &reference).unwrap();
    assert_eq!(report.enemy_champion.as_deref(), Some("Lulu"));
    assert_eq!(report.your_gpm, 300.0);
    assert_eq!(report.enemy_gpm, 250.0);
    assert_eq!(report.pro_average_gpm, 300.0);
    assert_eq!(report.gold_difference_at_14_mins, 800);
}

#[test]
fn objective_proximity_classifies_each_take() {
    let insights = objective_proximity(&fixture_game()).unwrap();
    assert_eq!(insights.len(), 2);

    assert_eq!(insights[0].team, Side::Enemy);
    assert_eq!(insights[0].objective_type, "Dragon");
    assert_eq!(insights[0].proximity, Proximity::Present);

    assert_eq!(insights[1].team, Side::Ally);
    assert_eq!(insights[1].objective_type, "Baron Nashor");
    assert_eq!(insights[1].proximity, Proximity::Nearby);
}

#[test]
fn death_before_dragon_is_a_critical_moment() {
    let moments = critical_moments(&fixture_game());
    assert_eq!(moments.len(), 1);
    assert_eq!(moments[0].death_timestamp, 470_000);
    assert_eq!(moments[0].objective_timestamp, 510_000);
    assert!(moments[0].description.starts_with("At 07:50"));
}

#[test]
fn vision_and_laning_reports() {
    let game = fixture_game();
    let vision = vision_control(&game);
    assert_eq!(vision.control_wards_placed, 1);
    assert_eq!(vision.stealth_wards_placed, 1);
    assert_eq!(vision.control_wards_bought, 6);

    let laning = laning_phase(&game);
    assert_eq!(laning.deaths_before_14_mins, 1);
    assert_eq!(laning.ward_takedowns_before_20_mins, 3.0);
}

#[test]
fn comprehensive_report_writes_combat_plot() {
    let dir = tempfile::tempdir().unwrap();
    let plotter = JsonPlotExporter::new(dir.path());
    let analysis = comprehensive_analysis(&fixture_game(), &catalog(), Some(&plotter));

    assert_eq!(analysis.laning_phase.laning_kills, 1);
    assert_eq!(analysis.laning_phase.laning_assists, 1);
    let path = analysis.teamfight_map_path.as_ref().expect("combat plot written");
    assert!(path.exists());

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["build_path"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["vision_report"]["vision_events_log"].as_array().map(Vec::len), Some(3));
}

#[test]
fn trend_and_average_over_history() {
    let history: Vec<AnalyzedMatch> = [40.0, 50.0, 70.0, 80.0]
        .into_iter()
        .enumerate()
        .map(|(i, vision)| game_for(COACH, &format!("NA1_{}", i), i as i64, vision))
        .collect();

    assert_eq!(average_stat(&history, Metric::VisionScore, Some("thresh")), 60.0);
    assert_eq!(average_stat(&history, Metric::VisionScore, Some("Lulu")), 0.0);

    let report = performance_trend(&history, Metric::VisionScore, 10).unwrap();
    assert_eq!(report.trend, Trend::Upward);
    assert_eq!(report.average_of_first_half, 45.0);
    assert_eq!(report.average_of_second_half, 75.0);

    assert!(performance_trend(&history[..2], Metric::VisionScore, 10).is_err());
}

#[test]
fn reference_population_reports() {
    // Five Thresh games and five Lulu games seen from both supports.
    let mut reference: Vec<AnalyzedMatch> = (0..5)
        .map(|i| game_for(COACH, &format!("NA1_T{}", i), i, 72.0))
        .collect();
    reference.extend((0..5).map(|i| game_for("puuid-lulu", &format!("NA1_L{}", i), 10 + i, 40.0)));
    let catalog = catalog();

    let ranking = rank_champions(&reference, RankBy::WinRate, 5);
    let names: Vec<&str> = ranking.iter().map(|s| s.champion.as_str()).collect();
    assert_eq!(names, vec!["Thresh", "Lulu"]);
    assert_eq!(ranking[0].win_rate, 1.0);

    let order = common_skill_order(&reference, "Thresh").unwrap();
    assert_eq!(order, vec!['Q', 'E']);

    let build = common_build(&reference, &catalog, "Thresh").unwrap();
    assert_eq!(build.boots.as_ref().map(|b| b.name.as_str()), Some("Ionian Boots of Lucidity"));
    assert_eq!(build.core_items[0].name, "Locket of the Iron Solari");

    let matchup = matchup_advice(&reference, &catalog, "Thresh", "Lulu").unwrap();
    assert_eq!(matchup.games_analyzed, 10);
    assert_eq!(matchup.your_champion_stats.win_rate, 100.0);
    assert_eq!(matchup.enemy_champion_stats.win_rate, 0.0);

    let user = vec![game_for(COACH, "NA1_U", 99, 72.0)];
    assert!(determine_playstyle(&user, &reference, "Thresh").is_ok());
    assert!(determine_playstyle(&user, &reference, "Blitzcrank").is_err());
}
