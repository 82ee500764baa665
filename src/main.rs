mod display;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use display::output::*;
use indicatif::{ProgressBar, ProgressStyle};
use league_coach::analysis::averages::{average_stat, performance_trend};
use league_coach::analysis::build::{build_path, common_build, gold_spend};
use league_coach::analysis::champion_stats::{common_skill_order, rank_champions, RankBy};
use league_coach::analysis::gold::gold_efficiency;
use league_coach::analysis::matchup::matchup_advice;
use league_coach::analysis::metric::Metric;
use league_coach::analysis::objectives::{critical_moments, objective_proximity};
use league_coach::analysis::playstyle::determine_playstyle;
use league_coach::analysis::report::{comprehensive_analysis, laning_phase, latest_match_id, vision_control};
use league_coach::api::client::RiotApiClient;
use league_coach::config::Config;
use league_coach::engine::model::AnalyzedMatch;
use league_coach::engine::pipeline::{analyze_batch, collect_raw_matches};
use league_coach::error::{AnalysisError, AnalysisResult, AppError};
use league_coach::items::ItemCatalog;
use league_coach::plot::{JsonPlotExporter, MapPlotter};
use league_coach::store::MatchStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const MAX_MATCH_IDS: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "league-coach")]
#[command(about = "Support coaching reports built from match timelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Platform region (default: RIOT_REGION or na1)
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Data directory (default: LEAGUE_COACH_DATA_DIR or ~/.league_coach)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Player {
    /// Riot Game Name
    game_name: String,

    /// Riot Tag (tag line)
    tag_line: String,
}

#[derive(Args, Debug)]
struct GameSelector {
    #[command(flatten)]
    player: Player,

    /// Match id (default: most recent stored game)
    #[arg(short, long)]
    match_id: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download and analyze recent games into the local store
    Fetch {
        #[command(flatten)]
        player: Player,

        /// Number of recent matches to request (max 100)
        #[arg(short, long, default_value = "20")]
        matches: usize,

        /// Only keep games played in this position
        #[arg(long, default_value = "UTILITY")]
        role: String,

        /// Keep games in every position
        #[arg(long)]
        all_roles: bool,

        /// Store into the reference population instead of the player's file
        #[arg(long)]
        reference: bool,
    },
    /// Refresh the item catalog from Data Dragon
    Items,
    /// Average of one stat over stored games
    Average {
        #[command(flatten)]
        player: Player,
        metric: Metric,
        #[arg(short, long)]
        champion: Option<String>,
    },
    /// Compare the player's style on a champion with the reference games
    Playstyle {
        #[command(flatten)]
        player: Player,
        champion: String,
    },
    /// Best champions in the reference games
    Champions {
        #[arg(long, value_enum, default_value = "win-rate")]
        sort_by: RankBy,
        #[arg(short = 'n', long, default_value = "5")]
        top: usize,
    },
    /// Most common final build for a champion in the reference games
    Build { champion: String },
    /// Purchase history of one game, grouped into shopping trips
    BuildPath(GameSelector),
    /// Gold spent on purchases versus the final build value
    GoldSpend(GameSelector),
    /// Gold income compared with the lane opponent and reference games
    Gold(GameSelector),
    /// Ward placement and clearing in one game
    Vision(GameSelector),
    /// Early deaths and ward takedowns
    Laning(GameSelector),
    /// Full single-game report
    Report(GameSelector),
    /// Deaths shortly before an objective was taken
    Critical(GameSelector),
    /// Where the player was when dragons and barons fell
    Objectives(GameSelector),
    /// Most common skill order for a champion in the reference games
    Skills { champion: String },
    /// Whether a stat is improving across recent games
    Trend {
        #[command(flatten)]
        player: Player,
        metric: Metric,
        #[arg(short = 'n', long, default_value = "10")]
        games: usize,
    },
    /// How two champions fare against each other in the reference games
    Matchup { your_champion: String, enemy_champion: String },
    /// Id of the most recent stored game
    Latest {
        #[command(flatten)]
        player: Player,
    },
    /// Export combat and pathing data of one game for plotting
    Plot(GameSelector),
}

fn main() {
    setup_tracing_subscriber();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// Prints an analysis result, or its error, in the requested format.
fn render<T: Serialize>(json: bool, result: AnalysisResult<T>, show: impl FnOnce(&T)) {
    match (result, json) {
        (Ok(value), true) => print_json(&value),
        (Ok(value), false) => show(&value),
        (Err(e), true) => print_json(&e.to_payload()),
        (Err(e), false) => display_analysis_error(&e),
    }
}

fn player_store(config: &Config, player: &Player) -> MatchStore {
    MatchStore::load(config.user_store_path(&player.game_name, &player.tag_line))
}

fn select_game<'a>(store: &'a MatchStore, match_id: Option<&str>) -> AnalysisResult<&'a AnalyzedMatch> {
    let id = match match_id {
        Some(id) => id,
        None => latest_match_id(&store.matches)?,
    };
    store
        .find(id)
        .ok_or_else(|| AnalysisError::NotFound(format!("Match {}", id)))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let json = cli.json;

    match cli.command {
        Command::Fetch {
            player,
            matches,
            role,
            all_roles,
            reference,
        } => {
            let role = (!all_roles).then_some(role);
            fetch(&config, &player, matches, role.as_deref(), reference)?
        }
        Command::Items => {
            let client = RiotApiClient::new(&config)?;
            display_info("Fetching item catalog from Data Dragon...");
            let catalog = client.get_item_data()?;
            catalog.save(&config.items_path())?;
            display_success(&format!(
                "Saved {} items to {}",
                catalog.len(),
                config.items_path().display()
            ));
        }
        Command::Average {
            player,
            metric,
            champion,
        } => {
            let store = player_store(&config, &player);
            let value = average_stat(&store.matches, metric, champion.as_deref());
            if json {
                print_json(&serde_json::json!({ "metric": metric.key(), "average": value }));
            } else {
                display_average(metric, champion.as_deref(), value);
            }
        }
        Command::Playstyle { player, champion } => {
            let store = player_store(&config, &player);
            let reference = MatchStore::load(config.reference_path());
            render(
                json,
                determine_playstyle(&store.matches, &reference.matches, &champion),
                display_playstyle,
            );
        }
        Command::Champions { sort_by, top } => {
            let reference = MatchStore::load(config.reference_path());
            let ranking = rank_champions(&reference.matches, sort_by, top);
            if json {
                print_json(&ranking);
            } else {
                display_champion_ranking(&ranking);
            }
        }
        Command::Build { champion } => {
            let reference = MatchStore::load(config.reference_path());
            let catalog = ItemCatalog::load(&config.items_path());
            render(
                json,
                common_build(&reference.matches, &catalog, &champion),
                display_build,
            );
        }
        Command::BuildPath(selector) => {
            let store = player_store(&config, &selector.player);
            let catalog = ItemCatalog::load(&config.items_path());
            let result = select_game(&store, selector.match_id.as_deref())
                .and_then(|game| build_path(game, &catalog));
            render(json, result, |trips| display_build_path(trips));
        }
        Command::GoldSpend(selector) => {
            let store = player_store(&config, &selector.player);
            let catalog = ItemCatalog::load(&config.items_path());
            let result =
                select_game(&store, selector.match_id.as_deref()).map(|game| gold_spend(game, &catalog));
            render(json, result, display_gold_spend);
        }
        Command::Gold(selector) => {
            let store = player_store(&config, &selector.player);
            let reference = MatchStore::load(config.reference_path());
            let result = select_game(&store, selector.match_id.as_deref())
                .and_then(|game| gold_efficiency(game, &reference.matches));
            render(json, result, display_gold_efficiency);
        }
        Command::Vision(selector) => {
            let store = player_store(&config, &selector.player);
            let result = select_game(&store, selector.match_id.as_deref()).map(vision_control);
            render(json, result, display_vision);
        }
        Command::Laning(selector) => {
            let store = player_store(&config, &selector.player);
            let result = select_game(&store, selector.match_id.as_deref()).map(laning_phase);
            render(json, result, display_laning);
        }
        Command::Report(selector) => {
            let store = player_store(&config, &selector.player);
            let catalog = ItemCatalog::load(&config.items_path());
            let plotter = JsonPlotExporter::new(config.plots_dir());
            let result = select_game(&store, selector.match_id.as_deref())
                .map(|game| comprehensive_analysis(game, &catalog, Some(&plotter)));
            render(json, result, display_game_analysis);
        }
        Command::Critical(selector) => {
            let store = player_store(&config, &selector.player);
            match select_game(&store, selector.match_id.as_deref()) {
                Ok(game) => {
                    let moments = critical_moments(game);
                    if json {
                        print_json(&moments);
                    } else {
                        display_critical_moments(game.timeline.death_positions.len(), &moments);
                    }
                }
                Err(e) => render::<()>(json, Err(e), |_| {}),
            }
        }
        Command::Objectives(selector) => {
            let store = player_store(&config, &selector.player);
            let result = select_game(&store, selector.match_id.as_deref()).and_then(objective_proximity);
            render(json, result, |insights| display_objectives(insights));
        }
        Command::Skills { champion } => {
            let reference = MatchStore::load(config.reference_path());
            render(
                json,
                common_skill_order(&reference.matches, &champion),
                |order| display_skill_order(&champion, order),
            );
        }
        Command::Trend {
            player,
            metric,
            games,
        } => {
            let store = player_store(&config, &player);
            render(
                json,
                performance_trend(&store.matches, metric, games),
                display_trend,
            );
        }
        Command::Matchup {
            your_champion,
            enemy_champion,
        } => {
            let reference = MatchStore::load(config.reference_path());
            let catalog = ItemCatalog::load(&config.items_path());
            render(
                json,
                matchup_advice(&reference.matches, &catalog, &your_champion, &enemy_champion),
                display_matchup,
            );
        }
        Command::Latest { player } => {
            let store = player_store(&config, &player);
            render(
                json,
                latest_match_id(&store.matches).map(|id| serde_json::json!({ "match_id": id })),
                |_| {
                    if let Some(game) = store.latest() {
                        display_latest(game.match_id());
                        display_match_history(&store.matches);
                    }
                },
            );
        }
        Command::Plot(selector) => {
            let store = player_store(&config, &selector.player);
            let game = select_game(&store, selector.match_id.as_deref()).map_err(AppError::from)?;
            let plotter = JsonPlotExporter::new(config.plots_dir());
            let paths: Vec<PathBuf> = [plotter.plot_combat(game), plotter.plot_pathing(game)]
                .into_iter()
                .flatten()
                .collect();
            if json {
                print_json(&paths);
            } else if paths.is_empty() {
                display_info("No timeline data to plot for this game");
            } else {
                for path in &paths {
                    display_success(&format!("Wrote {}", path.display()));
                }
            }
        }
    }

    Ok(())
}

fn fetch(
    config: &Config,
    player: &Player,
    count: usize,
    role: Option<&str>,
    reference: bool,
) -> Result<()> {
    let client = RiotApiClient::new(config)?;
    let store_path = if reference {
        config.reference_path()
    } else {
        config.user_store_path(&player.game_name, &player.tag_line)
    };
    let mut store = MatchStore::load(store_path);

    display_info(&format!(
        "Fetching data for {}#{} in region {}",
        player.game_name, player.tag_line, config.region
    ));
    let account = client.get_account(&player.game_name, &player.tag_line)?;

    let match_ids = client.get_match_ids(&account.puuid, count.min(MAX_MATCH_IDS))?;
    if match_ids.is_empty() {
        return Err(AppError::NoGames.into());
    }
    let found = match_ids.len();
    let new_ids: Vec<String> = match_ids
        .into_iter()
        .filter(|id| !store.contains(id))
        .collect();
    display_success(&format!(
        "Found {} matches, {} not stored yet",
        found,
        new_ids.len()
    ));

    let pb = ProgressBar::new(new_ids.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Fetching match details");

    let raw = collect_raw_matches(&client, &new_ids, &account.puuid, role, || pb.inc(1));
    pb.finish_with_message("✓ Match data fetched");

    let analyzed = analyze_batch(&raw, &account.puuid);
    info!(
        requested = new_ids.len(),
        kept = analyzed.len(),
        "analyzed batch"
    );

    let added = store.merge(analyzed);
    store.save()?;
    display_success(&format!(
        "Stored {} new games ({} total) in {}",
        added,
        store.matches.len(),
        store.path().display()
    ));
    Ok(())
}
