use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scout_desk::agents::backend::create_backend;
use scout_desk::agents::scout_report::ScoutReportAgent;
use scout_desk::app::{Action, AppView, ReportState, Session};
use scout_desk::config::AppConfig;
use scout_desk::models::{
    DashboardView, HeadToHead, MatchId, MatchSummary, MetricKey, PercentileProfile, PlayerId,
    PredictionView, RadarComparison, ScatterPlot, ScoutingCard, Side,
};
use scout_desk::storage::{RecordStore, StorageConfig};

#[derive(Parser)]
#[command(name = "scout-desk")]
#[command(about = "Football scouting analytics with AI-written reports")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print views as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// League overview: summary tiles and prospects by potential
    Dashboard {
        #[arg(long)]
        league: Option<String>,

        #[arg(long)]
        season: Option<String>,
    },

    /// Percentile profile and scouting card for one player
    Profile {
        /// Player id or name
        #[arg(long)]
        player: String,

        #[arg(long)]
        league: Option<String>,

        #[arg(long)]
        season: Option<String>,
    },

    /// Radar and head-to-head comparison of two players
    Compare {
        /// First player id or name
        #[arg(long)]
        a: String,

        /// Second player id or name
        #[arg(long)]
        b: String,
    },

    /// Two metrics plotted against each other, grouped by position
    Scatter {
        /// X-axis metric (e.g. xg, sca, progressive_passes)
        #[arg(long, default_value = "xg")]
        x: MetricKey,

        /// Y-axis metric
        #[arg(long, default_value = "xa")]
        y: MetricKey,

        #[arg(long)]
        league: Option<String>,

        #[arg(long)]
        season: Option<String>,
    },

    /// Shot map, xG total and momentum for a match
    Match {
        /// Match id; defaults to the first loaded match
        #[arg(long)]
        id: Option<String>,
    },

    /// Model predictions for upcoming fixtures
    Predictions,

    /// Generate an AI scouting report for one player
    Report {
        /// Player id or name
        #[arg(long)]
        player: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(Path::new(&cli.config))?;

    // Initialize tracing
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting scout-desk v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = cli
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());
    let store = Arc::new(RecordStore::load(&StorageConfig::new(data_dir))?);

    let agent = ScoutReportAgent::new(create_backend(&config.report)?)
        .with_temperature(config.report.temperature);
    let session = Session::new(
        store,
        agent,
        &config.filters,
        config.normalization.clone(),
    );

    match cli.command {
        Commands::Dashboard { league, season } => {
            apply_filters(&session, league, season).await;
            let state = session.dispatch(Action::SelectView(AppView::Dashboard)).await;
            let view = session.dashboard(&state);
            emit(cli.json, &view, print_dashboard)?;
        }

        Commands::Profile {
            player,
            league,
            season,
        } => {
            let id = resolve_player(session.store(), &player)?;
            apply_filters(&session, league, season).await;
            session
                .dispatch(Action::SelectView(AppView::PlayerPerformance))
                .await;
            let state = session
                .dispatch(Action::SelectPlayer(Some(id.clone())))
                .await;

            let profile = session.profile(&state, &id)?;
            let card = session.scouting_card(&id)?;
            emit(cli.json, &(&card, &profile), |(card, profile)| {
                print_card(card);
                println!();
                print_profile(profile);
            })?;
        }

        Commands::Compare { a, b } => {
            let a = resolve_player(session.store(), &a)?;
            let b = resolve_player(session.store(), &b)?;
            session
                .dispatch(Action::SelectView(AppView::Comparison))
                .await;
            session
                .dispatch(Action::SetComparison {
                    slot: Side::A,
                    player: Some(a),
                })
                .await;
            let state = session
                .dispatch(Action::SetComparison {
                    slot: Side::B,
                    player: Some(b),
                })
                .await;

            let (radar, h2h) = session.comparison(&state)?;
            emit(cli.json, &(&radar, &h2h), |(radar, h2h)| {
                print_radar(radar);
                println!();
                print_head_to_head(h2h);
            })?;
        }

        Commands::Scatter {
            x,
            y,
            league,
            season,
        } => {
            apply_filters(&session, league, season).await;
            let state = session.dispatch(Action::SelectView(AppView::Scouting)).await;
            let plot = session.scatter(&state, x, y);
            emit(cli.json, &plot, print_scatter)?;
        }

        Commands::Match { id } => {
            session
                .dispatch(Action::SelectView(AppView::MatchAnalysis))
                .await;
            let id = id.map(MatchId::from);
            let summary = session.match_summary(id.as_ref())?;
            emit(cli.json, &summary, print_match)?;
        }

        Commands::Predictions => {
            session
                .dispatch(Action::SelectView(AppView::Predictions))
                .await;
            let views = session.predictions();
            emit(cli.json, &views, |views| print_predictions(views))?;
        }

        Commands::Report { player } => {
            let id = resolve_player(session.store(), &player)?;
            session.dispatch(Action::SelectView(AppView::Scouting)).await;
            session
                .dispatch(Action::SelectPlayer(Some(id.clone())))
                .await;

            let report = session.request_report(&id).await?;
            emit(cli.json, &report, print_report)?;
        }
    }

    Ok(())
}

async fn apply_filters(session: &Session, league: Option<String>, season: Option<String>) {
    if let Some(league) = league {
        session.dispatch(Action::SetLeague(league)).await;
    }
    if let Some(season) = season {
        session.dispatch(Action::SetSeason(season)).await;
    }
}

/// Match by id first, then by case-insensitive name.
fn resolve_player(store: &RecordStore, query: &str) -> Result<PlayerId> {
    let id = PlayerId::from(query);
    if store.find_player(&id).is_some() {
        return Ok(id);
    }

    let wanted = query.trim().to_lowercase();
    let matches: Vec<_> = store
        .players()
        .iter()
        .filter(|p| p.name.to_lowercase() == wanted)
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.id.clone()),
        [] => Err(anyhow!("No player with id or name {:?}", query)),
        many => Err(anyhow!(
            "{:?} matches {} records; use one of the ids: {}",
            query,
            many.len(),
            many.iter()
                .map(|p| format!("{} ({} {})", p.id, p.team, p.season))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView<'_>) {
    println!("=== Dashboard: {} / {} ===", view.league, view.season);
    println!("Total players:       {}", view.summary.count);
    println!("Avg xG:              {}", view.summary.mean_xg);
    println!("Avg SCA:             {}", view.summary.mean_sca);
    println!("High potential (>90): {}", view.summary.high_potential);
    println!("Leagues: {}", view.leagues.join(", "));
    println!("Seasons: {}", view.seasons.join(", "));

    if !view.prospects.is_empty() {
        println!("\nTop prospects:");
        for p in &view.prospects {
            println!(
                "  {:>4.0}  {:<24} {:<3} {:<18} {}",
                p.potential_score, p.name, p.position, p.team, p.id
            );
        }
    }
}

fn print_card(card: &ScoutingCard) {
    println!("=== Scouting card: {} ===", card.player_id);
    println!("xG per match:        {:.2}", card.xg_per_match);
    println!("xG per 90:           {:.2}", card.xg_per_90);
    println!("SCA:                 {}", card.sca);
    println!("Prog carries:        {}", card.progressive_carries);
    println!("Defensive actions:   {}", card.defensive_actions);
}

fn print_profile(profile: &PercentileProfile) {
    println!(
        "=== Percentile rank vs {}s ({} peers) ===",
        profile.position, profile.sample_size
    );
    for entry in &profile.entries {
        println!(
            "  {:<14} {:>8.2}  {:>3}th  {:<8} {}",
            entry.label,
            entry.value,
            entry.percentile,
            entry.band,
            entry.band.color()
        );
    }
}

fn print_radar(radar: &RadarComparison) {
    println!("=== Radar: {} vs {} ===", radar.player_a, radar.player_b);
    for point in &radar.points {
        println!(
            "  {:<14} {:>6.1} {:>6.1}  / {}",
            point.subject, point.a, point.b, point.full_mark
        );
    }
}

fn print_head_to_head(h2h: &HeadToHead) {
    println!("=== Head to head ===");
    for row in &h2h.rows {
        let leader = match row.leader {
            Some(Side::A) => h2h.player_a.as_str(),
            Some(Side::B) => h2h.player_b.as_str(),
            None => "-",
        };
        println!(
            "  {:<16} {:>7.2} ({:>3.0}%)  {:>7.2} ({:>3.0}%)  {}",
            row.label, row.a, row.share_a, row.b, row.share_b, leader
        );
    }
}

fn print_scatter(plot: &ScatterPlot) {
    println!(
        "=== {} vs {} ({} players) ===",
        plot.x_label,
        plot.y_label,
        plot.point_count()
    );
    for series in &plot.series {
        println!("{} [{}]", series.position, series.color);
        for point in &series.points {
            println!(
                "  {:<24} {:<18} x={:<8.2} y={:.2}",
                point.name, point.team, point.x, point.y
            );
        }
    }
}

fn print_match(summary: &MatchSummary) {
    println!("=== {} ===", summary.scoreline);
    println!("Total xG: {}  Shots: {}", summary.total_xg, summary.shot_count);
    let counts: Vec<String> = summary
        .outcome_counts
        .iter()
        .map(|(outcome, n)| format!("{}: {}", outcome, n))
        .collect();
    println!("{}", counts.join("  "));

    println!("\nShot timeline:");
    for shot in &summary.timeline {
        println!(
            "  {:>3}'  {:<22} {:<8} xG {:.2}  ({:.0},{:.0}) {:.0}px",
            shot.minute, shot.player, shot.outcome, shot.xg, shot.x, shot.y, shot.size_px
        );
    }

    if !summary.momentum.is_empty() {
        println!("\nMomentum:");
        for (minute, value) in &summary.momentum {
            println!("  {:>3}'  {:>+6.1}", minute, value);
        }
    }
}

fn print_predictions(views: &[PredictionView]) {
    println!("=== Predictions ===");
    for p in views {
        let flag = if p.consistent { "" } else { "  (inconsistent)" };
        println!(
            "  {:<32} H {:>3}%  D {:>3}%  A {:>3}%  score {}  confidence {}%{}",
            p.fixture, p.home_pct, p.draw_pct, p.away_pct, p.predicted_score, p.confidence_pct, flag
        );
    }
}

fn print_report(report: &ReportState) {
    match report.text() {
        Some(text) => println!("{}", text),
        None => println!("Report request superseded."),
    }
}
