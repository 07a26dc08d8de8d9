use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use std::sync::Arc;

use rusty_golf_tracker::active::{ActiveRound, ActiveRoundStore, WidgetSurface};
use rusty_golf_tracker::config::{AppConfig, Cli, Command, EntryArgs, WidgetCommand, load_config};
use rusty_golf_tracker::error::TrackerError;
use rusty_golf_tracker::handoff::{
    discard_completed_round, pending_completion, save_completed_round,
};
use rusty_golf_tracker::model::{EIGHTEEN_HOLES, RoundDraft, ScoreScale};
use rusty_golf_tracker::stats::{
    DashboardSummary, GoalsStore, Statistics, handicap_series, score_series,
};
use rusty_golf_tracker::storage::{KeyValueStore, RoundStore, SqliteKv, SqliteRoundStore};
use rusty_golf_tracker::view::utils::{
    format_average, format_best, format_handicap, format_round_line, ring_percent,
};
use rusty_golf_tracker::view::{inline_label, render_dashboard_page, render_widget};

const DEFAULT_COURSE: &str = "Round";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    run(cli.command, &config)
}

fn open_shared(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    let kv = SqliteKv::open(&config.shared_store)
        .with_context(|| format!("open shared store {}", config.shared_store.display()))?;
    Ok(Arc::new(kv))
}

fn open_rounds(config: &AppConfig) -> Result<SqliteRoundStore> {
    SqliteRoundStore::open(&config.rounds_db)
        .with_context(|| format!("open rounds db {}", config.rounds_db.display()))
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Start {
            course,
            nine,
            force,
        } => start(config, course.as_deref(), nine, force),
        Command::Score { score } => {
            let active = ActiveRoundStore::with_system_clock(open_shared(config)?);
            if !active.record_score(score) {
                println!("Score {score} ignored: scores run 1-8 and need a hole in play.");
            }
            print_status(&active.cached());
            Ok(())
        }
        Command::Status => {
            let active = ActiveRoundStore::with_system_clock(open_shared(config)?);
            print_status(&active.refresh());
            Ok(())
        }
        Command::Finish { discard } => finish(config, discard),
        Command::Cancel => {
            let active = ActiveRoundStore::with_system_clock(open_shared(config)?);
            active.clear();
            println!("Active round cleared.");
            Ok(())
        }
        Command::Widget { action } => widget(config, action),
        Command::Add(entry) => add_round(config, &entry),
        Command::Edit { id, entry } => edit_round(config, id, &entry),
        Command::Delete { id } => {
            if !open_rounds(config)?.delete_round(id)? {
                return Err(TrackerError::NotFound(format!("round {id}")).into());
            }
            println!("Deleted round {id}.");
            Ok(())
        }
        Command::List => {
            let rounds = open_rounds(config)?.rounds_by_date_desc()?;
            if rounds.is_empty() {
                println!("No rounds yet.");
            }
            let now = Utc::now();
            for round in &rounds {
                println!("{}", format_round_line(round, now));
            }
            Ok(())
        }
        Command::Stats {
            html,
            chart,
            handicap_chart,
        } => stats(config, html, chart, handicap_chart),
        Command::Goals { weekly, monthly } => {
            let store = GoalsStore::new(open_shared(config)?);
            if let Some(weekly) = weekly {
                store.set_weekly(weekly)?;
            }
            if let Some(monthly) = monthly {
                store.set_monthly(monthly)?;
            }
            let goals = store.load();
            println!(
                "Goals: {} round(s) a week, {} in 30 days.",
                goals.weekly, goals.monthly
            );
            Ok(())
        }
    }
}

fn start(config: &AppConfig, course: Option<&str>, nine: bool, force: bool) -> Result<()> {
    let active = ActiveRoundStore::with_system_clock(open_shared(config)?);
    let current = active.refresh();
    if !force && (current.has_active_round() || current.is_complete()) {
        bail!(
            "a round at {} is still open; finish it or pass --force",
            current.course_name
        );
    }
    let course = course
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COURSE);
    active.start_round(course, nine);
    print_status(&active.cached());
    Ok(())
}

fn finish(config: &AppConfig, discard: bool) -> Result<()> {
    let active = ActiveRoundStore::with_system_clock(open_shared(config)?);
    let Some(prompt) = pending_completion(&active) else {
        bail!("no completed round to finish");
    };
    if discard {
        discard_completed_round(&active);
        println!("Discarded round at {} ({}).", prompt.course_name, prompt.total_score);
        return Ok(());
    }
    let rounds = open_rounds(config)?;
    let saved = save_completed_round(&active, &rounds)?
        .ok_or_else(|| anyhow!("round changed before it could be saved"))?;
    println!("Saved: {}", format_round_line(&saved, Utc::now()));
    Ok(())
}

fn widget(config: &AppConfig, action: WidgetCommand) -> Result<()> {
    let surface = WidgetSurface::with_system_clock(open_shared(config)?);
    if let WidgetCommand::Score { score } = action {
        if !surface.record_score(score) {
            println!("Score {score} ignored.");
        }
    }
    let entry = surface.load_entry();
    match action {
        WidgetCommand::Show { html: true } => println!("{}", render_widget(&entry).into_string()),
        _ if entry.has_active_round() => {
            let scores: Vec<String> = surface.score_triggers().map(|s| s.to_string()).collect();
            println!("{} - {}", inline_label(&entry), entry.course_name);
            println!("[{}]", scores.join("] ["));
        }
        _ => println!("No active round"),
    }
    Ok(())
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn fill_draft(draft: &mut RoundDraft, entry: &EntryArgs) {
    if let Some(date) = entry.date {
        draft.date = day_start(date);
    }
    if let Some(course) = &entry.course {
        draft.course_name.clone_from(course);
    }
    if let Some(notes) = &entry.notes {
        draft.notes.clone_from(notes);
    }
    if entry.nine {
        draft.is_nine_hole = true;
    } else if entry.eighteen {
        draft.is_nine_hole = false;
    }
    if !entry.holes.is_empty() {
        draft.hole_inputs = vec![String::new(); EIGHTEEN_HOLES];
        for (slot, input) in draft.hole_inputs.iter_mut().zip(&entry.holes) {
            slot.clone_from(input);
        }
    }
}

fn add_round(config: &AppConfig, entry: &EntryArgs) -> Result<()> {
    let mut draft = RoundDraft::new(Utc::now());
    fill_draft(&mut draft, entry);
    let mut round = draft.validate().map_err(TrackerError::from)?;
    let id = open_rounds(config)?.insert_round(&round)?;
    round.id = Some(id);
    println!("Added: {}", format_round_line(&round, Utc::now()));
    Ok(())
}

fn edit_round(config: &AppConfig, id: i64, entry: &EntryArgs) -> Result<()> {
    let rounds = open_rounds(config)?;
    let existing = rounds
        .rounds_by_date_desc()
        .map_err(TrackerError::from)?
        .into_iter()
        .find(|r| r.id == Some(id))
        .ok_or_else(|| TrackerError::NotFound(format!("round {id}")))?;
    let mut draft = RoundDraft::from_round(&existing);
    fill_draft(&mut draft, entry);
    let updated = draft.apply_to(&existing).map_err(TrackerError::from)?;
    rounds.update_round(&updated)?;
    println!("Updated: {}", format_round_line(&updated, Utc::now()));
    Ok(())
}

fn stats(
    config: &AppConfig,
    html: bool,
    chart: Option<ScoreScale>,
    handicap_chart: bool,
) -> Result<()> {
    let rounds = open_rounds(config)?.rounds_by_date_desc()?;
    let goals = GoalsStore::new(open_shared(config)?).load();
    let stats = Statistics::new(Utc::now(), config.week_start);
    let summary = DashboardSummary::build(&stats, &goals, &rounds);

    if html {
        println!("{}", render_dashboard_page(&summary, &goals).into_string());
    } else {
        println!(
            "Play {}%  Consistency {}%  Improve {}%",
            ring_percent(summary.play_progress),
            ring_percent(summary.consistency_progress),
            ring_percent(summary.improve_progress)
        );
        println!("Scoring average  {}", format_average(summary.scoring_average));
        println!("Best (90 days)   {}", format_best(summary.best_round));
        println!("Handicap         {}", format_handicap(summary.estimated_handicap));
        println!("Trend            {}", summary.trend);
        println!("Weeks in a row   {}", summary.weeks_played_in_row);
    }

    if let Some(scale) = chart {
        println!("Scores ({scale}):");
        for point in score_series(&rounds, scale) {
            println!("  {}  {:.1}", point.date.format("%Y-%m-%d"), point.value);
        }
    }
    if handicap_chart {
        println!("Handicap:");
        for point in handicap_series(&rounds) {
            println!(
                "  {}  {}",
                point.date.format("%Y-%m-%d"),
                format_handicap(Some(point.value))
            );
        }
    }
    Ok(())
}

fn print_status(round: &ActiveRound) {
    if round.has_active_round() {
        println!(
            "{}: hole {} of {}, {} strokes so far",
            round.course_name,
            round.current_hole,
            round.max_holes(),
            round.total_score()
        );
    } else if round.is_complete() {
        println!(
            "Round complete at {}: {} strokes. Run `finish` to save it or `finish --discard`.",
            round.course_name,
            round.total_score()
        );
    } else {
        println!("No active round");
    }
}
