use maud::{DOCTYPE, Markup, html};

use super::utils::{format_average, format_best, format_handicap, ring_percent};
use crate::stats::{DashboardSummary, Goals};

fn render_ring(label: &str, progress: f64, detail: &str) -> Markup {
    let percent = ring_percent(progress);
    html! {
        div class="ring" data-progress=(percent) {
            span class="ring-label" { (label) }
            span class="ring-value" { (percent) "%" }
            span class="ring-detail" { (detail) }
        }
    }
}

fn render_card(title: &str, value: &str) -> Markup {
    html! {
        div class="metric-card" {
            h4 { (title) }
            p class="metric-value" { (value) }
        }
    }
}

/// Rings plus metric cards, without the page shell.
#[must_use]
pub fn render_dashboard(summary: &DashboardSummary, goals: &Goals) -> Markup {
    html! {
        section class="rings" {
            (render_ring("Play", summary.play_progress,
                &format!("{} of {} this week", summary.rounds_this_week, goals.weekly)))
            (render_ring("Consistency", summary.consistency_progress,
                &format!("{} of {} in 30 days", summary.rounds_last_30_days, goals.monthly)))
            (render_ring("Improve", summary.improve_progress, "toward 10 strokes"))
        }
        section class="metrics" {
            (render_card("Scoring average", &format_average(summary.scoring_average)))
            (render_card("Best (90 days)", &format_best(summary.best_round)))
            (render_card("Handicap", &format_handicap(summary.estimated_handicap)))
            (render_card("Trend", &summary.trend.to_string()))
            (render_card("Weeks in a row", &summary.weeks_played_in_row.to_string()))
        }
    }
}

/// Standalone HTML page around [`render_dashboard`].
#[must_use]
pub fn render_dashboard_page(summary: &DashboardSummary, goals: &Goals) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Rusty Golf" }
            }
            body {
                h2 { "Dashboard" }
                @if summary.is_empty() {
                    p { "No rounds yet." }
                }
                (render_dashboard(summary, goals))
            }
        }
    }
}
