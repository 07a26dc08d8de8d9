use maud::{Markup, html};

use crate::active::{HOLE_SCORE_RANGE, WidgetEntry};

pub const APP_NAME: &str = "Rusty Golf";

/// Home-screen card: the hole in play with one button per score.
#[must_use]
pub fn render_widget(entry: &WidgetEntry) -> Markup {
    html! {
        div class="widget" {
            @if entry.has_active_round() {
                h3 { "Hole " (entry.current_hole) }
                p class="course" { (entry.course_name) }
                div class="score-buttons" {
                    @for score in HOLE_SCORE_RANGE {
                        button type="button" class="score" data-score=(score) { (score) }
                    }
                }
            } @else {
                p class="empty" { "No active round" }
            }
        }
    }
}

/// One-line variant for lock screens and other cramped slots.
#[must_use]
pub fn inline_label(entry: &WidgetEntry) -> String {
    if entry.has_active_round() {
        format!("Hole {}", entry.current_hole)
    } else {
        APP_NAME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(current_hole: usize) -> WidgetEntry {
        WidgetEntry {
            course_name: "Links".to_string(),
            current_hole,
            is_nine_hole: true,
        }
    }

    #[test]
    fn active_card_has_eight_buttons() {
        let html = render_widget(&entry(4)).into_string();
        assert!(html.contains("Hole 4"));
        assert!(html.contains("Links"));
        assert_eq!(html.matches("<button").count(), 8);
    }

    #[test]
    fn finished_card_reads_as_idle() {
        let html = render_widget(&entry(10)).into_string();
        assert!(html.contains("No active round"));
        assert!(!html.contains("<button"));
        assert_eq!(inline_label(&entry(10)), APP_NAME);
        assert_eq!(inline_label(&entry(2)), "Hole 2");
    }
}
