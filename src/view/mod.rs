pub mod dashboard;
pub mod utils;
pub mod widget;

pub use dashboard::{render_dashboard, render_dashboard_page};
pub use widget::{inline_label, render_widget};
