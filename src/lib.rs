pub mod active;
pub mod clock;
pub mod config;
pub mod error;
pub mod handicap;
pub mod handoff;
pub mod model;
pub mod stats;
pub mod storage;
pub mod view;

pub use active::{ActiveRound, ActiveRoundStore, FinishedRound, WidgetEntry, WidgetSurface};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TrackerError;
pub use model::{HistoricalRound, RoundDraft, ScoreScale};
pub use stats::{Statistics, Trend, WeekStart};
