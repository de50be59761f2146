mod app;
pub mod ui;

pub use app::{App, AppAction, Focus, Outcome, DEFAULT_MONTH, DEFAULT_YEAR};
