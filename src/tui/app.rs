//! Form state and key handling for the interactive report form.

use crate::report::MonthFilter;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const MONTH_MIN: u32 = 1;
pub const MONTH_MAX: u32 = 12;
pub const YEAR_MIN: i32 = 2020;
pub const YEAR_MAX: i32 = 2030;
pub const DEFAULT_MONTH: u32 = 4;
pub const DEFAULT_YEAR: i32 = 2025;

/// Which form control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Month,
    Year,
    Run,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Month => Focus::Year,
            Focus::Year => Focus::Run,
            Focus::Run => Focus::Month,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Month => Focus::Run,
            Focus::Year => Focus::Month,
            Focus::Run => Focus::Year,
        }
    }
}

/// Result of the last fetch-export cycle, shown as a modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Idle,
    Done { rows: usize },
    NoData,
}

/// Action the runner must take in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Run,
    Quit,
}

pub struct App {
    pub month: u32,
    pub year: i32,
    pub focus: Focus,
    pub outcome: Outcome,
    /// Fetch progress lines from the last run, rendered in the log panel.
    pub log: Vec<String>,
}

impl App {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month: month.clamp(MONTH_MIN, MONTH_MAX),
            year: year.clamp(YEAR_MIN, YEAR_MAX),
            focus: Focus::Month,
            outcome: Outcome::Idle,
            log: Vec::new(),
        }
    }

    pub fn filter(&self) -> MonthFilter {
        MonthFilter {
            month: self.month,
            year: self.year,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppAction::Quit);
        }

        // Any key dismisses a result overlay before doing anything else.
        if self.outcome != Outcome::Idle {
            self.outcome = Outcome::Idle;
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppAction::Quit),
            KeyCode::Char('r') => Some(AppAction::Run),
            KeyCode::Enter if self.focus == Focus::Run => Some(AppAction::Run),
            KeyCode::Tab | KeyCode::Right => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Up => {
                self.step(1);
                None
            }
            KeyCode::Down => {
                self.step(-1);
                None
            }
            _ => None,
        }
    }

    /// Steps the focused selector up or down, wrapping at the range ends.
    fn step(&mut self, delta: i32) {
        match self.focus {
            Focus::Month => {
                let range = (MONTH_MAX - MONTH_MIN + 1) as i32;
                let offset = (self.month as i32 - MONTH_MIN as i32 + delta).rem_euclid(range);
                self.month = MONTH_MIN + offset as u32;
            }
            Focus::Year => {
                let range = YEAR_MAX - YEAR_MIN + 1;
                self.year = YEAR_MIN + (self.year - YEAR_MIN + delta).rem_euclid(range);
            }
            Focus::Run => {}
        }
    }
}
