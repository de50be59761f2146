mod api;
mod config;
mod excel;
mod report;
#[cfg(test)]
mod test_support;
mod tui;
mod types;

use anyhow::Result;
use api::MotionClient;
use clap::Parser;
use config::Config;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use excel::ExportOutcome;
use report::MonthFilter;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tui::{App, AppAction, Outcome};

#[derive(Parser)]
#[command(name = "motion-report")]
#[command(about = "Export a monthly Motion task report to a two-sheet Excel workbook")]
#[command(version)]
struct Cli {
    /// Report month (1-12)
    #[arg(short, long, default_value_t = tui::DEFAULT_MONTH,
          value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Report year
    #[arg(short, long, default_value_t = tui::DEFAULT_YEAR,
          value_parser = clap::value_parser!(i32).range(2020..=2030))]
    year: i32,

    /// Run without the interactive form
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.headless {
        run_headless(&cli)
    } else {
        run_form(&cli)
    }
}

fn run_headless(cli: &Cli) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let client = MotionClient::new(&config);
    if config.api_key.is_none() {
        // Deliberately not fatal: the first request will fail with 401.
        tracing::warn!("MOTION_API_KEY is not set; requests will fail authentication");
    }

    tracing::info!("Fetching tasks for {:02}/{}", cli.month, cli.year);
    let filter = MonthFilter {
        month: cli.month,
        year: cli.year,
    };
    let rows = report::fetch_report_rows(&client, filter, &mut |line| tracing::info!("{line}"));

    match excel::export_report(&rows, Path::new(excel::OUTPUT_FILE))? {
        ExportOutcome::NoData => {
            anyhow::bail!("No tasks found for {:02}/{}", cli.month, cli.year)
        }
        ExportOutcome::Written { rows } => {
            tracing::info!("Exported {} total tasks to {}", rows, excel::OUTPUT_FILE);
            Ok(())
        }
    }
}

fn run_form(cli: &Cli) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let config = Config::load();
    let client = MotionClient::new(&config);
    let mut app = App::new(cli.month, cli.year);

    loop {
        terminal.draw(|frame| tui::ui::draw(frame, &app))?;

        // Blocking read: the form is fully synchronous, and the whole
        // fetch/export cycle runs inline on this thread when triggered.
        let event = match crossterm::event::read() {
            Ok(event) => event,
            Err(e) => {
                restore_terminal(&mut terminal)?;
                return Err(e.into());
            }
        };
        let CrosstermEvent::Key(key) = event else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(AppAction::Quit) => break,
            Some(AppAction::Run) => {
                let filter = app.filter();
                let mut log = Vec::new();
                let rows = report::fetch_report_rows(&client, filter, &mut |line| log.push(line));
                app.log = log;

                match excel::export_report(&rows, Path::new(excel::OUTPUT_FILE)) {
                    Ok(ExportOutcome::Written { rows }) => app.outcome = Outcome::Done { rows },
                    Ok(ExportOutcome::NoData) => app.outcome = Outcome::NoData,
                    Err(e) => {
                        // File write failures are not handled at this
                        // layer; surface them as an application error.
                        restore_terminal(&mut terminal)?;
                        return Err(e);
                    }
                }
            }
            None => {}
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

fn restore_terminal(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
