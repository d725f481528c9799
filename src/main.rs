//! taskgrid - browse a JSON dataset in a sortable, searchable terminal grid.

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, warn};

use taskgrid::app::App;
use taskgrid::config::Settings;
use taskgrid::error::AppError;
use taskgrid::events::EventHandler;
use taskgrid::grid::{FileStorage, Storage};
use taskgrid::{dataset, logging};

/// Browse a JSON dataset as a data grid.
#[derive(Debug, Parser)]
#[command(name = "taskgrid", version, about)]
struct Args {
    /// JSON file with an array of rows or an object of rows keyed by id.
    #[arg(short, long)]
    data: PathBuf,

    /// Identifier under which column, sort and width preferences are saved.
    #[arg(short, long)]
    table_id: String,

    /// Settings file; defaults to $TASKGRID_CONFIG or the platform config dir.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = run(&args);
    logging::shutdown();

    if let Err(e) = &result {
        error!(error = %e, "taskgrid failed");
        eprintln!("{}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("{}", action);
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), AppError> {
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    let storage: Rc<dyn Storage> = match &settings.storage_dir {
        Some(dir) => Rc::new(FileStorage::new(dir)),
        None => Rc::new(FileStorage::in_data_dir()?),
    };

    let data = dataset::load(&args.data)?;
    let columns = dataset::infer_columns(&data);
    if columns.is_empty() {
        warn!(path = %args.data.display(), "Dataset has no object rows");
    }

    let mut app = App::new(data, columns, &args.table_id, &settings, storage)?;
    run_terminal(&mut app).map_err(|e| AppError::terminal(format!("{:#}", e)))
}

fn run_terminal(app: &mut App) -> anyhow::Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut terminal = undo_on_error(setup_terminal, restore_terminal)?;

    let result = event_loop(&mut terminal, app);

    restore_terminal()?;
    terminal.show_cursor().context("show cursor")?;
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("leave alternate screen")?;
    Ok(())
}

/// Run `step`, calling `undo` before returning its error.
fn undo_on_error<T>(
    step: impl FnOnce() -> anyhow::Result<T>,
    undo: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<T> {
    step().map_err(|e| {
        if let Err(undo_err) = undo() {
            warn!(error = %undo_err, "Failed to restore terminal");
        }
        e
    })
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let events = EventHandler::new();
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame)).context("draw frame")?;
        let event = events.next().context("read event")?;
        app.update(event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_undo_runs_when_setup_fails() {
        let undone = Cell::new(false);
        let result: anyhow::Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("no alternate screen")),
            || {
                undone.set(true);
                Ok(())
            },
        );
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_undo_skipped_on_success() {
        let undone = Cell::new(false);
        let value = undo_on_error(
            || Ok(7),
            || {
                undone.set(true);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(value, 7);
        assert!(!undone.get());
    }

    #[test]
    fn test_setup_error_survives_failed_undo() {
        let result: anyhow::Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("create terminal")),
            || Err(anyhow::anyhow!("disable raw mode")),
        );
        assert_eq!(result.unwrap_err().to_string(), "create terminal");
    }
}
