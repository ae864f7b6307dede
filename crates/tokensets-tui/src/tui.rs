//! Terminal setup and teardown

use {
    anyhow::{Context, Result},
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    ratatui::{Terminal, backend::CrosstermBackend},
    std::io,
};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode, alternate screen and mouse capture
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Undo `setup_terminal`. Safe to call after a partial setup.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    execute!(io::stdout(), crossterm::cursor::Show).context("Failed to show cursor")?;
    Ok(())
}
