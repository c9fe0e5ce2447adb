use std::io;

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::info;

use crate::charts::{Figure, draw_figure};

/// Show one figure full-screen and block until the user dismisses it.
pub fn show_figure(figure: &Figure) -> Result<()> {
    info!(title = %figure.title, "showing chart");
    enable_raw_mode()?;
    with_restore(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            wait_for_dismiss(&mut terminal, figure)
        },
        restore_terminal,
    )
}

/// Run `body`, then always run `restore`. The body's error wins over the restore's.
fn with_restore<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let res = body();
    let restored = restore();
    let out = res?;
    restored?;
    Ok(out)
}

// Both steps run even if the first one fails.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw?;
    screen?;
    Ok(())
}

fn wait_for_dismiss<B: Backend>(terminal: &mut Terminal<B>, figure: &Figure) -> Result<()> {
    loop {
        terminal.draw(|f| draw_figure(f, figure))?;
        // Resize and other events fall through to a redraw.
        if let Event::Key(key) = event::read()? {
            if is_dismiss_key(&key) {
                return Ok(());
            }
        }
    }
}

pub fn is_dismiss_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')
        )
}
