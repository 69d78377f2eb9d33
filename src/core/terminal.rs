//! Terminal setup/teardown and the main event loop.
//!
//! Owns the background [RefreshScheduler]: the timer thread only posts a
//! signal, and the loop drains it here so every re-scan and state mutation
//! happens on this thread between keypresses.

use crate::app::state::{AppState, KeypressResult};
use crate::core::refresh::RefreshScheduler;
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Initializes the terminal in raw mode and alternate screen, starts the
/// refresh timer and runs the event loop. Blocks until quit; the timer
/// thread is joined before teardown.
pub fn run_terminal(app: &mut AppState, refresh_interval: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut scheduler = RefreshScheduler::spawn(refresh_interval);
    let result = event_loop(&mut terminal, app, &scheduler);
    scheduler.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    scheduler: &RefreshScheduler,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        // Coalesced timer signal: at most one pending re-scan regardless of
        // how long the loop was busy.
        if scheduler.take_tick() {
            app.refresh();
            terminal.draw(|f| ui::render(f, app))?;
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_keypress(key) {
                        KeypressResult::Quit => break,
                        KeypressResult::OpenedEditor => {
                            terminal.clear()?;
                        }
                        KeypressResult::Continue => {}
                    }
                    terminal.draw(|f| ui::render(f, app))?;
                }
                Event::Resize(_, _) => {
                    terminal.draw(|f| ui::render(f, app))?;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
