mod editor_view;
mod key_handler;
mod palette;
mod state;
mod status_bar;
mod study_view;
mod subjects_view;
mod ui;

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use flipcards_core::{PendingAdvance, StudyApp};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::scheduler::AdvanceScheduler;
pub use key_handler::{handle_key, KeyOutcome};
pub use state::{EditorField, TuiState};

pub async fn run(app: StudyApp, advance_delay: Duration) -> Result<()> {
    let mut state = TuiState::new(app);
    let (mut scheduler, mut advances) = AdvanceScheduler::new(advance_delay);
    let (input_tx, mut input) = mpsc::unbounded_channel();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let reader = spawn_input_reader(input_tx);

    // Event loop
    let result = run_loop(
        &mut terminal,
        &mut state,
        &mut scheduler,
        &mut advances,
        &mut input,
    )
    .await;

    // Restore terminal
    drop(input);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if reader.join().is_err() {
        tracing::warn!("input reader panicked");
    }

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    scheduler: &mut AdvanceScheduler,
    advances: &mut mpsc::UnboundedReceiver<PendingAdvance>,
    input: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        tokio::select! {
            event = input.recv() => match event {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let outcome = handle_key(state, key);
                    if outcome.cancel_advance {
                        scheduler.cancel();
                    }
                    if let Some(pending) = outcome.advance {
                        scheduler.schedule(pending);
                    }
                }
                Some(_) => {}
                None => return Ok(()),
            },
            Some(pending) = advances.recv() => {
                state.apply_advance(pending);
            }
        }
    }
}

/// Forward terminal events from a blocking reader thread.
fn spawn_input_reader(tx: mpsc::UnboundedSender<Event>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
                Err(error) => {
                    tracing::error!(%error, "failed to read terminal event");
                    return;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    return;
                }
            }
            Err(error) => {
                tracing::error!(%error, "failed to poll terminal events");
                return;
            }
        }
    })
}
