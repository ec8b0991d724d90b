//! Full-screen terminal view of the exam schedule.
//!
//! The event loop uses `tokio::select!` to handle:
//! - Countdown updates from the refresh task (once per second)
//! - User keyboard input (q/ESC quit, d toggles the dark palette, arrows scroll)
//!
//! The view owns the [`RefreshHandle`] and shuts it down before returning.

use crate::Config;
use crate::clock::SystemClock;
use crate::countdown::Locale;
use crate::pool::RefreshHandle;
use crate::schedule::{ExamEvent, Schedule};
use crate::state::Update;
use crate::ui::modern_helpers::draw_schedule;
use crate::ui::styles::ScheduleStyles;
use crossterm::{
    event::{Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

const PAGE: u16 = 10;

/// UI state for the full-screen view
pub struct ModernUIState {
    pub last_update: Option<Update>,
    pub scroll: u16,
    pub dark: bool,
    pub should_exit: bool,
}

impl ModernUIState {
    pub fn new(dark: bool) -> Self {
        Self {
            last_update: None,
            scroll: 0,
            dark,
            should_exit: false,
        }
    }
}

/// Display the schedule in the full-screen view until the user quits.
pub async fn display_schedule_modern(
    schedule: Schedule,
    config: Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel(32);
    let events: Arc<[ExamEvent]> = schedule.events.clone().into();
    let refresh = RefreshHandle::spawn(events, SystemClock, config.refresh_config(), tx);

    enable_raw_mode().map_err(to_boxed_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(to_boxed_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(to_boxed_err)?;

    // Single background thread to poll for crossterm events and forward them
    // to the async runtime via `event_rx`.
    let (event_tx, mut event_rx) = mpsc::channel(32);
    thread::spawn(move || {
        loop {
            match crossterm::event::poll(std::time::Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if let Err(mpsc::error::TrySendError::Closed(_)) = event_tx.try_send(ev) {
                            break;
                        }
                    }
                    Err(_) => {
                        // ignore and continue polling
                    }
                },
                Ok(false) => {
                    if event_tx.is_closed() {
                        break;
                    }
                }
                Err(_) => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    let mut state = ModernUIState::new(config.dark);
    let result = run_loop(
        &mut terminal,
        &schedule,
        config.locale,
        &mut state,
        &mut rx,
        &mut event_rx,
    )
    .await;

    // Restore the terminal even when drawing failed.
    let restored = disable_raw_mode()
        .and_then(|_| execute!(io::stdout(), LeaveAlternateScreen))
        .map_err(to_boxed_err);
    refresh.shutdown().await;
    result.and(restored)
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    schedule: &Schedule,
    locale: Locale,
    state: &mut ModernUIState,
    rx: &mut mpsc::Receiver<Update>,
    event_rx: &mut mpsc::Receiver<Event>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    redraw(terminal, schedule, locale, state)?;
    while !state.should_exit {
        tokio::select! {
            biased;

            // Countdown refresh
            update = rx.recv() => {
                process_update(update, state);
                redraw(terminal, schedule, locale, state)?;
            }

            // User keyboard input
            maybe_event = event_rx.recv() => {
                if let Some(event) = maybe_event {
                    process_event(event, state);
                    redraw(terminal, schedule, locale, state)?;
                } else {
                    state.should_exit = true;
                }
            }
        }
    }
    Ok(())
}

fn redraw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    schedule: &Schedule,
    locale: Locale,
    state: &mut ModernUIState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let styles = ScheduleStyles::new(state.dark);
    draw_schedule(
        terminal,
        schedule,
        state.last_update.as_ref(),
        locale,
        &styles,
        &mut state.scroll,
    )
}

/// Store the latest countdown snapshot. A closed channel means the refresh
/// task is gone, so the view exits.
fn process_update(update: Option<Update>, state: &mut ModernUIState) {
    match update {
        Some(update) => state.last_update = Some(update),
        None => state.should_exit = true,
    }
}

/// Handle user input events (keyboard)
fn process_event(event: Event, state: &mut ModernUIState) {
    let Event::Key(key) = event else {
        return;
    };
    if key.kind == KeyEventKind::Release {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_exit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_exit = true;
        }
        KeyCode::Char('d') => state.dark = !state.dark,
        KeyCode::Up | KeyCode::Char('k') => state.scroll = state.scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => state.scroll = state.scroll.saturating_add(1),
        KeyCode::PageUp => state.scroll = state.scroll.saturating_sub(PAGE),
        KeyCode::PageDown | KeyCode::Char(' ') => state.scroll = state.scroll.saturating_add(PAGE),
        KeyCode::Home | KeyCode::Char('g') => state.scroll = 0,
        KeyCode::End | KeyCode::Char('G') => state.scroll = u16::MAX,
        _ => {}
    }
}

fn to_boxed_err<E: std::error::Error + Send + Sync + 'static>(
    e: E,
) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CountdownState;
    use crossterm::event::KeyEvent;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn keys_quit_toggle_and_scroll() {
        let mut state = ModernUIState::new(false);
        process_event(key(KeyCode::Char('d')), &mut state);
        assert!(state.dark);
        process_event(key(KeyCode::Down), &mut state);
        process_event(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll, 11);
        process_event(key(KeyCode::Home), &mut state);
        assert_eq!(state.scroll, 0);
        process_event(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll, 0);
        assert!(!state.should_exit);
        process_event(
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            &mut state,
        );
        assert!(state.should_exit);
    }

    #[test]
    fn closed_update_channel_exits() {
        let mut state = ModernUIState::new(false);
        process_update(Some(Update::default()), &mut state);
        assert!(state.last_update.is_some());
        process_update(None, &mut state);
        assert!(state.should_exit);
    }

    #[tokio::test]
    async fn loop_renders_updates_until_quit() {
        let now = chrono::Utc::now();
        let schedule = Schedule::builtin(&now).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut state = ModernUIState::new(false);
        let (tx, mut rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);

        let update = Update {
            state: Arc::new(CountdownState::recompute(
                &schedule.events,
                now.timestamp_millis(),
                Locale::English,
            )),
            now: now.timestamp_millis(),
            version: 1,
        };
        tx.send(update).await.unwrap();
        event_tx.send(key(KeyCode::Char('q'))).await.unwrap();

        run_loop(&mut terminal, &schedule, Locale::English, &mut state, &mut rx, &mut event_rx)
            .await
            .unwrap();
        assert!(state.should_exit);
        assert_eq!(state.last_update.map(|u| u.version), Some(1));
    }
}
