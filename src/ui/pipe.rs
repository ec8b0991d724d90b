use crate::Config;
use crate::clock::SystemClock;
use crate::pool::RefreshHandle;
use crate::schedule::{ExamEvent, Schedule};
use crate::state::{CountdownState, Update};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lines for events whose label differs from the last one printed,
/// as `id<TAB>title<TAB>label`. Records what it returns in `last`.
pub fn changed_lines(
    events: &[ExamEvent],
    state: &CountdownState,
    last: &mut HashMap<u32, String>,
) -> Vec<String> {
    let mut out = Vec::new();
    for event in events {
        let Some(label) = state.label(event.id) else {
            continue;
        };
        if last.get(&event.id).map(String::as_str) == Some(label) {
            continue;
        }
        out.push(format!("{}\t{}\t{}", event.id, event.title, label));
        last.insert(event.id, label.to_string());
    }
    out
}

/// Display countdowns in pipe mode (stdout only, for scripting). Stops on
/// Ctrl-C, after the first snapshot with `--once`, or once every event has
/// expired.
pub async fn display_schedule_pipe(
    schedule: Schedule,
    config: Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel(32);
    let events: Arc<[ExamEvent]> = schedule.events.clone().into();
    let refresh = RefreshHandle::spawn(events, SystemClock, config.refresh_config(), tx);

    let result = print_updates(&schedule, &config, &mut rx).await;
    refresh.shutdown().await;
    result
}

async fn print_updates(
    schedule: &Schedule,
    config: &Config,
    rx: &mut mpsc::Receiver<Update>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut last: HashMap<u32, String> = HashMap::new();
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
    loop {
        tokio::select! {
            upd = rx.recv() => {
                let Some(upd) = upd else { break };
                let mut out = std::io::stdout().lock();
                for line in changed_lines(&schedule.events, &upd.state, &mut last) {
                    writeln!(out, "{line}")?;
                }
                out.flush()?;
                if config.once || upd.state.all_expired() {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }
    Ok(())
}
