use clap::Parser;
use exam_schedule::config::SCHEDULE_ENV;
use exam_schedule::schedule::load_schedule;
use exam_schedule::{Config, Schedule};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut cfg = Config::parse();
    cfg.schedule_from_env_if_empty(std::env::var(SCHEDULE_ENV).ok());
    exam_schedule::logging::init_logging(cfg.debug_log);

    let now = chrono::Local::now();
    let schedule = match &cfg.schedule {
        Some(path) => load_schedule(path, &now).await,
        None => Schedule::builtin(&now),
    };
    let schedule = match schedule {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e.into());
        }
    };
    tracing::debug!(events = schedule.events.len(), pipe = cfg.pipe, "Schedule ready");

    let result = if cfg.pipe {
        exam_schedule::ui::display_schedule_pipe(schedule, cfg.clone()).await
    } else {
        exam_schedule::ui::display_schedule_modern(schedule, cfg.clone()).await
    };

    // Print error if any, for better diagnostics
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}
