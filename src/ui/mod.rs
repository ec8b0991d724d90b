pub mod modern;
pub mod modern_helpers;
pub mod pipe;
pub mod styles;

// Re-export the entry points so callers can use `crate::ui::display_schedule_modern(...)`.
pub use modern::display_schedule_modern;
pub use pipe::display_schedule_pipe;
