pub mod app;
pub mod config;
pub mod daily;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod storage;
pub mod timetable;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::{Config, SemesterWindow};
pub use scoring::record_mark;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timetable::Timetable;
pub use tracker::Tracker;
