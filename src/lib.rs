pub mod app;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod report;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::AppConfig;
pub use format::{DateFormatter, KoreanFormatter};
pub use report::generate_text_report;
pub use state::AppState;
pub use store::RecordStore;
