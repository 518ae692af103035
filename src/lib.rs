pub mod aggregate;
pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod selection;
pub mod session;
pub mod source;
pub mod state;
pub mod storage;
pub mod ui;

pub use aggregate::aggregate;
pub use app::router;
pub use config::{Config, SourceConfig};
pub use session::Session;
pub use state::AppState;
