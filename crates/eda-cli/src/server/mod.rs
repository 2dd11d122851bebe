//! HTTP quality service.

pub mod app;
mod error;
mod handlers;
pub mod state;

pub use app::run_server;
pub use state::AppState;
