//! API request handlers.

mod health;
mod quality;

pub use health::*;
pub use quality::*;
