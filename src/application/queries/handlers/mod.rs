//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod audio_handlers;
mod history_handlers;
mod language_handlers;

pub use audio_handlers::*;
pub use history_handlers::*;
pub use language_handlers::*;
