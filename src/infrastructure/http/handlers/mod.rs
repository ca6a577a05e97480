//! HTTP Handlers

mod audio;
mod chat;
mod language;
mod ping;
mod session;

pub use audio::*;
pub use chat::*;
pub use language::*;
pub use ping::*;
pub use session::*;
