//! Memory Infrastructure - 内存实现

mod session_manager;

pub use session_manager::InMemorySessionManager;
