//! Runtime wiring for skill tree sessions.
//!
//! This crate connects the pure engine in `skilltree-core` to the outside
//! world: concrete progression stores, content loading, and logging.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts [`SkillTreeSession`], the bootstrap most callers want
//! - [`repository`] provides the in-memory and JSON file stores
//! - [`logging`] installs the tracing subscriber
//! - [`dirs`] resolves platform data locations
pub mod dirs;
pub mod logging;
pub mod repository;
pub mod session;

pub use logging::{LogConfig, init_tracing};
pub use repository::{FileProgressStore, InMemoryProgressStore};
pub use session::SkillTreeSession;
