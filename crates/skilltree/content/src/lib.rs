//! Data-driven skill tree content and loaders.
//!
//! This crate reads authored content from disk and hands it to `skilltree-core`
//! unchanged:
//! - Skill definitions (RON)
//! - Resource catalog entries (RON)
//! - Stat base values (RON)
//! - Session configuration (TOML)
//!
//! Loaders only parse. Every semantic check (duplicate ids, cycles, unknown
//! currencies) happens when the core types are constructed.

#[cfg(feature = "serde")]
pub mod config;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use config::SessionConfig;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, ResourceLoader, SkillLoader, StatLoader,
};
