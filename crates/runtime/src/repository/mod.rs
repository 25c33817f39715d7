//! Progression stores.
//!
//! Stores hold the only data that changes while a tree is played: the level of
//! each skill. Skill, resource and stat definitions are static content and are
//! loaded by `skilltree-content` instead.
//!
//! Both implementations are safe to share behind `Arc<dyn ProgressionStore>`.

mod file;
mod memory;

pub use file::FileProgressStore;
pub use memory::InMemoryProgressStore;
