//! Progression rules for trees of upgradeable skills.
//!
//! `skilltree-core` owns the canonical engine: the validated prerequisite graph
//! and its level state machine, the transactional wallet that pays for upgrades,
//! and the stat aggregator that skill effects feed into. Everything here is
//! synchronous and free of I/O; persistence and content loading plug in through
//! [`ProgressionStore`] and the definition types re-exported below.
//!
//! All level mutation flows through [`SkillGraphService`], and consumers only
//! ever observe [`SkillSnapshot`] value copies.
pub mod catalog;
pub mod definition;
pub mod effects;
pub mod error;
pub mod events;
pub mod graph;
pub mod skill;
pub mod stats;
pub mod store;
pub mod wallet;

mod key;

pub use catalog::{CostCatalog, ResourceCatalog, ResourceEntry};
pub use definition::{
    CostDefinition, EffectDefinition, ModifierOperation, ResourceType, SkillDefinition,
};
pub use effects::EffectBridge;
pub use error::{ConfigError, ErrorSeverity, ProgressionFault, Result, SkillTreeError};
pub use events::{EventQueue, SkillTreeEvent};
pub use graph::{SkillGraphService, UpgradeAvailability, UpgradeOutcome};
pub use skill::{SkillSnapshot, SkillStatus};
pub use stats::{StatAggregator, StatChange, StatDefinition, StatModifier};
pub use store::{LevelMap, ProgressionStore, StoreError};
pub use wallet::{SkillContext, Wallet, WalletError};
