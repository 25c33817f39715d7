//! Runtime skill state and the snapshots handed to consumers.

use std::sync::Arc;

use crate::definition::{CostDefinition, EffectDefinition, SkillDefinition};

/// Position of a skill in the level state machine.
///
/// ```text
/// Locked ──(every prerequisite reaches level 1)──▶ Unlocked ──(level == max)──▶ Maxed
///    ▲                                                                            │
///    └──────────────────────────────(reset)───────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkillStatus {
    Locked,
    Unlocked,
    Maxed,
}

/// One skill owned by [`crate::SkillGraphService`].
///
/// The node is the only holder of its level counter; the service mutates it
/// through the crate-private methods below and nothing else can.
#[derive(Debug)]
pub(crate) struct SkillNode {
    definition: Arc<SkillDefinition>,
    level: u32,
    /// Indices of prerequisite nodes inside the owning service.
    prerequisites: Vec<usize>,
}

impl SkillNode {
    /// `stored` is clamped into `[0, max_level]`.
    pub(crate) fn new(definition: Arc<SkillDefinition>, stored: i32, prerequisites: Vec<usize>) -> Self {
        let level = u32::try_from(stored).unwrap_or(0).min(definition.max_level);
        Self {
            definition,
            level,
            prerequisites,
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.definition.id
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn is_maxed(&self) -> bool {
        self.level >= self.definition.max_level
    }

    pub(crate) fn prerequisites(&self) -> &[usize] {
        &self.prerequisites
    }

    pub(crate) fn upgrade_costs(&self) -> &[CostDefinition] {
        &self.definition.upgrade_costs
    }

    /// Returns false and leaves the level alone once maxed.
    pub(crate) fn increase_level(&mut self) -> bool {
        if self.is_maxed() {
            return false;
        }
        self.level += 1;
        true
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level.min(self.definition.max_level);
    }

    pub(crate) fn snapshot(&self) -> SkillSnapshot {
        SkillSnapshot {
            definition: Arc::clone(&self.definition),
            level: self.level,
        }
    }
}

/// Immutable copy of a skill at one point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillSnapshot {
    definition: Arc<SkillDefinition>,
    level: u32,
}

impl SkillSnapshot {
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Display name, or the id when none is authored.
    pub fn display_name(&self) -> &str {
        match self.definition.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.definition.id,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.definition.max_level
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.definition.max_level
    }

    /// Single-level skills behave like on/off toggles.
    pub fn is_discrete(&self) -> bool {
        self.definition.max_level == 1
    }

    pub fn prerequisite_ids(&self) -> &[String] {
        &self.definition.prerequisite_ids
    }

    pub fn upgrade_costs(&self) -> &[CostDefinition] {
        &self.definition.upgrade_costs
    }

    pub fn effects(&self) -> &[EffectDefinition] {
        &self.definition.effects
    }

    pub fn definition(&self) -> &SkillDefinition {
        &self.definition
    }
}
