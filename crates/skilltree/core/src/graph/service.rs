//! The skill graph service: sole owner of every skill's level.

use std::collections::HashMap;
use std::sync::Arc;

use crate::definition::SkillDefinition;
use crate::error::{ProgressionFault, Result, SkillTreeError};
use crate::events::{EventQueue, SkillTreeEvent};
use crate::skill::{SkillNode, SkillSnapshot, SkillStatus};
use crate::store::{LevelMap, ProgressionStore};
use crate::wallet::SkillContext;

use super::validation;

/// Result of an upgrade attempt.
///
/// Every variant other than `Success` guarantees the skill's level, the
/// context's balances and the store were left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UpgradeOutcome {
    Success,
    PrerequisiteNotMet,
    Maxed,
    CannotAfford,
    /// Affordability was confirmed but the payment itself was refused.
    TransactionFailed,
}

impl UpgradeOutcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Read-only pre-check of an upgrade, for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeAvailability {
    pub status: SkillStatus,
    /// Only evaluated for unlocked skills; locked and maxed skills report false.
    pub can_afford: bool,
    pub can_upgrade: bool,
}

/// Validated prerequisite graph plus the level of every skill.
///
/// The graph is fixed at construction: no skills are added or removed for the
/// service's lifetime. Levels change only through [`Self::try_upgrade`] and
/// [`Self::reset_progression`], and each such change is persisted through the
/// store and announced on the event queue.
pub struct SkillGraphService {
    nodes: Vec<SkillNode>,
    index: HashMap<String, usize>,
    store: Arc<dyn ProgressionStore>,
    events: EventQueue<SkillTreeEvent>,
}

impl SkillGraphService {
    /// Validate the definitions and hydrate levels from `store`.
    ///
    /// # Errors
    ///
    /// - [`SkillTreeError::Config`] for empty or duplicate ids, a max level
    ///   below 1, an unknown prerequisite, or a prerequisite cycle.
    /// - [`SkillTreeError::Store`] if the initial load fails.
    pub fn new(
        definitions: impl IntoIterator<Item = SkillDefinition>,
        store: Arc<dyn ProgressionStore>,
    ) -> Result<Self> {
        let graph = validation::validate(definitions.into_iter().collect())?;

        let ids: Vec<&str> = graph
            .definitions
            .iter()
            .map(|definition| definition.id.as_str())
            .collect();
        let saved = store.load_all(&ids)?;

        let nodes: Vec<SkillNode> = graph
            .definitions
            .into_iter()
            .zip(graph.prerequisites)
            .map(|(definition, prerequisites)| {
                let level = match saved.get(&definition.id) {
                    Some(level) => *level,
                    None => 0,
                };
                SkillNode::new(definition, level, prerequisites)
            })
            .collect();

        tracing::debug!(
            "skill graph ready: {} skills, {} with saved progress",
            nodes.len(),
            nodes.iter().filter(|node| node.level() > 0).count()
        );

        Ok(Self {
            nodes,
            index: graph.index,
            store,
            events: EventQueue::new(),
        })
    }

    fn position(&self, skill_id: &str) -> Result<usize> {
        self.index
            .get(skill_id)
            .copied()
            .ok_or_else(|| SkillTreeError::SkillNotFound(skill_id.to_string()))
    }

    fn prerequisites_met_at(&self, position: usize) -> bool {
        // Any positive level unlocks dependents, regardless of the
        // prerequisite's own max level.
        self.nodes[position]
            .prerequisites()
            .iter()
            .all(|&prerequisite| self.nodes[prerequisite].level() >= 1)
    }

    fn status_at(&self, position: usize) -> SkillStatus {
        if !self.prerequisites_met_at(position) {
            SkillStatus::Locked
        } else if self.nodes[position].is_maxed() {
            SkillStatus::Maxed
        } else {
            SkillStatus::Unlocked
        }
    }

    /// True when every prerequisite of `skill_id` has level ≥ 1.
    pub fn are_prerequisites_met(&self, skill_id: &str) -> Result<bool> {
        let position = self.position(skill_id)?;
        Ok(self.prerequisites_met_at(position))
    }

    pub fn status(&self, skill_id: &str) -> Result<SkillStatus> {
        let position = self.position(skill_id)?;
        Ok(self.status_at(position))
    }

    /// Evaluate an upgrade without attempting it.
    pub fn availability<C>(&self, skill_id: &str, context: &C) -> Result<UpgradeAvailability>
    where
        C: SkillContext + ?Sized,
    {
        let position = self.position(skill_id)?;
        let status = self.status_at(position);
        let can_afford = status == SkillStatus::Unlocked
            && context.can_pay(self.nodes[position].upgrade_costs());

        Ok(UpgradeAvailability {
            status,
            can_afford,
            can_upgrade: can_afford,
        })
    }

    /// Attempt to raise `skill_id` by one level, paying through `context`.
    ///
    /// Checks run in a fixed order: prerequisites, max level, affordability,
    /// payment. The level only moves after the payment succeeds, so there is no
    /// state in which the cost was charged but the level was not raised.
    ///
    /// On success every level is saved in a single store call and one
    /// [`SkillTreeEvent::LevelChanged`] is queued.
    ///
    /// # Errors
    ///
    /// - [`SkillTreeError::SkillNotFound`] for an unknown id.
    /// - [`SkillTreeError::Store`] if persisting fails after the upgrade was
    ///   applied. The payment and the new level stand, and the event is still
    ///   queued so consumers match the in-memory state.
    pub fn try_upgrade<C>(&mut self, skill_id: &str, context: &mut C) -> Result<UpgradeOutcome>
    where
        C: SkillContext + ?Sized,
    {
        let position = self.position(skill_id)?;

        if !self.prerequisites_met_at(position) {
            return Ok(UpgradeOutcome::PrerequisiteNotMet);
        }
        if self.nodes[position].is_maxed() {
            return Ok(UpgradeOutcome::Maxed);
        }

        let node = &self.nodes[position];
        if !context.can_pay(node.upgrade_costs()) {
            return Ok(UpgradeOutcome::CannotAfford);
        }
        if !context.try_pay(node.upgrade_costs()) {
            tracing::warn!(
                "payment for '{}' refused after affordability was confirmed",
                skill_id
            );
            return Ok(UpgradeOutcome::TransactionFailed);
        }

        let node = &mut self.nodes[position];
        node.increase_level();
        let snapshot = node.snapshot();
        tracing::debug!(
            "upgraded '{}' to level {}/{}",
            snapshot.id(),
            snapshot.level(),
            snapshot.max_level()
        );

        let saved = self.save_progression();
        self.events.push(SkillTreeEvent::LevelChanged(snapshot));
        saved?;

        Ok(UpgradeOutcome::Success)
    }

    /// Drop every skill to level 0, save once and queue one
    /// [`SkillTreeEvent::LevelsReset`].
    pub fn reset_progression(&mut self) -> Result<()> {
        for node in &mut self.nodes {
            node.set_level(0);
        }
        tracing::debug!("reset progression for {} skills", self.nodes.len());

        let saved = self.save_progression();
        self.events.push(SkillTreeEvent::LevelsReset);
        saved
    }

    /// Persist the full level map in one store call.
    pub fn save_progression(&self) -> Result<()> {
        let levels = self.level_map();
        self.store.save_all(&levels).map_err(|err| {
            tracing::warn!(
                "failed to save progression [{} {}]: {}",
                err.severity().as_str(),
                err.error_code(),
                err
            );
            SkillTreeError::Store(err)
        })
    }

    /// Current level of every skill.
    pub fn level_map(&self) -> LevelMap {
        self.nodes
            .iter()
            .map(|node| {
                let level = i32::try_from(node.level()).unwrap_or(i32::MAX);
                (node.id().to_string(), level)
            })
            .collect()
    }

    pub fn skill(&self, skill_id: &str) -> Result<SkillSnapshot> {
        let position = self.position(skill_id)?;
        Ok(self.nodes[position].snapshot())
    }

    /// Snapshots of every skill in authored order.
    pub fn skills(&self) -> Vec<SkillSnapshot> {
        self.nodes.iter().map(SkillNode::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Take every pending notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<SkillTreeEvent> {
        self.events.drain()
    }
}

impl core::fmt::Debug for SkillGraphService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkillGraphService")
            .field("nodes", &self.nodes)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}
