//! Bridge from skill levels to stat modifiers.
//!
//! The bridge keeps no state of its own: every skill is the modifier source
//! named by its id, and re-applying a skill always starts by revoking that
//! source. Modifier state can therefore be rebuilt from levels at any time.

use crate::definition::ModifierOperation;
use crate::events::SkillTreeEvent;
use crate::graph::SkillGraphService;
use crate::skill::SkillSnapshot;
use crate::stats::StatAggregator;
use crate::stats::modifier::approximately_zero;

/// Applies skill effects to a [`StatAggregator`].
pub struct EffectBridge;

impl EffectBridge {
    /// Scale an effect's per-level magnitude to `level`.
    ///
    /// Additive operations scale linearly (`value × level`), multiplicative
    /// ones compound (`value ^ level`). Level 0 contributes nothing.
    pub fn resolve_value_by_level(operation: ModifierOperation, value: f64, level: u32) -> f64 {
        if level == 0 {
            return 0.0;
        }
        if operation.is_additive() {
            value * f64::from(level)
        } else {
            value.powi(i32::try_from(level).unwrap_or(i32::MAX))
        }
    }

    /// Revoke the skill's modifiers and apply its stat effects for its
    /// current level. Returns the number of modifiers applied.
    pub fn reapply_skill(skill: &SkillSnapshot, stats: &mut StatAggregator) -> usize {
        stats.remove_modifiers_by_source(skill.id());
        if skill.level() == 0 {
            return 0;
        }

        let mut applied = 0;
        for effect in skill.effects() {
            if !effect.targets_stat() || effect.stat_id.trim().is_empty() {
                continue;
            }

            let value = Self::resolve_value_by_level(effect.operation, effect.value, skill.level());
            if approximately_zero(value) {
                continue;
            }

            if stats.apply_modifier(skill.id(), &effect.stat_id, effect.operation, value) {
                applied += 1;
            }
        }

        tracing::trace!(
            "applied {} modifiers for '{}' at level {}",
            applied,
            skill.id(),
            skill.level()
        );
        applied
    }

    /// Re-apply every skill, e.g. right after the service was constructed
    /// from saved progress.
    pub fn sync_all(service: &SkillGraphService, stats: &mut StatAggregator) {
        for skill in service.skills() {
            Self::reapply_skill(&skill, stats);
        }
    }

    pub fn handle_event(
        event: &SkillTreeEvent,
        service: &SkillGraphService,
        stats: &mut StatAggregator,
    ) {
        match event {
            SkillTreeEvent::LevelChanged(skill) => {
                Self::reapply_skill(skill, stats);
            }
            SkillTreeEvent::LevelsReset => {
                for skill in service.skills() {
                    stats.remove_modifiers_by_source(skill.id());
                }
            }
        }
    }

    /// Drain the service's pending events into the aggregator. Returns the
    /// number of events handled.
    pub fn pump(service: &mut SkillGraphService, stats: &mut StatAggregator) -> usize {
        let events = service.drain_events();
        for event in &events {
            Self::handle_event(event, service, stats);
        }
        events.len()
    }
}
