//! Per-stat base values and modifier lists.

use std::collections::{BTreeMap, HashMap};

use crate::definition::ModifierOperation;
use crate::events::EventQueue;
use crate::key::normalize_key;

use super::modifier::{ModifierTotals, StatModifier, approximately_zero};

/// Authored base value for one stat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDefinition {
    pub stat_id: String,
    pub base_value: f64,
}

impl StatDefinition {
    pub fn new(stat_id: impl Into<String>, base_value: f64) -> Self {
        Self {
            stat_id: stat_id.into(),
            base_value,
        }
    }
}

/// Notification that a stat's final value may have moved.
#[derive(Clone, Debug, PartialEq)]
pub struct StatChange {
    pub stat_id: String,
    pub value: f64,
}

/// Accumulates modifiers per stat and evaluates final values on demand.
///
/// Stat and source ids are trimmed and compared case-insensitively. Entries are
/// created on first use; a stat that was never given a base reads as 0.
#[derive(Debug, Default)]
pub struct StatAggregator {
    definitions: Vec<StatDefinition>,
    base_values: HashMap<String, f64>,
    modifiers: BTreeMap<String, Vec<StatModifier>>,
    changes: EventQueue<StatChange>,
}

impl StatAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = StatDefinition>) -> Self {
        let mut aggregator = Self {
            definitions: definitions.into_iter().collect(),
            ..Self::default()
        };
        aggregator.rebuild_base_stats();
        aggregator
    }

    /// Reset base values to the authored definitions. Modifiers are kept.
    pub fn rebuild_base_stats(&mut self) {
        self.base_values.clear();
        for definition in &self.definitions {
            if let Some(stat_id) = normalize_key(&definition.stat_id) {
                self.base_values.insert(stat_id, definition.base_value);
            }
        }
    }

    pub fn base_value(&self, stat_id: &str) -> f64 {
        let Some(stat_id) = normalize_key(stat_id) else {
            return 0.0;
        };
        match self.base_values.get(&stat_id) {
            Some(value) => *value,
            None => 0.0,
        }
    }

    pub fn set_base_value(&mut self, stat_id: &str, value: f64) {
        let Some(stat_id) = normalize_key(stat_id) else {
            tracing::trace!("ignoring base value for blank stat id");
            return;
        };
        self.base_values.insert(stat_id.clone(), value);
        self.raise_changed(stat_id);
    }

    /// `(base + Σadd − Σsubtract) × Πmultiply ÷ Πdivide`.
    pub fn final_value(&self, stat_id: &str) -> f64 {
        let Some(stat_id) = normalize_key(stat_id) else {
            return 0.0;
        };
        self.final_value_normalized(&stat_id)
    }

    fn final_value_normalized(&self, stat_id: &str) -> f64 {
        let base = match self.base_values.get(stat_id) {
            Some(value) => *value,
            None => 0.0,
        };
        match self.modifiers.get(stat_id) {
            Some(modifiers) => ModifierTotals::collect(modifiers).apply(base),
            None => base,
        }
    }

    /// Append one modifier. Returns false when the modifier was dropped: a
    /// blank source or stat id, or a divide by (approximately) zero.
    pub fn apply_modifier(
        &mut self,
        source_id: &str,
        stat_id: &str,
        operation: ModifierOperation,
        value: f64,
    ) -> bool {
        let (Some(source_id), Some(stat_id)) = (normalize_key(source_id), normalize_key(stat_id))
        else {
            tracing::trace!("dropping modifier with blank source or stat id");
            return false;
        };
        if operation == ModifierOperation::Divide && approximately_zero(value) {
            tracing::trace!("dropping zero divisor from '{}' on '{}'", source_id, stat_id);
            return false;
        }

        self.modifiers
            .entry(stat_id.clone())
            .or_default()
            .push(StatModifier::new(source_id, stat_id.clone(), operation, value));
        self.raise_changed(stat_id);
        true
    }

    /// Remove every modifier contributed by `source_id`, across all stats.
    ///
    /// One [`StatChange`] is raised per stat whose list actually shrank.
    /// Returns the number of modifiers removed.
    pub fn remove_modifiers_by_source(&mut self, source_id: &str) -> usize {
        let Some(source_id) = normalize_key(source_id) else {
            return 0;
        };

        let mut removed = 0;
        let mut changed = Vec::new();
        for (stat_id, modifiers) in &mut self.modifiers {
            let before = modifiers.len();
            modifiers.retain(|modifier| modifier.source_id != source_id);
            if modifiers.len() != before {
                removed += before - modifiers.len();
                changed.push(stat_id.clone());
            }
        }

        for stat_id in changed {
            self.raise_changed(stat_id);
        }
        removed
    }

    /// Modifiers currently applied to a stat, in application order.
    pub fn modifiers(&self, stat_id: &str) -> &[StatModifier] {
        normalize_key(stat_id)
            .and_then(|stat_id| self.modifiers.get(&stat_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every stat that has a base value or has ever received a modifier.
    pub fn stat_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .base_values
            .keys()
            .chain(self.modifiers.keys())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Take every pending change notification, oldest first.
    pub fn drain_changes(&mut self) -> Vec<StatChange> {
        self.changes.drain()
    }

    fn raise_changed(&mut self, stat_id: String) {
        let value = self.final_value_normalized(&stat_id);
        self.changes.push(StatChange { stat_id, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn aggregator() -> StatAggregator {
        StatAggregator::from_definitions([
            StatDefinition::new("spell_power", 100.0),
            StatDefinition::new("mana_regen", 5.0),
            StatDefinition::new("  ", 1.0),
        ])
    }

    #[test]
    fn no_modifiers_yields_base() {
        let stats = aggregator();
        assert_eq!(stats.final_value("spell_power"), 100.0);
        assert_eq!(stats.final_value("SPELL_POWER"), 100.0);
        assert_eq!(stats.final_value("unknown"), 0.0);
        assert_eq!(stats.final_value(""), 0.0);
    }

    #[test]
    fn add_and_subtract_of_equal_size_cancel() {
        let mut stats = aggregator();
        stats.apply_modifier("a", "spell_power", ModifierOperation::Add, 2.0);
        stats.apply_modifier("b", "spell_power", ModifierOperation::Subtract, 2.0);
        assert!((stats.final_value("spell_power") - 100.0).abs() < EPSILON);
    }

    #[test]
    fn guarded_modifiers_are_dropped() {
        let mut stats = aggregator();
        assert!(!stats.apply_modifier(" ", "spell_power", ModifierOperation::Add, 1.0));
        assert!(!stats.apply_modifier("a", "", ModifierOperation::Add, 1.0));
        assert!(!stats.apply_modifier("a", "spell_power", ModifierOperation::Divide, 0.0));
        assert!(stats.modifiers("spell_power").is_empty());
        assert!(stats.drain_changes().is_empty());
    }

    #[test]
    fn tiny_divisor_is_kept() {
        let mut stats = aggregator();
        assert!(stats.apply_modifier("a", "spell_power", ModifierOperation::Divide, 1e-7));
        assert!((stats.final_value("spell_power") - 1e9).abs() < 1e-3);
    }

    #[test]
    fn remove_by_source_only_touches_that_source() {
        let mut stats = aggregator();
        stats.apply_modifier("ember_bolt", "spell_power", ModifierOperation::Add, 10.0);
        stats.apply_modifier("ember_bolt", "mana_regen", ModifierOperation::Multiply, 2.0);
        stats.apply_modifier("core", "spell_power", ModifierOperation::Multiply, 1.5);
        stats.drain_changes();

        let removed = stats.remove_modifiers_by_source("Ember_Bolt");

        assert_eq!(removed, 2);
        assert!((stats.final_value("spell_power") - 150.0).abs() < EPSILON);
        assert_eq!(stats.final_value("mana_regen"), 5.0);
        assert_eq!(stats.modifiers("spell_power").len(), 1);
    }

    #[test]
    fn removal_notifies_once_per_changed_stat() {
        let mut stats = aggregator();
        stats.apply_modifier("ember_bolt", "spell_power", ModifierOperation::Add, 1.0);
        stats.apply_modifier("ember_bolt", "spell_power", ModifierOperation::Add, 1.0);
        stats.apply_modifier("core", "mana_regen", ModifierOperation::Add, 1.0);
        stats.drain_changes();

        stats.remove_modifiers_by_source("ember_bolt");

        let changes = stats.drain_changes();
        assert_eq!(
            changes,
            vec![StatChange {
                stat_id: "spell_power".into(),
                value: 100.0
            }]
        );
        assert_eq!(stats.remove_modifiers_by_source("ember_bolt"), 0);
        assert!(stats.drain_changes().is_empty());
    }

    #[test]
    fn apply_and_set_base_raise_changes_with_new_value() {
        let mut stats = aggregator();
        stats.apply_modifier("a", "Spell_Power", ModifierOperation::Add, 20.0);
        stats.set_base_value("spell_power", 50.0);
        stats.set_base_value(" ", 1.0);

        let changes = stats.drain_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].value, 120.0);
        assert_eq!(changes[1].value, 70.0);
        assert_eq!(stats.base_value("spell_power"), 50.0);
    }

    #[test]
    fn rebuild_restores_authored_bases() {
        let mut stats = aggregator();
        stats.set_base_value("spell_power", 1.0);
        stats.rebuild_base_stats();
        assert_eq!(stats.base_value("spell_power"), 100.0);
        assert_eq!(
            stats.stat_ids(),
            vec!["mana_regen".to_string(), "spell_power".to_string()]
        );
    }
}
