//! Static, externally supplied definitions.
//!
//! These types describe a skill tree as authored in content files. They are
//! immutable once handed to [`crate::SkillGraphService`], which wraps each
//! [`SkillDefinition`] in an `Arc` and shares it with every snapshot.

/// Category of a resource referenced by a cost.
///
/// Only [`ResourceType::Currency`] costs are chargeable by [`crate::Wallet`];
/// the other categories are recognised by the catalog but fail affordability
/// checks closed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceType {
    Currency,
    Item,
    Energy,
}

/// One line of an upgrade cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostDefinition {
    pub key: String,
    pub resource_type: ResourceType,
    /// Chargeable only when strictly positive.
    pub amount: i64,
}

impl CostDefinition {
    pub fn new(key: impl Into<String>, resource_type: ResourceType, amount: i64) -> Self {
        Self {
            key: key.into(),
            resource_type,
            amount,
        }
    }

    /// Shorthand for a currency cost line.
    pub fn currency(key: impl Into<String>, amount: i64) -> Self {
        Self::new(key, ResourceType::Currency, amount)
    }
}

/// Arithmetic applied by a stat modifier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ModifierOperation {
    /// True for the operations that scale linearly with level.
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

/// A single effect a skill contributes while it has a positive level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    /// Free-form tag. Only [`EffectDefinition::STAT_TARGET`] is interpreted;
    /// anything else passes through untouched.
    pub target_type: String,
    pub stat_id: String,
    pub operation: ModifierOperation,
    /// Per-level magnitude, resolved by [`crate::EffectBridge::resolve_value_by_level`].
    pub value: f64,
}

impl EffectDefinition {
    pub const STAT_TARGET: &'static str = "Stat";

    /// Effect targeting a stat of the aggregator.
    pub fn stat(stat_id: impl Into<String>, operation: ModifierOperation, value: f64) -> Self {
        Self {
            target_type: Self::STAT_TARGET.to_string(),
            stat_id: stat_id.into(),
            operation,
            value,
        }
    }

    pub fn targets_stat(&self) -> bool {
        self.target_type
            .trim()
            .eq_ignore_ascii_case(Self::STAT_TARGET)
    }
}

/// Authored definition of one skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    pub max_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisite_ids: Vec<String>,
    /// Charged in full for every level; identical across levels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade_costs: Vec<CostDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDefinition>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, max_level: u32) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            description: None,
            max_level,
            prerequisite_ids: Vec::new(),
            upgrade_costs: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_prerequisites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisite_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_cost(mut self, cost: CostDefinition) -> Self {
        self.upgrade_costs.push(cost);
        self
    }

    pub fn with_effect(mut self, effect: EffectDefinition) -> Self {
        self.effects.push(effect);
        self
    }
}
