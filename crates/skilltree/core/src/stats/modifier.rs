//! Modifier values and the fixed combination formula.
//!
//! ```text
//! final = (base + Σadd − Σsubtract) × Πmultiply ÷ Πdivide
//! ```
//!
//! Each accumulator is commutative within its own operation, so the order in
//! which modifiers were applied never changes the result. The additive terms
//! are always combined before the multiplicative ones.

use crate::definition::ModifierOperation;

/// Values closer to zero than this are treated as zero. Only zero and
/// subnormals qualify, so tiny but meaningful magnitudes are kept.
pub const ZERO_TOLERANCE: f64 = f64::MIN_POSITIVE;

pub fn approximately_zero(value: f64) -> bool {
    value.abs() < ZERO_TOLERANCE
}

/// One `(source, operation, value)` contribution to a stat.
#[derive(Clone, Debug, PartialEq)]
pub struct StatModifier {
    pub source_id: String,
    pub stat_id: String,
    pub operation: ModifierOperation,
    pub value: f64,
}

impl StatModifier {
    pub fn new(
        source_id: impl Into<String>,
        stat_id: impl Into<String>,
        operation: ModifierOperation,
        value: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            stat_id: stat_id.into(),
            operation,
            value,
        }
    }
}

/// Running accumulators for the four operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModifierTotals {
    pub add: f64,
    pub subtract: f64,
    pub multiply: f64,
    pub divide: f64,
}

impl Default for ModifierTotals {
    fn default() -> Self {
        Self {
            add: 0.0,
            subtract: 0.0,
            multiply: 1.0,
            divide: 1.0,
        }
    }
}

impl ModifierTotals {
    pub fn collect<'a>(modifiers: impl IntoIterator<Item = &'a StatModifier>) -> Self {
        let mut totals = Self::default();
        for modifier in modifiers {
            totals.accumulate(modifier.operation, modifier.value);
        }
        totals
    }

    pub fn accumulate(&mut self, operation: ModifierOperation, value: f64) {
        match operation {
            ModifierOperation::Add => self.add += value,
            ModifierOperation::Subtract => self.subtract += value,
            ModifierOperation::Multiply => self.multiply *= value,
            ModifierOperation::Divide => {
                if !approximately_zero(value) {
                    self.divide *= value;
                }
            }
        }
    }

    pub fn apply(&self, base: f64) -> f64 {
        (base + self.add - self.subtract) * self.multiply / self.divide
    }
}
