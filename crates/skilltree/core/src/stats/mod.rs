//! Stat system fed by skill effects.
//!
//! # Calculation
//!
//! ```text
//! [ base value ]
//!      ↓
//! [ + Σadd − Σsubtract ]
//!      ↓
//! [ × Πmultiply ÷ Πdivide ]
//! ```
//!
//! Modifiers carry the id of the source that contributed them so a source can
//! be revoked in one pass without disturbing anything else. Aggregation state
//! is never persisted; it is rebuilt from skill levels by
//! [`crate::EffectBridge`].

pub mod aggregator;
pub mod modifier;

pub use aggregator::{StatAggregator, StatChange, StatDefinition};
pub use modifier::{ModifierTotals, StatModifier, ZERO_TOLERANCE};
