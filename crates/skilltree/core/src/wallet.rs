//! Multi-currency ledger with all-or-nothing payments.
//!
//! The wallet tracks a balance for every [`ResourceType::Currency`] key the
//! catalog declares. Affordability and payment are evaluated against the
//! *summed* requirement per key, so a cost list naming the same currency twice
//! is charged once for the total, and a payment either debits every line or
//! none of them.

use std::collections::BTreeMap;

use crate::catalog::CostCatalog;
use crate::definition::{CostDefinition, ResourceType};
use crate::error::{ConfigError, ErrorSeverity, ProgressionFault};
use crate::key::normalize_key;

/// Payment seam used by [`crate::SkillGraphService::try_upgrade`].
///
/// `try_pay` must be safe to call without a preceding `can_pay` and must
/// never leave a partial debit behind.
pub trait SkillContext {
    fn can_pay(&self, costs: &[CostDefinition]) -> bool;

    fn try_pay(&mut self, costs: &[CostDefinition]) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("currency '{0}' is not defined in catalog")]
    UnknownCurrency(String),
}

impl ProgressionFault for WalletError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "wallet.unknown_currency",
        }
    }
}

/// Amount owed per normalized currency key.
type Requirements = BTreeMap<String, u64>;

/// Balance store for currency costs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    balances: BTreeMap<String, u64>,
}

impl Wallet {
    /// Seed a zero balance for every catalog currency, then apply the given
    /// initial balances (negative amounts floor at 0).
    pub fn new<C, I, K>(catalog: &C, initial_balances: I) -> Result<Self, ConfigError>
    where
        C: CostCatalog + ?Sized,
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut wallet = Self::empty(catalog);

        for (raw_key, amount) in initial_balances {
            let raw_key = raw_key.as_ref();
            let balance = normalize_key(raw_key).and_then(|key| wallet.balances.get_mut(&key));
            match balance {
                Some(balance) => *balance = amount.max(0).unsigned_abs(),
                None => return Err(ConfigError::UnknownCurrency(raw_key.to_string())),
            }
        }

        Ok(wallet)
    }

    /// Wallet with every catalog currency at zero.
    pub fn empty<C>(catalog: &C) -> Self
    where
        C: CostCatalog + ?Sized,
    {
        let balances = catalog
            .keys(ResourceType::Currency)
            .into_iter()
            .filter_map(|key| normalize_key(&key))
            .map(|key| (key, 0))
            .collect();
        Self { balances }
    }

    /// Current balance; blank or untracked keys read as 0.
    pub fn balance(&self, key: &str) -> u64 {
        match normalize_key(key) {
            Some(key) => self.balances.get(&key).copied().unwrap_or(0),
            None => 0,
        }
    }

    /// All tracked balances in key order.
    pub fn balances(&self) -> impl Iterator<Item = (&str, u64)> {
        self.balances
            .iter()
            .map(|(key, amount)| (key.as_str(), *amount))
    }

    pub fn is_tracked(&self, key: &str) -> bool {
        normalize_key(key).is_some_and(|key| self.balances.contains_key(&key))
    }

    /// Credit a tracked currency. Non-positive amounts and blank keys are
    /// ignored; an untracked key is a programming error.
    pub fn add(&mut self, key: &str, amount: i64) -> Result<(), WalletError> {
        if amount <= 0 {
            tracing::trace!("ignoring non-positive credit of {} to '{}'", amount, key);
            return Ok(());
        }
        let Some(normalized) = normalize_key(key) else {
            tracing::trace!("ignoring credit to blank currency key");
            return Ok(());
        };

        let balance = self
            .balances
            .get_mut(&normalized)
            .ok_or_else(|| WalletError::UnknownCurrency(key.trim().to_string()))?;
        *balance = balance.saturating_add(amount.unsigned_abs());
        Ok(())
    }

    /// Sum the cost list per key, failing closed on anything unchargeable.
    fn requirements(&self, costs: &[CostDefinition]) -> Option<Requirements> {
        let mut required = Requirements::new();

        for cost in costs {
            if cost.resource_type != ResourceType::Currency || cost.amount <= 0 {
                return None;
            }
            let key = normalize_key(&cost.key)?;
            if !self.balances.contains_key(&key) {
                return None;
            }

            let owed = required.entry(key).or_insert(0);
            *owed = owed.checked_add(cost.amount.unsigned_abs())?;
        }

        Some(required)
    }

    fn has_enough(&self, required: &Requirements) -> bool {
        required.iter().all(|(key, owed)| {
            let balance = match self.balances.get(key) {
                Some(balance) => *balance,
                None => 0,
            };
            balance >= *owed
        })
    }
}

impl SkillContext for Wallet {
    fn can_pay(&self, costs: &[CostDefinition]) -> bool {
        self.requirements(costs)
            .is_some_and(|required| self.has_enough(&required))
    }

    fn try_pay(&mut self, costs: &[CostDefinition]) -> bool {
        let Some(required) = self.requirements(costs) else {
            return false;
        };
        if !self.has_enough(&required) {
            return false;
        }

        for (key, owed) in required {
            if let Some(balance) = self.balances.get_mut(&key) {
                *balance -= owed;
            }
        }
        true
    }
}
