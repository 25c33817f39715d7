//! Session bootstrap: one playable skill tree with its wallet and stats.

use std::sync::Arc;

use anyhow::Context;
use skilltree_content::{ResourceLoader, SessionConfig, SkillLoader, StatLoader};
use skilltree_core::{
    EffectBridge, ProgressionStore, ResourceCatalog, Result, SkillDefinition, SkillGraphService,
    SkillSnapshot, StatAggregator, StatChange, StatDefinition, UpgradeAvailability,
    UpgradeOutcome, Wallet, WalletError,
};

use crate::dirs::default_save_path;
use crate::repository::{FileProgressStore, InMemoryProgressStore};

/// Everything a player interacts with for one skill tree.
///
/// The session owns the graph service, the wallet that pays for upgrades and
/// the stat aggregator fed by skill effects. Level changes are forwarded to
/// the aggregator before any mutating call returns, so [`Self::stat`] always
/// reflects the current levels.
pub struct SkillTreeSession {
    catalog: ResourceCatalog,
    service: SkillGraphService,
    wallet: Wallet,
    stats: StatAggregator,
}

impl SkillTreeSession {
    /// Build a session from already loaded content.
    ///
    /// Saved levels are read from `store` and immediately reflected in the
    /// stats.
    pub fn new<I, K>(
        definitions: Vec<SkillDefinition>,
        catalog: ResourceCatalog,
        stats: Vec<StatDefinition>,
        initial_balances: I,
        store: Arc<dyn ProgressionStore>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let service = SkillGraphService::new(definitions, store)?;
        let wallet = Wallet::new(&catalog, initial_balances)?;
        let mut stats = StatAggregator::from_definitions(stats);
        EffectBridge::sync_all(&service, &mut stats);

        tracing::info!(
            "skill tree session ready: {} skills, {} currencies",
            service.len(),
            wallet.balances().count()
        );

        Ok(Self {
            catalog,
            service,
            wallet,
            stats,
        })
    }

    /// Load every content file named by `config` and open its store.
    pub fn from_config(config: &SessionConfig) -> anyhow::Result<Self> {
        let definitions = SkillLoader::load(&config.skills_path)?;
        let catalog = ResourceLoader::load(&config.resources_path)?;
        let stats = match &config.stats_path {
            Some(path) => StatLoader::load(path)?,
            None => Vec::new(),
        };

        let save_path = match (&config.save_path, config.persist) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(default_save_path()),
            (None, false) => None,
        };
        let store: Arc<dyn ProgressionStore> = match save_path {
            Some(path) => Arc::new(
                FileProgressStore::new(&path)
                    .with_context(|| format!("Failed to open save file {}", path.display()))?,
            ),
            None => Arc::new(InMemoryProgressStore::new()),
        };

        let balances = config
            .initial_balances
            .iter()
            .map(|(key, amount)| (key.as_str(), *amount));

        Self::new(definitions, catalog, stats, balances, store).with_context(|| {
            format!(
                "Failed to build skill tree from {}",
                config.skills_path.display()
            )
        })
    }

    /// Attempt one upgrade, paid from the session wallet.
    ///
    /// Stats are updated before returning, including when the store failed
    /// after the level was raised.
    pub fn try_upgrade(&mut self, skill_id: &str) -> Result<UpgradeOutcome> {
        let outcome = self.service.try_upgrade(skill_id, &mut self.wallet);
        self.pump_events();
        let outcome = outcome?;

        tracing::debug!("upgrade '{}' => {}", skill_id, outcome);
        Ok(outcome)
    }

    /// Drop every skill to level 0 and revoke all skill modifiers.
    /// Spent currency is not refunded.
    pub fn reset(&mut self) -> Result<()> {
        let reset = self.service.reset_progression();
        self.pump_events();
        reset
    }

    /// Credit currency to the wallet.
    pub fn grant(&mut self, key: &str, amount: i64) -> core::result::Result<(), WalletError> {
        self.wallet.add(key, amount)
    }

    pub fn stat(&self, stat_id: &str) -> f64 {
        self.stats.final_value(stat_id)
    }

    pub fn availability(&self, skill_id: &str) -> Result<UpgradeAvailability> {
        self.service.availability(skill_id, &self.wallet)
    }

    pub fn skill(&self, skill_id: &str) -> Result<SkillSnapshot> {
        self.service.skill(skill_id)
    }

    pub fn balance(&self, key: &str) -> u64 {
        self.wallet.balance(key)
    }

    /// Forward pending level events to the stat aggregator. Returns the number
    /// of events handled.
    pub fn pump_events(&mut self) -> usize {
        EffectBridge::pump(&mut self.service, &mut self.stats)
    }

    /// Take every pending stat change notification, oldest first.
    pub fn drain_stat_changes(&mut self) -> Vec<StatChange> {
        self.stats.drain_changes()
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn service(&self) -> &SkillGraphService {
        &self.service
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn stats(&self) -> &StatAggregator {
        &self.stats
    }
}

impl core::fmt::Debug for SkillTreeSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkillTreeSession")
            .field("service", &self.service)
            .field("wallet", &self.wallet)
            .finish_non_exhaustive()
    }
}
