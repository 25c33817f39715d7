use std::sync::Arc;

use skilltree_content::{ContentFactory, SessionConfig};
use skilltree_core::{
    ConfigError, CostDefinition, EffectDefinition, ErrorSeverity, LevelMap, ModifierOperation,
    ProgressionFault, ProgressionStore, ResourceCatalog, ResourceEntry, ResourceType,
    SkillDefinition, SkillStatus, SkillTreeError, StatDefinition, StoreError, UpgradeOutcome,
};
use skilltree_runtime::{FileProgressStore, InMemoryProgressStore, SkillTreeSession};

const EPSILON: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn gold_catalog() -> ResourceCatalog {
    ResourceCatalog::new([
        ResourceEntry::new("gold", ResourceType::Currency),
        ResourceEntry::new("essence", ResourceType::Currency),
    ])
}

fn root_and_child() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition::new("root", 1).with_cost(CostDefinition::currency("gold", 10)),
        SkillDefinition::new("child", 2)
            .with_prerequisites(["root"])
            .with_cost(CostDefinition::currency("gold", 10)),
    ]
}

/// Store that loads nothing and refuses every save.
struct BrokenStore;

impl ProgressionStore for BrokenStore {
    fn level(&self, _skill_id: &str) -> Result<i32, StoreError> {
        Ok(0)
    }

    fn load_all(&self, skill_ids: &[&str]) -> Result<LevelMap, StoreError> {
        Ok(skill_ids.iter().map(|id| (id.to_string(), 0)).collect())
    }

    fn save_all(&self, _levels: &LevelMap) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn clear(&self, _skill_ids: &[&str]) -> Result<(), StoreError> {
        Ok(())
    }
}

#[test]
fn root_child_purchase_sequence() {
    let store = Arc::new(InMemoryProgressStore::new());
    let mut session = SkillTreeSession::new(
        root_and_child(),
        gold_catalog(),
        Vec::new(),
        [("gold", 20)],
        store.clone(),
    )
    .expect("session should build");

    assert_eq!(session.try_upgrade("child").unwrap(), UpgradeOutcome::PrerequisiteNotMet);
    assert_eq!(session.try_upgrade("root").unwrap(), UpgradeOutcome::Success);
    assert_eq!(session.try_upgrade("root").unwrap(), UpgradeOutcome::Maxed);
    assert_eq!(session.try_upgrade("child").unwrap(), UpgradeOutcome::Success);
    assert_eq!(session.try_upgrade("child").unwrap(), UpgradeOutcome::CannotAfford);

    assert_eq!(session.balance("gold"), 0);
    assert_eq!(session.skill("child").unwrap().level(), 1);
    assert_eq!(store.save_count(), 2);
    assert_eq!(
        store.snapshot().unwrap(),
        LevelMap::from([("child".to_string(), 1), ("root".to_string(), 1)])
    );
}

#[test]
fn compound_multiplier_reaches_121() {
    let mut session = SkillTreeSession::new(
        vec![
            SkillDefinition::new("ember_bolt", 5)
                .with_cost(CostDefinition::currency("gold", 1))
                .with_effect(EffectDefinition::stat(
                    "spell_power",
                    ModifierOperation::Multiply,
                    1.1,
                )),
        ],
        gold_catalog(),
        vec![StatDefinition::new("spell_power", 100.0)],
        [("gold", 2)],
        Arc::new(InMemoryProgressStore::new()),
    )
    .unwrap();

    session.try_upgrade("ember_bolt").unwrap();
    session.try_upgrade("ember_bolt").unwrap();

    assert_close(session.stat("spell_power"), 121.0);

    let changes = session.drain_stat_changes();
    let last = changes.last().expect("stat changes were raised");
    assert_eq!(last.stat_id, "spell_power");
    assert_close(last.value, 121.0);
}

#[test]
fn progress_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("progress.json");
    let definitions = || {
        vec![
            SkillDefinition::new("focus", 3)
                .with_effect(EffectDefinition::stat("mana_regen", ModifierOperation::Add, 2.0)),
        ]
    };
    let stats = || vec![StatDefinition::new("mana_regen", 5.0)];

    {
        let mut session = SkillTreeSession::new(
            definitions(),
            gold_catalog(),
            stats(),
            Vec::<(&str, i64)>::new(),
            Arc::new(FileProgressStore::new(&save).unwrap()),
        )
        .unwrap();
        session.try_upgrade("focus").unwrap();
        session.try_upgrade("focus").unwrap();
        assert_close(session.stat("mana_regen"), 9.0);
    }

    let restored = SkillTreeSession::new(
        definitions(),
        gold_catalog(),
        stats(),
        Vec::<(&str, i64)>::new(),
        Arc::new(FileProgressStore::new(&save).unwrap()),
    )
    .unwrap();

    assert_eq!(restored.skill("focus").unwrap().level(), 2);
    assert_close(restored.stat("mana_regen"), 9.0);
}

#[test]
fn saved_levels_above_max_are_clamped() {
    let store = Arc::new(InMemoryProgressStore::with_levels(LevelMap::from([(
        "root".to_string(),
        7,
    )])));

    let session = SkillTreeSession::new(
        root_and_child(),
        gold_catalog(),
        Vec::new(),
        [("gold", 0)],
        store,
    )
    .unwrap();

    assert_eq!(session.skill("root").unwrap().level(), 1);
    assert_eq!(session.service().status("root").unwrap(), SkillStatus::Maxed);
    assert_eq!(session.service().status("child").unwrap(), SkillStatus::Unlocked);
}

#[test]
fn negative_saved_level_starts_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("progress.json");
    std::fs::write(&save, br#"{ "version": 1, "levels": { "root": -1 } }"#).unwrap();

    let session = SkillTreeSession::new(
        root_and_child(),
        gold_catalog(),
        Vec::new(),
        [("gold", 10)],
        Arc::new(FileProgressStore::new(&save).unwrap()),
    )
    .expect("negative saved level should load");

    assert_eq!(session.skill("root").unwrap().level(), 0);
    assert_eq!(session.service().status("child").unwrap(), SkillStatus::Locked);
    assert!(session.availability("root").unwrap().can_upgrade);
}

#[test]
fn store_failure_still_updates_stats() {
    let mut session = SkillTreeSession::new(
        vec![
            SkillDefinition::new("barrier", 1)
                .with_cost(CostDefinition::currency("essence", 2))
                .with_effect(EffectDefinition::stat("shield_value", ModifierOperation::Add, 25.0)),
        ],
        gold_catalog(),
        Vec::new(),
        [("essence", 2)],
        Arc::new(BrokenStore),
    )
    .unwrap();

    let err = session.try_upgrade("barrier").unwrap_err();

    assert!(matches!(err, SkillTreeError::Store(_)));
    assert_eq!(err.severity(), ErrorSeverity::Internal);
    assert_eq!(err.error_code(), "store.io");
    assert!(err.to_string().contains("disk full"));
    assert_eq!(session.skill("barrier").unwrap().level(), 1);
    assert_eq!(session.balance("essence"), 0);
    assert_close(session.stat("shield_value"), 25.0);
}

#[test]
fn cyclic_content_is_rejected() {
    let result = SkillTreeSession::new(
        vec![
            SkillDefinition::new("a", 1).with_prerequisites(["b"]),
            SkillDefinition::new("b", 1).with_prerequisites(["a"]),
        ],
        gold_catalog(),
        Vec::new(),
        Vec::<(&str, i64)>::new(),
        Arc::new(InMemoryProgressStore::new()),
    );

    match result {
        Err(SkillTreeError::Config(ConfigError::PrerequisiteCycle { path })) => {
            assert_eq!(path.first(), path.last());
            assert!(path.contains(&"a".to_string()));
            assert!(path.contains(&"b".to_string()));
        }
        other => panic!("expected a cycle error, got {other:?}"),
    }
}

#[test]
fn bundled_tree_plays_through() {
    let config = ContentFactory::bundled()
        .load_config()
        .expect("bundled session config");
    let mut session = SkillTreeSession::from_config(&config).expect("bundled session");

    assert_close(session.stat("mana_regen"), 5.0);
    assert_eq!(
        session.service().status("phoenix_core").unwrap(),
        SkillStatus::Locked
    );

    for skill in [
        "core_attunement",
        "ember_bolt",
        "arcane_efficiency",
        "flame_wave",
        "mana_barrier",
    ] {
        assert_eq!(
            session.try_upgrade(skill).unwrap(),
            UpgradeOutcome::Success,
            "upgrading {skill}"
        );
    }

    assert_eq!(session.balance("gold"), 25);
    assert_eq!(session.balance("essence"), 2);
    assert_close(session.stat("mana_regen"), 6.5);
    assert_close(session.stat("spell_power"), 110.0);
    assert_close(session.stat("mana_cost_ratio"), 1.0 / 1.05);
    assert_close(session.stat("aoe_damage"), 52.0);
    assert_close(session.stat("shield_value"), 25.0);

    let availability = session.availability("phoenix_core").unwrap();
    assert_eq!(availability.status, SkillStatus::Unlocked);
    assert!(!availability.can_afford);
    assert_eq!(
        session.try_upgrade("phoenix_core").unwrap(),
        UpgradeOutcome::CannotAfford
    );

    session.grant("gold", 50).unwrap();
    session.grant("essence", 5).unwrap();
    assert_eq!(
        session.try_upgrade("phoenix_core").unwrap(),
        UpgradeOutcome::Success
    );
    assert_close(session.stat("spell_power"), 137.5);
    assert_close(session.stat("spell_crit"), 0.15);

    session.reset().unwrap();
    for stat in ["mana_regen", "spell_power", "aoe_damage", "shield_value"] {
        assert_close(session.stat(stat), session.stats().base_value(stat));
    }
    assert_eq!(session.balance("gold"), 25);
}

#[test]
fn missing_content_file_reports_its_path() {
    let config = SessionConfig::new("/nowhere/skills.ron", "/nowhere/resources.ron");

    let err = SkillTreeSession::from_config(&config).unwrap_err();

    assert!(format!("{err:#}").contains("/nowhere/skills.ron"));
}
