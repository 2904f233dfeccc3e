use proptest::prelude::*;
use serde_json::json;

use super::*;
use crate::registry::Registry;

fn npc(system: Value) -> Entity {
    Entity::new("npc").with_system(system)
}

#[test]
fn system_examples_classify() {
    // (system id, entity, expected category)
    let cases: Vec<(&str, Entity, Category)> = vec![
        // dnd5e: challenge rating and creature type
        ("dnd5e", npc(json!({"details": {"cr": 2}})), Category::Monster),
        ("dnd5e", npc(json!({"details": {"cr": 0.25}})), Category::Npc),
        ("dnd5e", npc(json!({"details": {"cr": 1}})), Category::Monster),
        ("dnd5e", npc(json!({"details": {"cr": "3"}})), Category::Monster),
        ("dnd5e", npc(json!({"details": {"cr": "1/4"}})), Category::Npc),
        ("dnd5e", npc(json!({})), Category::Npc),
        ("dnd5e", npc(json!({"details": {"cr": 0, "type": {"value": "Beast"}}})), Category::Monster),
        ("dnd5e", npc(json!({"details": {"cr": 0, "type": {"value": "humanoid"}}})), Category::Npc),
        ("dnd5e", Entity::new("character"), Category::Pc),
        ("dnd5e", Entity::new("Character"), Category::Pc),
        // pf2e: rarity and level
        ("pf2e", npc(json!({"traits": {"rarity": "unique"}, "details": {"level": {"value": 8}}})), Category::Npc),
        ("pf2e", npc(json!({"traits": {"rarity": "common"}, "details": {"level": {"value": -1}}})), Category::Npc),
        ("pf2e", npc(json!({"traits": {"rarity": "rare"}, "details": {"level": {"value": 3}}})), Category::Monster),
        ("pf2e", npc(json!({})), Category::Monster),
        // swade / swpf: wild cards
        ("swade", npc(json!({"wildcard": true})), Category::Npc),
        ("swade", npc(json!({"wildcard": false})), Category::Monster),
        ("swpf", npc(json!({})), Category::Monster),
        // cyberpunk-red-core: roles
        ("cyberpunk-red-core", npc(json!({"role": {"value": "fixer"}})), Category::Npc),
        ("cyberpunk-red-core", npc(json!({"role": "solo"})), Category::Npc),
        ("cyberpunk-red-core", npc(json!({"role": ""})), Category::Monster),
        ("cyberpunk-red-core", npc(json!({})), Category::Monster),
        // starwarsffg: minions
        ("starwarsffg", npc(json!({"characteristics": {"npctype": "minion"}})), Category::Monster),
        ("starwarsffg", Entity::new("rival"), Category::Npc),
        ("starwarsffg", Entity::new("creature"), Category::Npc),
        // lancer: tiers
        ("lancer", npc(json!({"tier": 2})), Category::Monster),
        ("lancer", npc(json!({"tier": 1})), Category::Npc),
        ("lancer", Entity::new("pilot"), Category::Pc),
        // sfrpg / a5e: challenge rating only
        ("sfrpg", npc(json!({"details": {"cr": 0.5, "type": {"value": "beast"}}})), Category::Npc),
        ("a5e", npc(json!({"details": {"cr": 5}})), Category::Monster),
        // direct mappings
        ("CoC7", Entity::new("creature"), Category::Monster),
        ("CoC7", Entity::new("npc"), Category::Npc),
        ("vaesen", Entity::new("player"), Category::Pc),
        ("vaesen", Entity::new("vaesen"), Category::Monster),
        ("foundry-ironsworn", Entity::new("foe"), Category::Monster),
        ("foundry-ironsworn", Entity::new("site"), Category::Npc),
        ("worldbuilding", Entity::new("actor"), Category::Pc),
        // fallback for unknown types
        ("CoC7", Entity::new("familiar-spirit"), Category::Npc),
        // unknown system uses the generic record
        ("homebrew", Entity::new("investigator"), Category::Pc),
        ("homebrew", Entity::new("Abomination"), Category::Monster),
        ("homebrew", Entity::new("ally"), Category::Npc),
        ("homebrew", Entity::new("sidekick"), Category::Npc),
    ];

    let registry = Registry::builtin();
    for (system, entity, expected) in cases {
        let config = registry.resolve_classification(system);
        assert_eq!(classify(&entity, config), expected, "system {system}, entity {entity:?}");
    }
}

#[test]
fn player_owner_beats_every_list() {
    let classifier = EntityClassifier::for_system("dnd5e");
    let owned_monster = npc(json!({"details": {"cr": 20}})).owned(true);
    assert_eq!(classifier.classify(&owned_monster), Category::Pc);
    assert_eq!(classifier.explain(Some(&owned_monster)).reason, Reason::PlayerOwner);

    let owned_unknown = Entity::new("familiar").owned(true);
    assert_eq!(classifier.classify(&owned_unknown), Category::Pc);
}

#[test]
fn exclusion_ignores_ownership() {
    let classifier = EntityClassifier::for_system("dnd5e");
    assert!(!classifier.is_included(&Entity::new("vehicle").owned(true)));
    assert!(!classifier.is_included(&Entity::new("Group")));
    assert!(classifier.is_included(&Entity::new("npc")));

    let blades = EntityClassifier::for_system("blades-in-the-dark");
    assert!(!blades.is_included(&Entity::new("🕛 clock")));
}

#[test]
fn absent_entity_is_npc_and_excluded() {
    let config = Registry::builtin().resolve_classification("dnd5e");
    assert_eq!(classify_opt(None, config), Category::Npc);
    assert!(!is_included(None, config));
    assert_eq!(
        EntityClassifier::new(config).explain(None),
        Classification { category: Category::Npc, reason: Reason::Absent }
    );
}

#[test]
fn ambiguous_type_without_tie_break_is_monster() {
    let config = ClassificationConfig {
        pc_types: vec!["character".into()],
        npc_types: vec!["creature".into(), "follower".into()],
        monster_types: vec!["creature".into()],
        excluded_types: vec![],
        tie_break: None,
    };
    let explained = explain(&Entity::new("creature"), &config);
    assert_eq!(explained, Classification { category: Category::Monster, reason: Reason::MonsterType });
    assert_eq!(explain(&Entity::new("follower"), &config).reason, Reason::NpcType);

    // morkborg ships exactly this overlap
    let morkborg = Registry::builtin().resolve_classification("morkborg");
    assert_eq!(classify(&Entity::new("creature"), morkborg), Category::Monster);
}

#[test]
fn tie_break_runs_for_npc_only_types() {
    let config = ClassificationConfig {
        npc_types: vec!["npc".into()],
        tie_break: Some(TieBreak::Tier),
        ..ClassificationConfig::default()
    };
    let explained = explain(&npc(json!({"tier": 3})), &config);
    assert_eq!(explained, Classification { category: Category::Monster, reason: Reason::TieBreak(TieBreak::Tier) });
    assert_eq!(explain(&Entity::new("drone"), &config).reason, Reason::Fallback);
}

#[test]
fn excluded_type_still_classifies_when_asked() {
    // Exclusion is the caller's check; classify itself does not consult it.
    let config = Registry::builtin().generic_classification();
    assert!(!is_included(Some(&Entity::new("extra")), config));
    assert_eq!(classify(&Entity::new("extra"), config), Category::Npc);
}

#[test]
fn entity_deserializes_from_host_json() {
    let entity: Entity = serde_json::from_value(json!({
        "type": "npc",
        "hasPlayerOwner": false,
        "name": "Goblin Boss",
        "system": {"details": {"cr": 1}}
    }))
    .unwrap();
    assert_eq!(entity.kind, "npc");
    assert_eq!(entity.number("details.cr"), Some(1.0));
    assert_eq!(entity.attr("details.missing"), None);
    assert_eq!(EntityClassifier::for_system("dnd5e").classify(&entity), Category::Monster);

    let bare: Entity = serde_json::from_value(json!({})).unwrap();
    assert_eq!(bare, Entity::default());
}

#[test]
fn tie_break_names_match_configuration_keys() {
    for strategy in [
        TieBreak::ChallengeRating,
        TieBreak::CreatureTypeOrChallengeRating,
        TieBreak::RarityAndLevel,
        TieBreak::WildCard,
        TieBreak::Role,
        TieBreak::NpcType,
        TieBreak::Tier,
    ] {
        let parsed: TieBreak = serde_yaml::from_str(strategy.name()).unwrap();
        assert_eq!(parsed, strategy);
    }
}

fn arb_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("character".to_string()),
        Just("npc".to_string()),
        Just("NPC".to_string()),
        Just("creature".to_string()),
        Just("vehicle".to_string()),
        "[a-z]{1,12}",
    ]
}

fn arb_system() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("dnd5e"),
        Just("pf2e"),
        Just("swade"),
        Just("cyberpunk-red-core"),
        Just("starwarsffg"),
        Just("lancer"),
        Just("morkborg"),
        Just("unknown"),
    ]
}

fn arb_entity() -> impl Strategy<Value = Entity> {
    (arb_kind(), any::<bool>(), -5.0f64..30.0, any::<bool>(), -3i64..10).prop_map(
        |(kind, owned, cr, wildcard, level)| {
            Entity::new(kind).owned(owned).with_system(json!({
                "details": {"cr": cr, "level": {"value": level}},
                "wildcard": wildcard,
                "tier": level,
            }))
        },
    )
}

proptest! {
    #[test]
    fn classification_is_deterministic(system in arb_system(), entity in arb_entity()) {
        let config = Registry::builtin().resolve_classification(system);
        prop_assert_eq!(classify(&entity, config), classify(&entity, config));
    }

    #[test]
    fn ownership_always_wins(system in arb_system(), entity in arb_entity()) {
        let config = Registry::builtin().resolve_classification(system);
        let owned = entity.owned(true);
        prop_assert_eq!(classify(&owned, config), Category::Pc);
    }

    #[test]
    fn excluded_types_are_never_included(system in arb_system(), entity in arb_entity()) {
        let config = Registry::builtin().resolve_classification(system);
        if config.is_excluded(&entity.kind) {
            prop_assert!(!is_included(Some(&entity), config));
        } else {
            prop_assert!(is_included(Some(&entity), config));
        }
    }
}
