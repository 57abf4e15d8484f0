use std::path::PathBuf;

use loadout_core::{
    CharacterId, CombatStance, EquipmentDefinition, EquipmentSlot, ItemCategory, ItemHandle,
    ItemOracle, LoadoutError, PermanentUpgrades, RestrictionFailure, WeaponHandedness,
};
use loadout_runtime::{
    Armory, FileSaveRepository, InMemorySaveRepository, LoadoutEvent, RuntimeConfig, RuntimeError,
    SaveRepository, Topic,
};

// Handles from the shipped sample catalog.
const LONGSWORD: ItemHandle = ItemHandle(1);
const DAGGER: ItemHandle = ItemHandle(2);
const HOLY_AVENGER: ItemHandle = ItemHandle(3);
const GREATSWORD: ItemHandle = ItemHandle(10);
const PARRYING_DAGGER: ItemHandle = ItemHandle(20);
const KITE_SHIELD: ItemHandle = ItemHandle(21);
const IRON_HELM: ItemHandle = ItemHandle(30);
const LEATHER_BOOTS: ItemHandle = ItemHandle(32);
const PROTECTION_RING: ItemHandle = ItemHandle(40);
const BAND_OF_BINDING: ItemHandle = ItemHandle(41);

const PLAYER: CharacterId = CharacterId::PLAYER;
const LYRA: CharacterId = CharacterId(1);
const OSWIN: CharacterId = CharacterId(2);

fn sample_config(session_id: &str) -> RuntimeConfig {
    RuntimeConfig {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data"),
        save_dir: std::env::temp_dir(),
        session_id: session_id.to_string(),
        event_capacity: 64,
    }
}

fn sample_armory(session_id: &str) -> Armory {
    Armory::from_config(&sample_config(session_id)).expect("sample content should load")
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<LoadoutEvent>) -> Vec<LoadoutEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn roster_is_built_from_sample_content() {
    let armory = sample_armory("roster");

    assert_eq!(armory.player().name, "Aldric");
    assert_eq!(armory.companions().count(), 2);
    assert_eq!(armory.roster().count(), 3);
    assert!(armory.companion(PLAYER).is_none());
    assert_eq!(armory.companion(OSWIN).unwrap().inventory().capacity(), 8);

    // 1 + STR 14 mod + legendary armory
    let player = armory.player();
    assert_eq!(player.stats().derived.weapon_power, 6);
    assert_eq!(player.stats().derived.armor_class, 13);
    assert_eq!(player.stats_revision(), 1);
    assert!(player.loadout().is_empty());
}

#[tokio::test]
async fn equip_publishes_outcome_then_stats() {
    let mut armory = sample_armory("equip_events");
    let mut loadout_rx = armory.subscribe(Topic::Loadout);

    // ================================================================
    // Sword and board
    // ================================================================
    armory
        .equip(PLAYER, LONGSWORD, Some(EquipmentSlot::MainHand))
        .expect("longsword fits main hand");
    armory
        .equip(PLAYER, KITE_SHIELD, None)
        .expect("shield has a single slot");

    let player = armory.player();
    assert_eq!(player.stats().stance, CombatStance::SwordAndBoard);
    assert_eq!(player.stats().derived.weapon_power, 12);
    assert_eq!(player.stats().derived.armor_class, 16);
    assert_eq!(player.stats().derived.block_chance, 20);

    let events = drain(&mut loadout_rx);
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        LoadoutEvent::Equipped {
            character: PLAYER,
            item: LONGSWORD,
            slot: EquipmentSlot::MainHand,
            displaced: vec![],
        }
    );
    assert!(matches!(
        events[3],
        LoadoutEvent::StatsRecomputed { character: PLAYER, revision: 3, .. }
    ));

    // ================================================================
    // Greatsword displaces both hands
    // ================================================================
    let outcome = armory
        .equip(PLAYER, GREATSWORD, None)
        .expect("greatsword displaces sword and shield");

    assert_eq!(outcome.displaced, vec![LONGSWORD, KITE_SHIELD]);
    let player = armory.player();
    assert_eq!(player.loadout().get(EquipmentSlot::OffHand), None);
    assert!(player.inventory().contains(LONGSWORD));
    assert!(player.inventory().contains(KITE_SHIELD));
    assert_eq!(player.stats().stance, CombatStance::TwoHanded);
    // 1 + STR mod + 12 x 1.5 + legendary armory
    assert_eq!(player.stats().derived.weapon_power, 24);
    // level 4 / 2 + CON mod; nothing worn adds defense to penalize
    assert_eq!(player.stats().derived.defense, 3);
}

#[tokio::test]
async fn rejected_operations_change_nothing_and_report_code() {
    let mut armory = sample_armory("rejections");
    let mut loadout_rx = armory.subscribe(Topic::Loadout);
    let before = armory.player().clone();

    let err = armory.equip(PLAYER, PROTECTION_RING, None).unwrap_err();
    match &err {
        RuntimeError::Loadout(LoadoutError::AmbiguousSlotSelection { candidates }) => {
            assert_eq!(candidates, &EquipmentSlot::FINGERS.to_vec());
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }

    let err = armory.unequip(PLAYER, EquipmentSlot::Head).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Loadout(LoadoutError::SlotAlreadyEmpty(EquipmentSlot::Head))
    ));

    let err = armory
        .equip(PLAYER, IRON_HELM, Some(EquipmentSlot::Feet))
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Loadout(LoadoutError::InvalidSlotForItem { .. })
    ));

    assert_eq!(armory.player(), &before);

    let codes: Vec<String> = drain(&mut loadout_rx)
        .into_iter()
        .filter_map(|event| match event {
            LoadoutEvent::Rejected { code, .. } => Some(code),
            _ => None,
        })
        .collect();
    assert_eq!(
        codes,
        vec![
            "LOADOUT_AMBIGUOUS_SLOT_SELECTION",
            "LOADOUT_SLOT_ALREADY_EMPTY",
            "LOADOUT_INVALID_SLOT_FOR_ITEM",
        ]
    );
}

#[test]
fn eligibility_probe_matches_equip_gate() {
    let mut armory = sample_armory("eligibility");

    // Lyra is level 3; the Holy Avenger needs level 5.
    assert_eq!(
        armory.eligibility(LYRA, HOLY_AVENGER).unwrap(),
        Some(RestrictionFailure::LevelTooLow {
            required: 5,
            actual: 3
        })
    );
    // Oswin is level 5 and good.
    assert_eq!(armory.eligibility(OSWIN, HOLY_AVENGER).unwrap(), None);
    assert!(matches!(
        armory.eligibility(CharacterId(9), HOLY_AVENGER),
        Err(RuntimeError::UnknownCharacter(_))
    ));

    armory.grant_item(LYRA, HOLY_AVENGER).unwrap();
    let err = armory
        .equip(LYRA, HOLY_AVENGER, Some(EquipmentSlot::MainHand))
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Loadout(LoadoutError::RestrictionFailed(
            RestrictionFailure::LevelTooLow { .. }
        ))
    ));
    assert!(armory.companion(LYRA).unwrap().inventory().contains(HOLY_AVENGER));
}

#[test]
fn companion_round_trip() {
    let mut armory = sample_armory("companions");

    // ================================================================
    // Lyra dual-wields her own daggers
    // ================================================================
    armory
        .equip(LYRA, DAGGER, Some(EquipmentSlot::MainHand))
        .unwrap();
    armory.equip(LYRA, PARRYING_DAGGER, None).unwrap();
    assert_eq!(
        armory.companion(LYRA).unwrap().stats().stance,
        CombatStance::DualWielding
    );

    // ================================================================
    // Give: the longsword replaces her main-hand dagger
    // ================================================================
    let outcome = armory
        .give_to_companion(LYRA, LONGSWORD, Some(EquipmentSlot::MainHand))
        .unwrap();
    assert_eq!(outcome.returned, vec![DAGGER]);
    assert!(armory.player().inventory().contains(DAGGER));
    assert!(!armory.player().owns(LONGSWORD));

    // ================================================================
    // Take: the player pulls the parrying dagger off her off hand
    // ================================================================
    let outcome = armory
        .take_from_companion(LYRA, PARRYING_DAGGER, None)
        .unwrap();
    assert_eq!(outcome.taken_from, Some(EquipmentSlot::OffHand));
    assert_eq!(
        armory.player().loadout().get(EquipmentSlot::OffHand),
        Some(PARRYING_DAGGER)
    );
    assert_eq!(
        armory.companion(LYRA).unwrap().stats().stance,
        CombatStance::Standard
    );

    // ================================================================
    // Reclaim everything she still wears
    // ================================================================
    armory
        .give_to_companion(LYRA, IRON_HELM, None)
        .unwrap();
    let outcome = armory.reclaim_all(LYRA).unwrap();
    let mut reclaimed: Vec<_> = outcome.reclaimed_items().collect();
    reclaimed.sort();
    assert_eq!(reclaimed, vec![LONGSWORD, IRON_HELM]);
    assert!(outcome.skipped_cursed.is_empty());
    assert!(armory.companion(LYRA).unwrap().loadout().is_empty());
    assert!(armory.player().inventory().contains(LONGSWORD));

    assert!(matches!(
        armory.reclaim_all(PLAYER),
        Err(RuntimeError::NotACompanion(_))
    ));
}

#[test]
fn curse_blocks_until_lifted() {
    let mut armory = sample_armory("curses");
    armory.grant_item(OSWIN, BAND_OF_BINDING).unwrap();
    armory
        .equip(OSWIN, BAND_OF_BINDING, Some(EquipmentSlot::RightFinger))
        .unwrap();

    let err = armory
        .unequip(OSWIN, EquipmentSlot::RightFinger)
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Loadout(LoadoutError::ItemIsCursed { .. })
    ));

    let outcome = armory.reclaim_all(OSWIN).unwrap();
    assert_eq!(
        outcome.skipped_cursed,
        vec![(EquipmentSlot::RightFinger, BAND_OF_BINDING)]
    );

    let lifted = armory
        .lift_curse(OSWIN, EquipmentSlot::RightFinger)
        .unwrap();
    assert_eq!(lifted, BAND_OF_BINDING);
    armory
        .unequip(OSWIN, EquipmentSlot::RightFinger)
        .expect("lifted curse allows unequip");
    assert!(
        armory
            .companion(OSWIN)
            .unwrap()
            .inventory()
            .contains(BAND_OF_BINDING)
    );
}

#[test]
fn base_stat_updates_recompute() {
    let mut armory = sample_armory("upgrades");
    let before = armory.player().stats().derived.max_hp;

    armory
        .update_base(PLAYER, |player| {
            player.upgrades |= PermanentUpgrades::VITALITY_FOUNTAIN;
        })
        .unwrap();

    assert_eq!(armory.player().stats().derived.max_hp, before + 25);
}

#[tokio::test]
async fn save_and_load_through_file_repository() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");
    let mut armory = sample_armory("campaign");
    let mut session_rx = armory.subscribe(Topic::Session);
    let mut catalog_rx = armory.subscribe(Topic::Catalog);

    // ================================================================
    // Enchant a blade, equip it, and dress a companion
    // ================================================================
    let flame_tongue = armory
        .register_item(
            EquipmentDefinition::builder(
                "Flame Tongue",
                ItemCategory::Weapon {
                    handedness: WeaponHandedness::OneHanded,
                },
            )
            .attack_power(10)
            .value(5000),
        )
        .expect("fresh name registers");
    assert!(flame_tongue.is_dynamic());
    assert!(matches!(
        catalog_rx.try_recv(),
        Ok(LoadoutEvent::ItemRegistered { .. })
    ));

    armory.grant_item(PLAYER, flame_tongue).unwrap();
    armory
        .equip(PLAYER, flame_tongue, Some(EquipmentSlot::MainHand))
        .unwrap();
    armory.equip(PLAYER, LEATHER_BOOTS, None).unwrap();
    armory
        .give_to_companion(LYRA, IRON_HELM, None)
        .unwrap();

    armory.save(&repo).expect("save succeeds");
    assert!(repo.exists("campaign"));
    assert!(matches!(
        session_rx.try_recv(),
        Ok(LoadoutEvent::SessionSaved { .. })
    ));

    // ================================================================
    // A fresh session restores equipment and the enchanted blade
    // ================================================================
    let mut restored = sample_armory("campaign");
    assert!(restored.catalog().definition(flame_tongue).is_none());
    restored.load(&repo).expect("load succeeds");

    assert_eq!(
        restored.catalog().definition(flame_tongue).unwrap().name,
        "Flame Tongue"
    );
    assert_eq!(restored.player().loadout(), armory.player().loadout());
    assert_eq!(restored.player().inventory(), armory.player().inventory());
    assert_eq!(restored.player().stats(), armory.player().stats());
    assert_eq!(
        restored.companion(LYRA).unwrap().loadout(),
        armory.companion(LYRA).unwrap().loadout()
    );

    // Later registrations never reuse a restored handle.
    let next = restored
        .register_item(EquipmentDefinition::builder(
            "Frost Brand",
            ItemCategory::Weapon {
                handedness: WeaponHandedness::OneHanded,
            },
        ))
        .unwrap();
    assert!(next.0 > flame_tongue.0);
}

#[test]
fn load_is_all_or_nothing() {
    let repo = InMemorySaveRepository::new();
    let mut armory = sample_armory("broken");

    assert!(matches!(
        armory.load(&repo),
        Err(RuntimeError::SaveNotFound(_))
    ));

    let mut save = armory.snapshot().unwrap();
    save.equipment
        .get_mut(&LYRA)
        .unwrap()
        .equipped
        .insert(EquipmentSlot::Head, IRON_HELM);
    save.equipment
        .get_mut(&OSWIN)
        .unwrap()
        .equipped
        .insert(EquipmentSlot::Feet, IRON_HELM);
    repo.save(&save).unwrap();

    let before_player = armory.player().clone();
    let before_lyra = armory.companion(LYRA).unwrap().clone();

    let err = armory.load(&repo).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Restore {
            character: OSWIN,
            ..
        }
    ));
    assert_eq!(armory.player(), &before_player);
    assert_eq!(armory.companion(LYRA).unwrap(), &before_lyra);

    save.version = 99;
    repo.save(&save).unwrap();
    assert!(matches!(
        armory.load(&repo),
        Err(RuntimeError::UnsupportedSaveVersion { found: 99, .. })
    ));
}
