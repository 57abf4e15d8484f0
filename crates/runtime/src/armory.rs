//! Roster session: the player, their companions, and the shared catalog.
//!
//! [`Armory`] is the entry point shop, home and dialogue collaborators call.
//! Each operation runs one engine transaction, logs it, and publishes the
//! resulting [`LoadoutEvent`]s. On error nothing changes and a
//! [`LoadoutEvent::Rejected`] is published instead.

use std::collections::BTreeMap;

use loadout_content::{ContentBundle, ContentFactory};
use loadout_core::{
    Character, CharacterId, CharacterKind, CombatTuning, EquipOutcome, EquipmentBuilder,
    EquipmentSlot, GameError, ItemCatalog, ItemHandle, ItemOracle, LoadoutEngine, LoadoutError,
    ReclaimOutcome, RestrictionFailure, SlotResolution, TransferOutcome, UnequipOutcome,
    check_restrictions,
};
use tokio::sync::broadcast;

use crate::api::{Result, RuntimeError};
use crate::catalog::SharedCatalog;
use crate::config::RuntimeConfig;
use crate::events::{EventBus, LoadoutEvent, Topic};
use crate::repository::{SaveFile, SaveRepository};

/// Session facade over the loadout engine.
///
/// Operations on one roster are serialized by `&mut self`; only the catalog is
/// shared with other readers.
pub struct Armory {
    session_id: String,
    catalog: SharedCatalog,
    tuning: CombatTuning,
    player: Character,
    companions: BTreeMap<CharacterId, Character>,
    events: EventBus,
}

impl Armory {
    pub fn builder() -> ArmoryBuilder {
        ArmoryBuilder::default()
    }

    /// Builds a session from loaded content.
    ///
    /// Every template is instantiated; the player template becomes the player.
    pub fn from_content(bundle: ContentBundle, config: &RuntimeConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .session_id(config.session_id.clone())
            .catalog(bundle.catalog)
            .tuning(bundle.config.tuning)
            .event_capacity(config.event_capacity);

        for template in &bundle.characters {
            let character = template.instantiate()?;
            builder = match character.kind {
                CharacterKind::Player => builder.player(character),
                CharacterKind::Companion => builder.companion(character),
            };
        }

        builder.build()
    }

    /// Loads content from `config.data_dir` and builds a session.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let bundle = ContentFactory::new(&config.data_dir)
            .load_bundle()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        Self::from_content(bundle, config)
    }

    // ===== queries =====

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn companion(&self, id: CharacterId) -> Option<&Character> {
        self.companions.get(&id)
    }

    pub fn companions(&self) -> impl Iterator<Item = &Character> + '_ {
        self.companions.values()
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        if id == self.player.id {
            Some(&self.player)
        } else {
            self.companions.get(&id)
        }
    }

    /// Player first, then companions by id.
    pub fn roster(&self) -> impl Iterator<Item = &Character> + '_ {
        std::iter::once(&self.player).chain(self.companions.values())
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<LoadoutEvent> {
        self.events.subscribe(topic)
    }

    /// Candidate slots for equipping `item` on `id`, without mutating anything.
    pub fn resolve(&self, id: CharacterId, item: ItemHandle) -> Result<SlotResolution> {
        let character = self
            .character(id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        let catalog = self.catalog.read()?;
        let engine = LoadoutEngine::new(&*catalog, &self.tuning);
        Ok(engine.resolve(character, item)?)
    }

    /// Purchase-time probe: the first gate `id` fails for `item`, if any.
    pub fn eligibility(
        &self,
        id: CharacterId,
        item: ItemHandle,
    ) -> Result<Option<RestrictionFailure>> {
        let character = self
            .character(id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        let definition = self
            .catalog
            .definition(item)
            .ok_or(RuntimeError::UnknownItem(item))?;
        Ok(check_restrictions(&definition, character).err())
    }

    // ===== mutations =====

    /// Adds an acquired item (purchase, loot, gift) to a character's inventory.
    pub fn grant_item(&mut self, id: CharacterId, item: ItemHandle) -> Result<()> {
        let result = if self.catalog.definition(item).is_none() {
            Err(RuntimeError::UnknownItem(item))
        } else {
            roster_entry(&mut self.player, &mut self.companions, id)
                .and_then(|character| Ok(character.receive_item(item)?))
        };
        self.finish("grant", id, result)?;
        tracing::info!(character = %id, %item, "item granted");
        Ok(())
    }

    pub fn equip(
        &mut self,
        id: CharacterId,
        item: ItemHandle,
        choice: Option<EquipmentSlot>,
    ) -> Result<EquipOutcome> {
        let result = self.with_engine(id, |engine, character| {
            engine.equip(character, item, choice)
        });
        let outcome = self.finish("equip", id, result)?;

        tracing::info!(
            character = %id,
            item = %outcome.item,
            slot = %outcome.slot,
            displaced = outcome.displaced.len(),
            "equipped"
        );
        self.events.publish(LoadoutEvent::Equipped {
            character: id,
            item: outcome.item,
            slot: outcome.slot,
            displaced: outcome.displaced.clone(),
        });
        self.publish_stats(id);
        Ok(outcome)
    }

    pub fn unequip(&mut self, id: CharacterId, slot: EquipmentSlot) -> Result<UnequipOutcome> {
        let result = self.with_engine(id, |engine, character| engine.unequip(character, slot));
        let outcome = self.finish("unequip", id, result)?;

        tracing::info!(character = %id, item = %outcome.item, %slot, "unequipped");
        self.events.publish(LoadoutEvent::Unequipped {
            character: id,
            item: outcome.item,
            slot,
        });
        self.publish_stats(id);
        Ok(outcome)
    }

    /// Moves an item the player holds onto a companion's loadout.
    ///
    /// Whatever the companion's equip displaces ends up in the player's
    /// inventory.
    pub fn give_to_companion(
        &mut self,
        companion: CharacterId,
        item: ItemHandle,
        choice: Option<EquipmentSlot>,
    ) -> Result<TransferOutcome> {
        let player = self.player.id;
        let result = self.with_pair(companion, |engine, player, companion| {
            engine.transfer(player, companion, item, choice)
        });
        let outcome = self.finish("give", companion, result)?;
        self.publish_transfer(player, companion, &outcome);
        Ok(outcome)
    }

    /// Moves an item a companion holds onto the player's loadout.
    pub fn take_from_companion(
        &mut self,
        companion: CharacterId,
        item: ItemHandle,
        choice: Option<EquipmentSlot>,
    ) -> Result<TransferOutcome> {
        let player = self.player.id;
        let result = self.with_pair(companion, |engine, player, companion| {
            engine.transfer(companion, player, item, choice)
        });
        let outcome = self.finish("take", companion, result)?;
        self.publish_transfer(companion, player, &outcome);
        Ok(outcome)
    }

    /// Strips every non-cursed item a companion wears into the player's
    /// inventory.
    pub fn reclaim_all(&mut self, companion: CharacterId) -> Result<ReclaimOutcome> {
        let player = self.player.id;
        let result = self.with_pair(companion, |engine, player, companion| {
            engine.reclaim_all(player, companion)
        });
        let outcome = self.finish("reclaim", companion, result)?;

        if !outcome.skipped_cursed.is_empty() {
            tracing::warn!(
                character = %companion,
                skipped = outcome.skipped_cursed.len(),
                "cursed items stay equipped"
            );
        }
        tracing::info!(
            from = %companion,
            to = %player,
            reclaimed = outcome.reclaimed.len(),
            "reclaimed"
        );
        self.events.publish(LoadoutEvent::Reclaimed {
            from: companion,
            to: player,
            items: outcome.reclaimed_items().collect(),
            skipped_cursed: outcome.skipped_cursed.iter().map(|(_, h)| *h).collect(),
        });
        self.publish_stats(companion);
        Ok(outcome)
    }

    /// Curse-removal hook: the occupant of `slot` may be unequipped afterwards.
    pub fn lift_curse(&mut self, id: CharacterId, slot: EquipmentSlot) -> Result<ItemHandle> {
        let result = roster_entry(&mut self.player, &mut self.companions, id)
            .and_then(|character| Ok(character.lift_curse(slot)?));
        let item = self.finish("lift_curse", id, result)?;

        tracing::info!(character = %id, %item, %slot, "curse lifted");
        self.events.publish(LoadoutEvent::CurseLifted {
            character: id,
            slot,
            item,
        });
        Ok(item)
    }

    /// Applies a base-stat change (level up, upgrade purchase) and recomputes
    /// derived stats.
    pub fn update_base(
        &mut self,
        id: CharacterId,
        update: impl FnOnce(&mut Character),
    ) -> Result<()> {
        let result = self.with_engine(id, |engine, character| {
            let mut staged = character.clone();
            update(&mut staged);
            engine.recompute(&mut staged)?;
            *character = staged;
            Ok(())
        });
        self.finish("update_base", id, result)?;
        self.publish_stats(id);
        Ok(())
    }

    /// Registers an ad-hoc item (crafted, enchanted) and returns its handle.
    pub fn register_item(&mut self, builder: EquipmentBuilder) -> Result<ItemHandle> {
        let player = self.player.id;
        let result = self.catalog.register(builder);
        let item = self.finish("register_item", player, result)?;

        let name = self
            .catalog
            .definition(item)
            .map(|def| def.name.clone())
            .unwrap_or_default();
        tracing::info!(%item, name = %name, "item registered");
        self.events
            .publish(LoadoutEvent::ItemRegistered { item, name });
        Ok(item)
    }

    // ===== persistence =====

    /// Captures every character's equipment and the runtime-registered items.
    pub fn snapshot(&self) -> Result<SaveFile> {
        let catalog = self.catalog.read()?;
        let mut save = SaveFile::new(self.session_id.clone());
        save.dynamic_items = catalog.dynamic_definitions().cloned().collect();
        save.equipment = self
            .roster()
            .map(|character| (character.id, character.equipment_record()))
            .collect();
        Ok(save)
    }

    pub fn save(&self, repository: &dyn SaveRepository) -> Result<()> {
        let save = self.snapshot()?;
        if let Err(e) = repository.save(&save) {
            tracing::error!(session = %self.session_id, error = %e, "save failed");
            return Err(e.into());
        }

        tracing::info!(
            session = %self.session_id,
            characters = save.equipment.len(),
            dynamic_items = save.dynamic_items.len(),
            "session saved"
        );
        self.events.publish(LoadoutEvent::SessionSaved {
            session_id: self.session_id.clone(),
        });
        Ok(())
    }

    /// Restores this session's save.
    ///
    /// The catalog and every record are validated on copies first; on error
    /// the session is unchanged.
    pub fn load(&mut self, repository: &dyn SaveRepository) -> Result<()> {
        let save = repository
            .load(&self.session_id)?
            .ok_or_else(|| RuntimeError::SaveNotFound(self.session_id.clone()))?;
        self.restore(save)
    }

    /// Applies a save to this session, all or nothing.
    pub fn restore(&mut self, save: SaveFile) -> Result<()> {
        let result = self.stage_restore(&save);
        let (catalog, player, companions) = self.finish("load", self.player.id, result)?;

        self.catalog.replace(catalog)?;
        self.player = player;
        self.companions = companions;

        tracing::info!(
            session = %save.session_id,
            characters = save.equipment.len(),
            "session loaded"
        );
        self.events.publish(LoadoutEvent::SessionLoaded {
            session_id: save.session_id.clone(),
            characters: save.equipment.len(),
        });
        for id in save.equipment.keys() {
            self.publish_stats(*id);
        }
        Ok(())
    }

    fn stage_restore(
        &self,
        save: &SaveFile,
    ) -> Result<(ItemCatalog, Character, BTreeMap<CharacterId, Character>)> {
        if save.version != SaveFile::VERSION {
            return Err(RuntimeError::UnsupportedSaveVersion {
                found: save.version,
                expected: SaveFile::VERSION,
            });
        }

        let mut catalog = self.catalog.read()?.clone();
        for definition in &save.dynamic_items {
            match catalog.definition(definition.handle) {
                Some(existing) if *existing == *definition => {}
                Some(existing) => {
                    return Err(RuntimeError::DynamicItemConflict {
                        handle: definition.handle,
                        saved: definition.name.clone(),
                        existing: existing.name.clone(),
                    });
                }
                None => {
                    catalog.restore_dynamic(definition.clone())?;
                }
            }
        }

        let mut player = self.player.clone();
        let mut companions = self.companions.clone();
        for (id, record) in &save.equipment {
            roster_entry(&mut player, &mut companions, *id)?
                .restore_equipment(record, &catalog, &self.tuning)
                .map_err(|source| RuntimeError::Restore {
                    character: *id,
                    source,
                })?;
        }

        Ok((catalog, player, companions))
    }

    // ===== plumbing =====

    fn with_engine<T>(
        &mut self,
        id: CharacterId,
        op: impl FnOnce(&LoadoutEngine<'_>, &mut Character) -> std::result::Result<T, LoadoutError>,
    ) -> Result<T> {
        let catalog = self.catalog.read()?;
        let engine = LoadoutEngine::new(&*catalog, &self.tuning);
        let character = roster_entry(&mut self.player, &mut self.companions, id)?;
        Ok(op(&engine, character)?)
    }

    fn with_pair<T>(
        &mut self,
        companion: CharacterId,
        op: impl FnOnce(
            &LoadoutEngine<'_>,
            &mut Character,
            &mut Character,
        ) -> std::result::Result<T, LoadoutError>,
    ) -> Result<T> {
        let catalog = self.catalog.read()?;
        let engine = LoadoutEngine::new(&*catalog, &self.tuning);
        if companion == self.player.id {
            return Err(RuntimeError::NotACompanion(companion));
        }
        let other = self
            .companions
            .get_mut(&companion)
            .ok_or(RuntimeError::UnknownCharacter(companion))?;
        Ok(op(&engine, &mut self.player, other)?)
    }

    /// Logs and publishes a rejection; passes successes through untouched.
    fn finish<T>(&self, operation: &str, character: CharacterId, result: Result<T>) -> Result<T> {
        result.inspect_err(|error| {
            let code = error.error_code();
            let severity = error.severity();
            if severity.is_internal() {
                tracing::error!(%character, operation, code, %severity, %error, "operation failed");
            } else {
                tracing::warn!(%character, operation, code, %severity, %error, "operation rejected");
            }
            self.events.publish(LoadoutEvent::Rejected {
                character,
                operation: operation.to_string(),
                code: code.to_string(),
                message: error.to_string(),
            });
        })
    }

    fn publish_transfer(&self, from: CharacterId, to: CharacterId, outcome: &TransferOutcome) {
        tracing::info!(
            %from,
            %to,
            item = %outcome.item,
            slot = %outcome.slot,
            returned = outcome.returned.len(),
            "transferred"
        );
        self.events.publish(LoadoutEvent::Transferred {
            from,
            to,
            item: outcome.item,
            slot: outcome.slot,
            returned: outcome.returned.clone(),
        });
        self.publish_stats(from);
        self.publish_stats(to);
    }

    fn publish_stats(&self, id: CharacterId) {
        if let Some(character) = self.character(id) {
            tracing::debug!(
                character = %id,
                revision = character.stats_revision(),
                "stats recomputed"
            );
            self.events.publish(LoadoutEvent::StatsRecomputed {
                character: id,
                revision: character.stats_revision(),
                stats: *character.stats(),
            });
        }
    }
}

fn roster_entry<'a>(
    player: &'a mut Character,
    companions: &'a mut BTreeMap<CharacterId, Character>,
    id: CharacterId,
) -> Result<&'a mut Character> {
    if id == player.id {
        Ok(player)
    } else {
        companions
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))
    }
}

/// Builder for [`Armory`].
#[derive(Default)]
pub struct ArmoryBuilder {
    session_id: Option<String>,
    catalog: Option<ItemCatalog>,
    tuning: CombatTuning,
    player: Option<Character>,
    companions: Vec<Character>,
    event_capacity: Option<usize>,
}

impl ArmoryBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn catalog(mut self, catalog: ItemCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn tuning(mut self, tuning: CombatTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn player(mut self, player: Character) -> Self {
        self.player = Some(player);
        self
    }

    pub fn companion(mut self, companion: Character) -> Self {
        self.companions.push(companion);
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Builds the session and computes every character's stats against the
    /// catalog.
    pub fn build(self) -> Result<Armory> {
        let mut player = self.player.ok_or(RuntimeError::MissingPlayer)?;
        let catalog = self.catalog.unwrap_or_default();
        let tuning = self.tuning;

        let mut companions = BTreeMap::new();
        {
            let engine = LoadoutEngine::new(&catalog, &tuning);
            engine.recompute(&mut player)?;
            for mut companion in self.companions {
                if companion.id == player.id {
                    return Err(RuntimeError::NotACompanion(companion.id));
                }
                engine.recompute(&mut companion)?;
                companions.insert(companion.id, companion);
            }
        }

        let session_id = self.session_id.unwrap_or_else(|| "default".to_string());
        tracing::info!(
            session = %session_id,
            companions = companions.len(),
            items = catalog.len(),
            "armory ready"
        );

        Ok(Armory {
            session_id,
            catalog: SharedCatalog::new(catalog),
            tuning,
            player,
            companions,
            events: self
                .event_capacity
                .map(EventBus::with_capacity)
                .unwrap_or_default(),
        })
    }
}
