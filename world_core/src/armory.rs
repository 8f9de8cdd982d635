use crate::WorldError;
use gear_core::{
    EquipOutcome, Equipment, EquipmentSnapshot, ItemCatalog, ItemId, Loadout, Rarity,
    UnequipOutcome,
};
use std::collections::BTreeMap;

/// Forged items keyed by id
///
/// Character names are taken as given; the armory does not consult a roster.
#[derive(Debug, Default)]
pub struct Armory {
    catalog: ItemCatalog,
    items: BTreeMap<ItemId, Equipment>,
}

impl Armory {
    /// Armory forging from the built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ItemCatalog) -> Self {
        Armory {
            catalog,
            items: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Create an item from a base id and store it
    pub fn forge(&mut self, base: &str, level: u32, rarity: Rarity) -> Result<&Equipment, WorldError> {
        let item = self.catalog.create(base, level, rarity)?;
        tracing::debug!(item = %item.id(), base, level, %rarity, "item forged");
        let id = item.id().clone();
        Ok(self.items.entry(id).or_insert(item))
    }

    pub fn get(&self, id: &str) -> Result<&Equipment, WorldError> {
        self.items
            .get(&ItemId::from(id))
            .ok_or_else(|| WorldError::UnknownItem(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Equipment, WorldError> {
        self.items
            .get_mut(&ItemId::from(id))
            .ok_or_else(|| WorldError::UnknownItem(id.to_string()))
    }

    /// Snapshots of every item, ordered by id
    pub fn list(&self) -> Vec<EquipmentSnapshot> {
        self.items.values().map(Equipment::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn equip(&mut self, id: &str, character: &str) -> Result<EquipOutcome, WorldError> {
        Ok(self.get_mut(id)?.equip(character))
    }

    pub fn unequip(&mut self, id: &str, character: &str) -> Result<UnequipOutcome, WorldError> {
        Ok(self.get_mut(id)?.unequip(character))
    }

    /// Items currently worn by a character
    pub fn equipped_by<'a>(&'a self, character: &'a str) -> impl Iterator<Item = &'a Equipment> + 'a {
        self.items
            .values()
            .filter(move |item| item.equipped_by() == Some(character))
    }

    /// Aggregated bonuses of everything a character wears
    pub fn loadout(&self, character: &str) -> Loadout {
        Loadout::from_items(self.equipped_by(character))
    }
}
