//! The acting player of an interaction.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::types::{GameMode, Hand, ItemStack, Material};

/// A player as seen by the engine during one event.
///
/// The host owns the real player; events borrow this view mutably so the
/// engine can consume items from the player's hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub uuid: Uuid,
    pub name: String,
    pub groups: BTreeSet<String>,
    pub game_mode: GameMode,
    pub sneaking: bool,

    /// Horizontal look angle in degrees.
    pub yaw: f32,

    pub main_hand: Option<ItemStack>,
    pub off_hand: Option<ItemStack>,

    /// Explicitly set permission nodes. Unset nodes fall back to the
    /// permission's default.
    permissions: BTreeMap<String, bool>,
}

impl Player {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            groups: BTreeSet::new(),
            game_mode: GameMode::Survival,
            sneaking: false,
            yaw: 0.0,
            main_hand: None,
            off_hand: None,
            permissions: BTreeMap::new(),
        }
    }

    pub fn with_game_mode(mut self, game_mode: GameMode) -> Self {
        self.game_mode = game_mode;
        self
    }

    pub fn with_sneaking(mut self, sneaking: bool) -> Self {
        self.sneaking = sneaking;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_main_hand(mut self, stack: ItemStack) -> Self {
        self.main_hand = Some(stack);
        self
    }

    pub fn with_off_hand(mut self, stack: ItemStack) -> Self {
        self.off_hand = Some(stack);
        self
    }

    pub fn with_group(mut self, group: impl AsRef<str>) -> Self {
        self.groups.insert(group.as_ref().to_ascii_lowercase());
        self
    }

    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.grant(node);
        self
    }

    pub fn without_permission(mut self, node: impl Into<String>) -> Self {
        self.deny(node);
        self
    }

    pub fn grant(&mut self, node: impl Into<String>) {
        self.permissions.insert(node.into(), true);
    }

    pub fn deny(&mut self, node: impl Into<String>) {
        self.permissions.insert(node.into(), false);
    }

    /// The explicit value of `node`, if one was set.
    pub fn permission_value(&self, node: &str) -> Option<bool> {
        self.permissions.get(node).copied()
    }

    pub fn item_in(&self, hand: Hand) -> Option<&ItemStack> {
        match hand {
            Hand::Main => self.main_hand.as_ref(),
            Hand::Off => self.off_hand.as_ref(),
        }
    }

    fn slot_mut(&mut self, hand: Hand) -> &mut Option<ItemStack> {
        match hand {
            Hand::Main => &mut self.main_hand,
            Hand::Off => &mut self.off_hand,
        }
    }

    /// Whether either hand holds `material`.
    pub fn holds(&self, material: Material) -> bool {
        [Hand::Main, Hand::Off]
            .into_iter()
            .any(|hand| self.item_in(hand).is_some_and(|s| s.is_of(material)))
    }

    /// Sneaking with items in both hands signals placing, not using.
    pub fn is_sneak_placing(&self) -> bool {
        let filled = |hand| self.item_in(hand).is_some_and(|s: &ItemStack| !s.is_empty());
        self.sneaking && filled(Hand::Main) && filled(Hand::Off)
    }

    /// Remove one `material` item, main hand first. Returns the hand it
    /// was taken from.
    pub fn remove_one(&mut self, material: Material) -> Option<Hand> {
        let hand = [Hand::Main, Hand::Off]
            .into_iter()
            .find(|&hand| self.item_in(hand).is_some_and(|s| s.is_of(material)))?;
        let slot = self.slot_mut(hand);
        *slot = slot.and_then(ItemStack::take_one);
        Some(hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Uuid::from_u128(1), "Alice")
    }

    #[test]
    fn test_sneak_placing_needs_both_hands() {
        let stone = ItemStack::new(Material::Stone, 1);
        assert!(!player().with_sneaking(true).with_main_hand(stone).is_sneak_placing());
        assert!(!player().with_main_hand(stone).with_off_hand(stone).is_sneak_placing());
        assert!(player()
            .with_sneaking(true)
            .with_main_hand(stone)
            .with_off_hand(stone)
            .is_sneak_placing());
        assert!(!player()
            .with_sneaking(true)
            .with_main_hand(stone)
            .with_off_hand(ItemStack::new(Material::Air, 1))
            .is_sneak_placing());
    }

    #[test]
    fn test_remove_one_prefers_main_hand() {
        let mut p = player()
            .with_main_hand(ItemStack::new(Material::Sign, 2))
            .with_off_hand(ItemStack::new(Material::Sign, 5));

        assert_eq!(p.remove_one(Material::Sign), Some(Hand::Main));
        assert_eq!(p.main_hand, Some(ItemStack::new(Material::Sign, 1)));
        assert_eq!(p.remove_one(Material::Sign), Some(Hand::Main));
        assert_eq!(p.main_hand, None);
        assert_eq!(p.remove_one(Material::Sign), Some(Hand::Off));
        assert_eq!(p.off_hand, Some(ItemStack::new(Material::Sign, 4)));
    }

    #[test]
    fn test_remove_one_without_item() {
        let mut p = player().with_main_hand(ItemStack::new(Material::Stone, 1));
        assert_eq!(p.remove_one(Material::Sign), None);
        assert_eq!(p.main_hand, Some(ItemStack::new(Material::Stone, 1)));
    }

    #[test]
    fn test_permission_nodes() {
        let mut p = player();
        assert_eq!(p.permission_value("blocklocker.bypass"), None);
        p.grant("blocklocker.bypass");
        assert_eq!(p.permission_value("blocklocker.bypass"), Some(true));
        p.deny("blocklocker.bypass");
        assert_eq!(p.permission_value("blocklocker.bypass"), Some(false));
    }
}
