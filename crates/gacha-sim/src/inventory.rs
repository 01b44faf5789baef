//! Per-trial record of wanted copies obtained so far.

use gacha_core::WantedCard;

/// Obtained copies for each wanted card, kept in the config's card order.
///
/// UR slot `i` of the pack maps to `cards[i]`; slots past the wanted list
/// are URs nobody asked for.
#[derive(Clone, Debug)]
pub struct Inventory<'a> {
    cards: &'a [WantedCard],
    obtained: Vec<u8>,
}

impl<'a> Inventory<'a> {
    pub fn new(cards: &'a [WantedCard]) -> Self {
        Self {
            cards,
            obtained: vec![0; cards.len()],
        }
    }

    /// Copies of `id` obtained so far (0 for unknown ids).
    #[cfg(test)]
    pub fn obtained(&self, id: &gacha_core::CardId) -> u8 {
        self.cards
            .iter()
            .position(|c| &c.id == id)
            .map_or(0, |i| self.obtained[i])
    }

    /// Whether the card in slot `slot` still needs a copy.
    pub fn needs(&self, slot: usize) -> bool {
        match self.cards.get(slot) {
            Some(card) => self.obtained[slot] < card.count,
            None => false,
        }
    }

    /// Give one copy to slot `slot` if it still needs one.
    pub fn grant(&mut self, slot: usize) -> bool {
        if !self.needs(slot) {
            return false;
        }
        self.obtained[slot] += 1;
        true
    }

    /// Every wanted card has at least its requested count.
    pub fn is_complete(&self) -> bool {
        self.cards
            .iter()
            .zip(&self.obtained)
            .all(|(card, &got)| got >= card.count)
    }

    /// First card in list order that may be crafted and still needs a copy.
    pub fn first_craftable_needing(&self) -> Option<usize> {
        (0..self.cards.len()).find(|&i| !self.cards[i].disable_craft && self.needs(i))
    }

    /// Copies still missing across craftable cards.
    #[cfg(test)]
    pub fn craftable_needed(&self) -> u32 {
        self.cards
            .iter()
            .zip(&self.obtained)
            .filter(|(card, _)| !card.disable_craft)
            .map(|(card, &got)| u32::from(card.count.saturating_sub(got)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::CardId;

    fn cards() -> Vec<WantedCard> {
        vec![
            WantedCard {
                id: CardId::from("a"),
                name: "A".into(),
                count: 2,
                disable_craft: true,
            },
            WantedCard {
                id: CardId::from("b"),
                name: "B".into(),
                count: 1,
                disable_craft: false,
            },
        ]
    }

    #[test]
    fn grants_stop_at_requested_count() {
        let cards = cards();
        let mut inv = Inventory::new(&cards);
        assert!(inv.grant(0));
        assert!(inv.grant(0));
        assert!(!inv.grant(0));
        assert_eq!(inv.obtained(&CardId::from("a")), 2);
        assert!(!inv.is_complete());
        assert!(inv.grant(1));
        assert!(inv.is_complete());
    }

    #[test]
    fn slots_past_wanted_list_are_never_needed() {
        let cards = cards();
        let mut inv = Inventory::new(&cards);
        assert!(!inv.needs(2));
        assert!(!inv.grant(7));
        assert_eq!(inv.obtained(&CardId::from("zzz")), 0);
    }

    #[test]
    fn craft_disabled_cards_are_skipped() {
        let cards = cards();
        let mut inv = Inventory::new(&cards);
        assert_eq!(inv.craftable_needed(), 1);
        assert_eq!(inv.first_craftable_needing(), Some(1));
        inv.grant(1);
        assert_eq!(inv.craftable_needed(), 0);
        assert_eq!(inv.first_craftable_needing(), None);
    }
}
