//! Mutable per-trial state, created at trial start and dropped at trial end.

use crate::draw::PityWindow;
use crate::inventory::Inventory;
use gacha_core::rates::CP_PER_DUPE_UR;
use gacha_core::WantedCard;

/// State of one collection trial.
#[derive(Clone, Debug)]
pub struct SimulationState<'a> {
    pub inventory: Inventory<'a>,
    /// Disenchant currency (CP).
    pub currency: u32,
    pub total_ur_drawn: u64,
    pub pity: PityWindow,
}

impl<'a> SimulationState<'a> {
    pub fn new(cards: &'a [WantedCard]) -> Self {
        Self {
            inventory: Inventory::new(cards),
            currency: 0,
            total_ur_drawn: 0,
            pity: PityWindow::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.inventory.is_complete()
    }

    /// Resolve an in-pack UR landing in `slot`.
    pub fn take_in_pack_ur(&mut self, slot: usize) {
        self.total_ur_drawn += 1;
        if !self.inventory.grant(slot) {
            self.currency += CP_PER_DUPE_UR;
        }
    }

    /// Out-of-pack URs are always disenchanted.
    pub fn take_out_of_pack_ur(&mut self) {
        self.total_ur_drawn += 1;
        self.currency += CP_PER_DUPE_UR;
    }
}

/// State of one royal-hunt trial; only currency and pity matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoyalSimulationState {
    pub currency: u32,
    pub pity: PityWindow,
}
