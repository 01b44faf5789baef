//! Greedy conversion of disenchant currency into needed copies.

use crate::state::SimulationState;
use gacha_core::rates::CP_TO_CRAFT_UR;

/// Spend CP on missing copies until CP runs short or nothing craftable is missing.
///
/// Each craft goes to the first craft-enabled card in list order that is
/// still short. Returns the number of copies crafted.
pub fn craft_needed(state: &mut SimulationState<'_>) -> u32 {
    let mut crafted = 0;
    while state.currency >= CP_TO_CRAFT_UR {
        let Some(slot) = state.inventory.first_craftable_needing() else {
            break;
        };
        state.inventory.grant(slot);
        state.currency -= CP_TO_CRAFT_UR;
        crafted += 1;
    }
    crafted
}
