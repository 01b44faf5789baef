//! Royal-hunt trials: pull until the target UR shows up with the royal finish.
//!
//! Only currency and pity are tracked; per-card identity is reduced to a
//! "was this in-pack UR the target" roll. A royal finish obtained while
//! crafting counts as the target.

use crate::draw::{is_target, roll, secret_pull, SlotKind};
use crate::finish::{roll_finish, Finish};
use crate::state::RoyalSimulationState;
use gacha_core::rates::{CP_TO_CRAFT_UR, PULLS_PER_BATCH, ROYAL_RATE, SELECTION_UR_RATE_PER_PULL};
use gacha_core::{PackType, RoyalChallengeConfig};
use rand::Rng;

/// Settle one drawn UR. Returns `true` once the royal target is secured.
fn resolve_ur<R: Rng + ?Sized>(
    state: &mut RoyalSimulationState,
    target: bool,
    disable_craft: bool,
    rng: &mut R,
) -> bool {
    let finish = roll_finish(rng);
    if target && finish == Finish::Royal {
        return true;
    }
    state.currency += finish.disenchant_cp();

    if disable_craft {
        return false;
    }
    while state.currency >= CP_TO_CRAFT_UR {
        state.currency -= CP_TO_CRAFT_UR;
        if roll(rng, ROYAL_RATE) {
            return true;
        }
        // The crafted copy gets its own finish roll before being disenchanted.
        let crafted = roll_finish(rng);
        if crafted == Finish::Royal {
            return true;
        }
        state.currency += crafted.disenchant_cp();
    }
    false
}

/// Selection pack: every UR is in-pack and may be the target.
pub fn simulate_royal_selection<R: Rng + ?Sized>(
    config: &RoyalChallengeConfig,
    rng: &mut R,
) -> u64 {
    let mut state = RoyalSimulationState::default();
    let mut pulls = 0u64;
    loop {
        pulls += 1;
        if roll(rng, SELECTION_UR_RATE_PER_PULL) {
            let target = is_target(rng, config.total_ur_in_pack);
            if resolve_ur(&mut state, target, config.disable_craft, rng) {
                return pulls;
            }
        }
    }
}

/// Secret pack: batching and pity as in the collection trial; out-of-pack
/// URs are never the target.
pub fn simulate_royal_secret<R: Rng + ?Sized>(config: &RoyalChallengeConfig, rng: &mut R) -> u64 {
    let mut state = RoyalSimulationState::default();
    let mut pulls = 0u64;
    loop {
        state.pity.begin_batch();
        for pull_in_batch in 0..PULLS_PER_BATCH {
            pulls += 1;
            for slot in secret_pull(pull_in_batch, state.pity.is_active()) {
                if !roll(rng, slot.rate) {
                    continue;
                }
                state.pity.record_ur();
                let target = match slot.kind {
                    SlotKind::OutOfPack => false,
                    SlotKind::InPack => is_target(rng, config.total_ur_in_pack),
                };
                if resolve_ur(&mut state, target, config.disable_craft, rng) {
                    return pulls;
                }
            }
        }
        state.pity.end_batch();
    }
}

/// Dispatch on pack type.
pub fn simulate_royal_once<R: Rng + ?Sized>(config: &RoyalChallengeConfig, rng: &mut R) -> u64 {
    match config.pack_type {
        PackType::Selection => simulate_royal_selection(config, rng),
        PackType::Secret => simulate_royal_secret(config, rng),
    }
}
