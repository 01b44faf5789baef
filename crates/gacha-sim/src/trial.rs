//! Single collection trials: pull until every wanted copy is owned.

use crate::craft::craft_needed;
use crate::draw::{pick_slot, roll, secret_pull, SlotKind};
use crate::state::SimulationState;
use gacha_core::rates::{PULLS_PER_BATCH, SELECTION_UR_RATE_PER_PULL};
use gacha_core::{PackConfig, PackType};
use rand::Rng;

/// Terminal counters of one trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialOutcome {
    pub pulls: u64,
    pub ur_pulled: u64,
}

/// Selection pack: one UR draw per pull, every UR from the pack's pool.
pub fn simulate_selection_pack<R: Rng + ?Sized>(config: &PackConfig, rng: &mut R) -> TrialOutcome {
    selection_trial(config, rng).0
}

/// Secret pack: 10-pull batches, eight slots per pull, pity on dry batches.
pub fn simulate_secret_pack<R: Rng + ?Sized>(config: &PackConfig, rng: &mut R) -> TrialOutcome {
    secret_trial(config, rng).0
}

/// Dispatch on pack type.
pub fn simulate_once<R: Rng + ?Sized>(config: &PackConfig, rng: &mut R) -> TrialOutcome {
    match config.pack_type {
        PackType::Selection => simulate_selection_pack(config, rng),
        PackType::Secret => simulate_secret_pack(config, rng),
    }
}

pub(crate) fn selection_trial<'a, R: Rng + ?Sized>(
    config: &'a PackConfig,
    rng: &mut R,
) -> (TrialOutcome, SimulationState<'a>) {
    let mut state = SimulationState::new(&config.wanted_cards);
    let mut pulls = 0u64;

    while !state.is_complete() {
        pulls += 1;
        if roll(rng, SELECTION_UR_RATE_PER_PULL) {
            let slot = pick_slot(rng, config.total_ur_in_pack);
            state.take_in_pack_ur(slot);
        }
        craft_needed(&mut state);
    }

    let outcome = TrialOutcome {
        pulls,
        ur_pulled: state.total_ur_drawn,
    };
    (outcome, state)
}

pub(crate) fn secret_trial<'a, R: Rng + ?Sized>(
    config: &'a PackConfig,
    rng: &mut R,
) -> (TrialOutcome, SimulationState<'a>) {
    let mut state = SimulationState::new(&config.wanted_cards);
    let mut pulls = 0u64;

    'batches: while !state.is_complete() {
        state.pity.begin_batch();
        for pull_in_batch in 0..PULLS_PER_BATCH {
            if state.is_complete() {
                break 'batches;
            }
            pulls += 1;
            for slot in secret_pull(pull_in_batch, state.pity.is_active()) {
                if roll(rng, slot.rate) {
                    state.pity.record_ur();
                    match slot.kind {
                        SlotKind::OutOfPack => state.take_out_of_pack_ur(),
                        SlotKind::InPack => {
                            let idx = pick_slot(rng, config.total_ur_in_pack);
                            state.take_in_pack_ur(idx);
                        }
                    }
                }
                craft_needed(&mut state);
            }
        }
        state.pity.end_batch();
    }

    let outcome = TrialOutcome {
        pulls,
        ur_pulled: state.total_ur_drawn,
    };
    (outcome, state)
}
