//! Per-slot draw schedule and pity bookkeeping.
//!
//! Selection packs draw once per pull at a flat rate. Secret packs draw
//! eight slots per pull: slots 1-4 can only yield out-of-pack URs, slots 5-8
//! yield in-pack URs. The 8th slot of every 10th pull has a boosted rate that
//! becomes certain when the previous 10-pull batch was dry.

use gacha_core::rates::{
    IN_PACK_SLOTS, OUT_OF_PACK_SLOTS, PULLS_PER_BATCH, SECRET_BASE_UR_RATE, SECRET_PITY_RATE,
    SECRET_TENTH_PULL_EIGHTH_SLOT_RATE,
};
use rand::Rng;
use tracing::trace;

/// Bernoulli draw that succeeds with probability `p`.
///
/// `p >= 1.0` always succeeds, `p <= 0.0` never does.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Uniform UR slot index in `[0, total_ur_in_pack)`.
pub fn pick_slot<R: Rng + ?Sized>(rng: &mut R, total_ur_in_pack: u32) -> usize {
    let u: f64 = rng.gen();
    (u * f64::from(total_ur_in_pack)) as usize
}

/// Whether an in-pack UR is the one target slot among `total_ur_in_pack`.
pub fn is_target<R: Rng + ?Sized>(rng: &mut R, total_ur_in_pack: u32) -> bool {
    roll(rng, 1.0 / f64::from(total_ur_in_pack))
}

/// Where a successful slot draw comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// UR outside the pack's pool; never a wanted card.
    OutOfPack,
    /// UR from the pack's own pool.
    InPack,
}

/// One slot of a secret-pack pull with its UR rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotDraw {
    pub kind: SlotKind,
    pub rate: f64,
}

/// The eight slots of secret-pack pull `pull_in_batch` (0-based within the batch).
pub fn secret_pull(pull_in_batch: u32, pity: bool) -> impl Iterator<Item = SlotDraw> {
    let last_pull = pull_in_batch + 1 == PULLS_PER_BATCH;
    let slots = OUT_OF_PACK_SLOTS + IN_PACK_SLOTS;
    (0..slots).map(move |slot| {
        if slot < OUT_OF_PACK_SLOTS {
            return SlotDraw {
                kind: SlotKind::OutOfPack,
                rate: SECRET_BASE_UR_RATE,
            };
        }
        let rate = if last_pull && slot + 1 == slots {
            if pity {
                SECRET_PITY_RATE
            } else {
                SECRET_TENTH_PULL_EIGHTH_SLOT_RATE
            }
        } else {
            SECRET_BASE_UR_RATE
        };
        SlotDraw {
            kind: SlotKind::InPack,
            rate,
        }
    })
}

/// Pity state carried across secret-pack batches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PityWindow {
    active: bool,
    ur_in_batch: u32,
}

impl PityWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current batch's guaranteed slot is certain.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// URs drawn so far in the current batch.
    #[cfg(test)]
    pub fn ur_in_batch(&self) -> u32 {
        self.ur_in_batch
    }

    pub fn begin_batch(&mut self) {
        self.ur_in_batch = 0;
    }

    pub fn record_ur(&mut self) {
        self.ur_in_batch += 1;
    }

    /// Close a fully played batch. Pity holds for the next batch iff this one was dry.
    pub fn end_batch(&mut self) {
        self.active = self.ur_in_batch == 0;
        if self.active {
            trace!("dry batch, pity armed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn certain_and_impossible_rolls() {
        // Largest sample the generator can produce is just below 1.0.
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(roll(&mut rng, 1.0));
        assert!(!roll(&mut rng, 0.999));
        let mut zero = StepRng::new(0, 0);
        assert!(!roll(&mut zero, 0.0));
        assert!(roll(&mut zero, 0.025));
    }

    #[test]
    fn slot_pick_stays_in_range() {
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(pick_slot(&mut high, 8), 7);
        assert_eq!(pick_slot(&mut high, 1), 0);
        let mut low = StepRng::new(0, 0);
        assert_eq!(pick_slot(&mut low, 8), 0);
    }

    #[test]
    fn first_nine_pulls_use_base_rate() {
        for pull in 0..PULLS_PER_BATCH - 1 {
            let slots: Vec<SlotDraw> = secret_pull(pull, true).collect();
            assert_eq!(slots.len(), 8);
            assert!(slots.iter().all(|s| s.rate == SECRET_BASE_UR_RATE));
            assert!(slots[..4].iter().all(|s| s.kind == SlotKind::OutOfPack));
            assert!(slots[4..].iter().all(|s| s.kind == SlotKind::InPack));
        }
    }

    #[test]
    fn tenth_pull_eighth_slot_is_boosted() {
        let normal: Vec<SlotDraw> = secret_pull(9, false).collect();
        assert_eq!(normal[7].rate, SECRET_TENTH_PULL_EIGHTH_SLOT_RATE);
        assert_eq!(normal[6].rate, SECRET_BASE_UR_RATE);
        let pity: Vec<SlotDraw> = secret_pull(9, true).collect();
        assert_eq!(pity[7].rate, 1.0);
        assert_eq!(pity[7].kind, SlotKind::InPack);
    }

    #[test]
    fn pity_tracks_dry_batches() {
        let mut pity = PityWindow::new();
        assert!(!pity.is_active());
        pity.begin_batch();
        pity.end_batch();
        assert!(pity.is_active());
        pity.begin_batch();
        pity.record_ur();
        assert_eq!(pity.ur_in_batch(), 1);
        pity.end_batch();
        assert!(!pity.is_active());
    }
}
