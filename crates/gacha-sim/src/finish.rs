//! Cosmetic finish rolled for every UR in the royal hunt.

use gacha_core::rates::{
    CP_PER_BASIC_UR, CP_PER_ROYAL_UR, CP_PER_SHINE_UR, ROYAL_RATE, SHINE_RATE,
};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finish {
    Royal,
    Shine,
    Basic,
}

impl Finish {
    /// CP gained by disenchanting a UR with this finish.
    pub fn disenchant_cp(self) -> u32 {
        match self {
            Finish::Royal => CP_PER_ROYAL_UR,
            Finish::Shine => CP_PER_SHINE_UR,
            Finish::Basic => CP_PER_BASIC_UR,
        }
    }
}

/// Royal 1%, shine 10%, basic otherwise.
pub fn roll_finish<R: Rng + ?Sized>(rng: &mut R) -> Finish {
    let u: f64 = rng.gen();
    if u < ROYAL_RATE {
        Finish::Royal
    } else if u < ROYAL_RATE + SHINE_RATE {
        Finish::Shine
    } else {
        Finish::Basic
    }
}
