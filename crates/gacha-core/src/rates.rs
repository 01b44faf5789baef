//! Draw rates and currency values for the two supported pack types.

/// Expected in-pack URs per 10 selection-pack pulls.
pub const SELECTION_UR_RATE_PER_TEN_PULLS: f64 = 2.25;
/// Probability that a single selection-pack pull yields a UR.
pub const SELECTION_UR_RATE_PER_PULL: f64 = SELECTION_UR_RATE_PER_TEN_PULLS / 10.0;

/// Per-slot UR rate for secret-pack slots 1-8.
pub const SECRET_BASE_UR_RATE: f64 = 0.025;
/// Rate of the 8th slot on the 10th pull of a batch.
pub const SECRET_TENTH_PULL_EIGHTH_SLOT_RATE: f64 = 0.2;
/// Rate of the 8th slot on the 10th pull when the pity flag is set.
pub const SECRET_PITY_RATE: f64 = 1.0;

/// Pulls that make up one pity window.
pub const PULLS_PER_BATCH: u32 = 10;
/// Secret-pack slots (1-4) that only ever yield out-of-pack URs.
pub const OUT_OF_PACK_SLOTS: u32 = 4;
/// Secret-pack slots (5-8) that yield in-pack URs.
pub const IN_PACK_SLOTS: u32 = 4;

/// CP credited for a UR that is not needed.
pub const CP_PER_DUPE_UR: u32 = 10;
/// CP spent to craft one UR.
pub const CP_TO_CRAFT_UR: u32 = 30;

/// Probability that a UR carries the royal finish.
pub const ROYAL_RATE: f64 = 0.01;
/// Probability that a UR carries the shine finish.
pub const SHINE_RATE: f64 = 0.10;

/// Disenchant values by finish.
pub const CP_PER_ROYAL_UR: u32 = 30;
pub const CP_PER_SHINE_UR: u32 = 15;
pub const CP_PER_BASIC_UR: u32 = 10;

/// Real-money cost of a 10-pull, in yen.
pub const COST_PER_TEN_PULLS: i64 = 2000;

/// In-pack URs per 10 secret-pack pulls used by the analytic model.
///
/// Pulls 1-9 contribute 4 × 2.5% each (0.9), the 10th pull 3 × 2.5% + 20%
/// (0.275). Pity and out-of-pack slots are ignored, so this is an
/// approximation of the simulated secret pack, not an exact match.
pub const SECRET_IN_PACK_UR_PER_TEN_PULLS: f64 = 1.175;

/// Default trial count for the collection simulation.
pub const DEFAULT_ITERATIONS: usize = 100_000;
/// Default trial count for the royal-hunt simulation.
pub const DEFAULT_ROYAL_ITERATIONS: usize = 10_000;
