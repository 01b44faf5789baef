#![deny(warnings)]

//! Monte Carlo engine for UR pack openings.
//!
//! This crate provides:
//! - Single trials for collecting a wanted set of cards (selection and secret packs)
//! - Single royal-hunt trials for one target card's royal finish
//! - Aggregation of many trials into mean/median/90th-percentile summaries
//!
//! Every trial takes the random source as a parameter; seed it (see
//! [`seeded_rng`]) for reproducible runs.

pub mod craft;
pub mod draw;
pub mod finish;
pub mod inventory;
pub mod royal;
pub mod state;
pub mod stats;
pub mod trial;

pub use royal::{simulate_royal_once, simulate_royal_secret, simulate_royal_selection};
pub use trial::{simulate_once, simulate_secret_pack, simulate_selection_pack, TrialOutcome};

use gacha_core::{PackConfig, RoyalChallengeConfig, RoyalChallengeResult, SimulationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::{debug, info};

/// Errors produced by the aggregating entry points.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// At least one trial is required for order statistics.
    #[error("iterations must be > 0")]
    NoIterations,
    /// A statistic could not be represented as a decimal cost.
    #[error("non-finite numeric conversion")]
    NonFinite,
}

/// Generator used by the entry points: seeded when `seed` is given, from OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run `iterations` collection trials and summarize pulls and URs drawn.
pub fn run_simulation<R: Rng + ?Sized>(
    config: &PackConfig,
    iterations: usize,
    rng: &mut R,
) -> Result<SimulationResult, SimError> {
    info!(
        pack = %config.pack_type,
        total_ur = config.total_ur_in_pack,
        wanted = config.wanted_cards.len(),
        copies = config.total_wanted_count(),
        iterations,
        "running collection simulation"
    );
    let mut pulls = Vec::with_capacity(iterations);
    let mut urs = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let outcome = trial::simulate_once(config, rng);
        pulls.push(outcome.pulls);
        urs.push(outcome.ur_pulled);
    }

    let summary = stats::summarize(&mut pulls).ok_or(SimError::NoIterations)?;
    let result = SimulationResult {
        average_pulls: stats::round_one_decimal(summary.mean),
        median_pulls: summary.median,
        percentile_90: summary.percentile_90,
        average_ur_pulled: stats::round_one_decimal(stats::mean(&urs)),
    };
    info!(
        average = result.average_pulls,
        median = result.median_pulls,
        p90 = result.percentile_90,
        "collection simulation done"
    );
    Ok(result)
}

/// Run `iterations` royal-hunt trials and summarize pulls and their cost.
pub fn run_royal_simulation<R: Rng + ?Sized>(
    config: &RoyalChallengeConfig,
    iterations: usize,
    rng: &mut R,
) -> Result<RoyalChallengeResult, SimError> {
    info!(
        pack = %config.pack_type,
        total_ur = config.total_ur_in_pack,
        target = %config.target_card_name,
        disable_craft = config.disable_craft,
        iterations,
        "running royal simulation"
    );
    let mut pulls: Vec<u64> = (0..iterations)
        .map(|_| royal::simulate_royal_once(config, rng))
        .collect();

    let summary = stats::summarize(&mut pulls).ok_or(SimError::NoIterations)?;
    let cost_per_pull = config.cost_per_ten_pulls / Decimal::TEN;
    let mean = Decimal::from_f64(summary.mean).ok_or(SimError::NonFinite)?;
    let result = RoyalChallengeResult {
        average_pulls: stats::round_one_decimal(summary.mean),
        median_pulls: summary.median,
        percentile_90: summary.percentile_90,
        average_cost: cost(mean, cost_per_pull),
        median_cost: cost(Decimal::from(summary.median), cost_per_pull),
        percentile_90_cost: cost(Decimal::from(summary.percentile_90), cost_per_pull),
    };
    debug!(cost_per_pull = %cost_per_pull, "royal cost basis");
    info!(
        average = result.average_pulls,
        median = result.median_pulls,
        p90 = result.percentile_90,
        average_cost = %result.average_cost,
        "royal simulation done"
    );
    Ok(result)
}

/// `pulls * cost_per_pull`, rounded to a whole currency unit.
fn cost(pulls: Decimal, cost_per_pull: Decimal) -> Decimal {
    (pulls * cost_per_pull).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
