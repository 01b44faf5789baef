#![deny(warnings)]

//! Closed-form odds of falling short of a natural-draw target.
//!
//! Models the number of target-card draws in `n` pulls as Binomial(n, p)
//! with a fixed per-pull probability `p`, and reports P(X < k) together with
//! the expected pulls `k / p`. The secret-pack `p` is an empirical
//! approximation (see [`gacha_core::rates::SECRET_IN_PACK_UR_PER_TEN_PULLS`])
//! and does not reproduce the simulated pity mechanics.

use gacha_core::rates::{SECRET_IN_PACK_UR_PER_TEN_PULLS, SELECTION_UR_RATE_PER_PULL};
use gacha_core::{BakushiConfig, BakushiResult, PackType};
use tracing::debug;

/// Probabilities at or above this are shown as a capped string.
const CAPPED_PROBABILITY: f64 = 0.9999999;
/// Rendered for probabilities at or above [`CAPPED_PROBABILITY`].
pub const CAPPED_PERCENT: &str = "≥99.99999%";

/// Per-pull probability of drawing the target card naturally.
pub fn target_ur_probability(pack_type: PackType, total_ur_in_pack: u32) -> f64 {
    let per_pull = match pack_type {
        PackType::Selection => SELECTION_UR_RATE_PER_PULL,
        PackType::Secret => SECRET_IN_PACK_UR_PER_TEN_PULLS / 10.0,
    };
    per_pull / f64::from(total_ur_in_pack)
}

/// `ln C(n, k)`, summed term by term to stay finite for large `n`.
///
/// Returns negative infinity when `k > n`.
pub fn log_binomial(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }
    (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum()
}

/// P(X < k) for X ~ Binomial(n, p), clamped to [0, 1].
pub fn binomial_cdf(n: u64, k: u64, p: f64) -> f64 {
    if k == 0 {
        return 0.0;
    }
    if k > n {
        return 1.0;
    }
    if p <= 0.0 {
        return 1.0;
    }
    if p >= 1.0 {
        return 0.0;
    }

    let log_p = p.ln();
    let log_q = (1.0 - p).ln();
    let cdf: f64 = (0..k)
        .map(|i| (log_binomial(n, i) + i as f64 * log_p + (n - i) as f64 * log_q).exp())
        .sum();
    cdf.clamp(0.0, 1.0)
}

/// Render a probability as a percentage whose precision grows as it shrinks.
pub fn format_probability_percent(probability: f64) -> String {
    let percent = probability * 100.0;
    if probability >= CAPPED_PROBABILITY {
        CAPPED_PERCENT.to_string()
    } else if probability <= 1e-10 {
        format!("{percent:.2e}%")
    } else if probability >= 0.01 {
        format!("{percent:.2}%")
    } else if probability >= 0.0001 {
        format!("{percent:.4}%")
    } else if probability >= 0.000001 {
        format!("{percent:.6}%")
    } else {
        format!("{percent:.8}%")
    }
}

/// Odds of not having drawn `target_count` copies in `pulls`, plus the expected pulls.
pub fn calculate_bakushi(config: &BakushiConfig) -> BakushiResult {
    let p = target_ur_probability(config.pack_type, config.total_ur_in_pack);
    let probability = binomial_cdf(config.pulls, config.target_count, p);
    let expected_pulls = (config.target_count as f64 / p).round() as u64;
    debug!(
        pack = %config.pack_type,
        p,
        pulls = config.pulls,
        target = config.target_count,
        probability,
        "shortfall evaluated"
    );
    BakushiResult {
        probability,
        probability_percent: format_probability_percent(probability),
        expected_pulls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bakushi(pack_type: PackType, total: u32, pulls: u64, target: u64) -> BakushiResult {
        calculate_bakushi(&BakushiConfig {
            pack_type,
            total_ur_in_pack: total,
            pulls,
            target_count: target,
        })
    }

    #[test]
    fn selection_single_copy() {
        let r = bakushi(PackType::Selection, 8, 40, 1);
        let p: f64 = 0.225 / 8.0;
        assert!((target_ur_probability(PackType::Selection, 8) - 0.028125).abs() < 1e-15);
        assert_eq!(r.expected_pulls, 36);
        assert!((r.probability - (1.0 - p).powi(40)).abs() < 1e-12);
        assert_eq!(r.probability_percent, "31.95%");
    }

    #[test]
    fn secret_uses_fixed_in_pack_rate() {
        assert!((target_ur_probability(PackType::Secret, 8) - 0.0146875).abs() < 1e-15);
        assert_eq!(bakushi(PackType::Secret, 8, 10, 1).expected_pulls, 68);
        assert_eq!(bakushi(PackType::Secret, 8, 10, 3).expected_pulls, 204);
    }

    #[test]
    fn three_copies_of_ten() {
        let r = bakushi(PackType::Selection, 10, 100, 3);
        assert!((r.probability - 0.608_586_514).abs() < 1e-8);
        assert_eq!(r.probability_percent, "60.86%");
    }

    #[test]
    fn domain_boundaries() {
        assert_eq!(binomial_cdf(10, 0, 0.3), 0.0);
        assert_eq!(binomial_cdf(10, 11, 0.3), 1.0);
        assert_eq!(binomial_cdf(10, 3, 0.0), 1.0);
        assert_eq!(binomial_cdf(10, 10, 1.0), 0.0);
        assert_eq!(binomial_cdf(10, 1, 1.0), 0.0);
    }

    #[test]
    fn log_binomial_small_values() {
        assert_eq!(log_binomial(5, 0), 0.0);
        assert_eq!(log_binomial(5, 5), 0.0);
        assert_eq!(log_binomial(5, 6), f64::NEG_INFINITY);
        assert!((log_binomial(5, 2) - 10f64.ln()).abs() < 1e-12);
        assert!((log_binomial(52, 5) - 2_598_960f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn large_n_stays_finite() {
        // Binomial(100000, 1e-4) is close to Poisson(10).
        let cdf = binomial_cdf(100_000, 3, 1e-4);
        assert!((cdf - 0.002_768_487_800_5).abs() < 1e-9, "cdf {cdf}");
    }

    #[test]
    fn percent_precision_tiers() {
        assert_eq!(format_probability_percent(1.0), CAPPED_PERCENT);
        assert_eq!(format_probability_percent(0.99999995), CAPPED_PERCENT);
        assert_eq!(format_probability_percent(0.5), "50.00%");
        assert_eq!(format_probability_percent(0.001234), "0.1234%");
        assert_eq!(format_probability_percent(0.00001234), "0.001234%");
        assert_eq!(format_probability_percent(0.0000001234), "0.00001234%");
        assert_eq!(format_probability_percent(1.5e-11), "1.50e-9%");
    }

    #[test]
    fn tiny_shortfall_in_long_session() {
        let r = bakushi(PackType::Selection, 1, 500, 1);
        assert!(r.probability < 1e-10);
        assert!(r.probability_percent.contains('e'));
        assert!(r.probability_percent.ends_with('%'));
    }

    proptest! {
        #[test]
        fn cdf_is_a_probability(n in 1u64..400, k in 0u64..420, p in 0.0001f64..0.9999) {
            let c = binomial_cdf(n, k, p);
            prop_assert!((0.0..=1.0).contains(&c));
        }

        #[test]
        fn cdf_grows_with_k(n in 1u64..200, k in 0u64..200, p in 0.001f64..0.999) {
            let lo = binomial_cdf(n, k, p);
            let hi = binomial_cdf(n, k + 1, p);
            prop_assert!(hi + 1e-12 >= lo);
        }

        #[test]
        fn below_all_outcomes_is_certain(n in 1u64..300, p in 0.001f64..0.999) {
            prop_assert_eq!(binomial_cdf(n, n + 1, p), 1.0);
            prop_assert_eq!(binomial_cdf(n, 0, p), 0.0);
        }

        #[test]
        fn more_pulls_never_raise_shortfall(pulls in 1u64..500, target in 1u64..4, total in 1u32..20) {
            let a = bakushi(PackType::Secret, total, pulls, target).probability;
            let b = bakushi(PackType::Secret, total, pulls + 1, target).probability;
            prop_assert!(b <= a + 1e-12);
        }
    }
}
