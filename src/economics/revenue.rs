use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::economics::penalty::penalty_ratio;

/// Revenue and penalty totals for a delivered batch. Individual weights
/// are sampled from N(avg_weight, std_weight); each head contributes
/// `w * price * (1 - ratio)` to revenue and the complement to penalty.
/// The caller owns the RNG so runs stay reproducible.
pub fn batch_revenue(
    num_pigs: u32,
    avg_weight: f64,
    std_weight: f64,
    price_per_kg: f64,
    rng: &mut ChaCha8Rng,
) -> (f64, f64) {
    let dist = Normal::new(avg_weight, std_weight.max(0.0))
        .expect("weight std must be non-negative and finite");

    let mut total_revenue = 0.0;
    let mut total_penalty = 0.0;
    for _ in 0..num_pigs {
        let w: f64 = dist.sample(rng);
        let ratio = penalty_ratio(w);
        total_revenue += w * price_per_kg * (1.0 - ratio);
        total_penalty += w * price_per_kg * ratio;
    }

    (total_revenue, total_penalty)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn zero_std_batch_is_exact() {
        // 100 pigs at 121 kg: harsh 20% band.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (revenue, penalty) = batch_revenue(100, 121.0, 0.0, 1.56, &mut rng);
        assert!((revenue - 15_100.8).abs() < 1e-6);
        assert!((penalty - 3_775.2).abs() < 1e-6);
    }

    #[test]
    fn ideal_weight_batch_pays_no_penalty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (revenue, penalty) = batch_revenue(50, 110.0, 0.0, 1.56, &mut rng);
        assert!((revenue - 50.0 * 110.0 * 1.56).abs() < 1e-6);
        assert_eq!(penalty, 0.0);
    }

    #[test]
    fn same_seed_same_batch() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let ra = batch_revenue(200, 110.0, 5.0, 1.56, &mut a);
        let rb = batch_revenue(200, 110.0, 5.0, 1.56, &mut b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn empty_batch_is_free() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(batch_revenue(0, 110.0, 5.0, 1.56, &mut rng), (0.0, 0.0));
    }
}
