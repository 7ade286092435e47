use crate::config::constant::{
    IDEAL_MAX_KG, IDEAL_MIN_KG, PENALTY_FACTOR_HARSH, PENALTY_FACTOR_MILD, PENALTY_RANGE_MAX_KG,
    PENALTY_RANGE_MIN_KG,
};

/// Fraction of a carcass's value lost to the weight penalty.
/// 0.00 inside the ideal band, 0.15 in the mild band around it,
/// 0.20 everywhere else.
pub fn penalty_ratio(weight_kg: f64) -> f64 {
    if (IDEAL_MIN_KG..=IDEAL_MAX_KG).contains(&weight_kg) {
        0.0
    } else if (PENALTY_RANGE_MIN_KG..=PENALTY_RANGE_MAX_KG).contains(&weight_kg) {
        PENALTY_FACTOR_MILD
    } else {
        PENALTY_FACTOR_HARSH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_band_has_no_penalty() {
        assert_eq!(penalty_ratio(105.0), 0.0);
        assert_eq!(penalty_ratio(110.0), 0.0);
        assert_eq!(penalty_ratio(115.0), 0.0);
    }

    #[test]
    fn mild_band_boundaries() {
        assert_eq!(penalty_ratio(104.999), 0.15);
        assert_eq!(penalty_ratio(115.001), 0.15);
        assert_eq!(penalty_ratio(100.0), 0.15);
        assert_eq!(penalty_ratio(120.0), 0.15);
    }

    #[test]
    fn harsh_band_boundaries() {
        assert_eq!(penalty_ratio(99.999), 0.20);
        assert_eq!(penalty_ratio(120.001), 0.20);
        assert_eq!(penalty_ratio(0.0), 0.20);
        assert_eq!(penalty_ratio(200.0), 0.20);
    }
}
