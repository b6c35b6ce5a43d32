//! Fuzzy-min learning rule.
//!
//! `w'_i = β · min(x_i, w_i) + (1 − β) · w_i`
//!
//! With `β = 1` ("fast learning") the prototype snaps to the fuzzy
//! intersection `x ∧ w`. For any `β ∈ [0, 1]` every weight is non-increasing,
//! so a category's box can only grow and never forgets inputs it already
//! covers.

/// Apply the fuzzy-min rule in place.
pub fn fuzzy_min_update(input: &[f64], weights: &mut [f64], learning_rate: f64) {
    debug_assert_eq!(input.len(), weights.len(), "Dimension mismatch in update");
    if learning_rate >= 1.0 {
        for (w, &x) in weights.iter_mut().zip(input.iter()) {
            *w = w.min(x);
        }
        return;
    }
    let keep = 1.0 - learning_rate;
    for (w, &x) in weights.iter_mut().zip(input.iter()) {
        *w = learning_rate * x.min(*w) + keep * *w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_learning_is_fuzzy_intersection() {
        let x = [0.2, 0.9, 0.8, 0.1];
        let mut w = [0.5, 0.5, 0.5, 0.5];
        fuzzy_min_update(&x, &mut w, 1.0);
        assert_eq!(w, [0.2, 0.5, 0.5, 0.1]);
    }

    #[test]
    fn test_slow_learning_moves_part_way() {
        let x = [0.0, 1.0];
        let mut w = [1.0, 1.0];
        fuzzy_min_update(&x, &mut w, 0.25);
        assert!((w[0] - 0.75).abs() < 1e-12, "got {}", w[0]);
        assert_eq!(w[1], 1.0);
    }

    #[test]
    fn test_zero_rate_is_noop() {
        let x = [0.0, 0.0];
        let mut w = [0.4, 0.6];
        fuzzy_min_update(&x, &mut w, 0.0);
        assert_eq!(w, [0.4, 0.6]);
    }

    #[test]
    fn test_weights_never_increase() {
        let mut w = [0.3, 0.6, 0.7, 0.4];
        let inputs = [[0.9, 0.9, 0.1, 0.1], [0.1, 0.2, 0.9, 0.8], [0.5, 0.5, 0.5, 0.5]];
        for x in inputs.iter() {
            let before = w;
            fuzzy_min_update(x, &mut w, 0.5);
            for i in 0..4 {
                assert!(w[i] <= before[i], "weight {} grew: {} -> {}", i, before[i], w[i]);
            }
        }
    }
}
