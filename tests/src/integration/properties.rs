//! # Invariants
//!
//! Properties that hold for every tensor, checked with proptest over small
//! random shapes with a mix of zero and positive weights.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use purify_core::{
        purify, purify_with, BufferKind, Convergence, EngineLimits, NoOpDiagnostics, PurifyArgs,
        PurifyError, StopReason,
    };

    use crate::fixtures::{line_means, reconstruct, tensor_strategy, weighted_sum, Tensor};

    const PASS_CAP: usize = 5_000;

    struct Purified {
        convergence: Convergence,
        residual: Vec<f64>,
        impurities: Vec<f64>,
        intercept: f64,
    }

    fn purify_copy(tensor: &Tensor, tolerance: f64) -> Purified {
        let lengths = tensor.signed_lengths();
        let mut residual = tensor.scores.clone();
        let mut impurities = vec![0.0; tensor.shape().line_count()];
        let mut intercept = 0.0;
        let args = PurifyArgs::new(tolerance, &lengths, &tensor.weights, &mut residual, &mut impurities)
            .with_intercept(&mut intercept);
        let limits = EngineLimits {
            max_passes: Some(PASS_CAP),
        };
        let outcome = purify_with(args, limits, &NoOpDiagnostics).unwrap();
        let convergence = *outcome.convergence().unwrap();
        Purified {
            convergence,
            residual,
            impurities,
            intercept,
        }
    }

    fn tolerance_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), 0.0f64..0.2]
    }

    proptest! {
        #[test]
        fn intercept_is_global_weighted_mean(tensor in tensor_strategy(3, 4), tolerance in tolerance_strategy()) {
            let purified = purify_copy(&tensor, tolerance);
            let total = tensor.total_weight();

            if total == 0.0 {
                prop_assert_eq!(purified.convergence.stop, StopReason::ZeroWeight);
                prop_assert_eq!(&purified.residual, &tensor.scores);
            } else {
                let mean = weighted_sum(&tensor.weights, &tensor.scores) / total;
                prop_assert!((purified.intercept - mean).abs() <= 1e-12 * tensor.scale());
            }
        }

        #[test]
        fn residual_has_zero_weighted_total(tensor in tensor_strategy(3, 4), tolerance in tolerance_strategy()) {
            let purified = purify_copy(&tensor, tolerance);
            prop_assume!(purified.convergence.stop != StopReason::ZeroWeight);

            let mass: f64 = tensor
                .weights
                .iter()
                .zip(&tensor.scores)
                .map(|(w, s)| (w * s).abs())
                .sum();
            let residual_total = weighted_sum(&tensor.weights, &purified.residual);
            prop_assert!(residual_total.abs() <= 1e-9 * (1.0 + mass), "{}", residual_total);
        }

        #[test]
        fn decomposition_reconstructs_input(tensor in tensor_strategy(3, 4), tolerance in tolerance_strategy()) {
            let purified = purify_copy(&tensor, tolerance);
            let rebuilt = reconstruct(&tensor.shape(), &purified.residual, &purified.impurities, purified.intercept);

            for (r, s) in rebuilt.iter().zip(&tensor.scores) {
                prop_assert!((r - s).abs() <= 1e-9 * tensor.scale(), "{} != {}", r, s);
            }
        }

        #[test]
        fn converged_lines_are_within_threshold(tensor in tensor_strategy(3, 4), tolerance in tolerance_strategy()) {
            let purified = purify_copy(&tensor, tolerance);
            let shape = tensor.shape();
            let bound = shape.rank() as f64 * purified.convergence.threshold + 1e-9 * tensor.scale();

            if purified.convergence.stop == StopReason::Converged {
                for mean in line_means(&shape, &tensor.weights, &purified.residual) {
                    prop_assert!(mean.abs() <= bound, "{} > {}", mean, bound);
                }
            }
        }

        #[test]
        fn second_purification_finds_no_intercept(tensor in tensor_strategy(3, 4), tolerance in tolerance_strategy()) {
            let first = purify_copy(&tensor, tolerance);
            prop_assume!(first.convergence.stop != StopReason::ZeroWeight);

            let again = Tensor {
                scores: first.residual.clone(),
                ..tensor.clone()
            };
            let second = purify_copy(&again, tolerance);
            prop_assert!(second.intercept.abs() <= 1e-9 * tensor.scale());

            if tolerance == 0.0 && first.convergence.stop == StopReason::Converged {
                for impurity in &second.impurities {
                    prop_assert!(impurity.abs() <= 1e-9 * tensor.scale());
                }
            }
        }

        #[test]
        fn rejection_leaves_buffers_untouched(tensor in tensor_strategy(3, 4), short in 0usize..3) {
            let shape = tensor.shape();
            let lengths = tensor.signed_lengths();
            let cells = shape.cell_count();
            let lines = shape.line_count();

            let weights = &tensor.weights[..if short == 0 { cells - 1 } else { cells }];
            let mut scores = tensor.scores[..if short == 1 { cells - 1 } else { cells }].to_vec();
            let mut impurities = vec![7.0; if short == 2 { lines - 1 } else { lines }];
            let mut intercept = 42.0;

            let args = PurifyArgs::new(0.0, &lengths, weights, &mut scores, &mut impurities)
                .with_intercept(&mut intercept);
            let result = purify(args);

            let buffer = [BufferKind::Weights, BufferKind::Scores, BufferKind::Impurities][short];
            let is_expected = matches!(result, Err(PurifyError::BufferTooSmall { buffer: b, .. }) if b == buffer);
            prop_assert!(is_expected, "{:?}", result);
            prop_assert_eq!(intercept, 0.0);
            prop_assert_eq!(&scores[..], &tensor.scores[..scores.len()]);
            prop_assert!(impurities.iter().all(|&v| v == 7.0));
        }
    }
}
