//! Tensor generators and reference computations shared by tests and benches.

use proptest::prelude::*;
use rand::Rng;

use purify_core::{Shape, MAX_DIMENSIONS};

/// Dense tensor with one weight and one score per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub lengths: Vec<usize>,
    pub weights: Vec<f64>,
    pub scores: Vec<f64>,
}

impl Tensor {
    /// Uniformly random weights in `[0, 1)` and scores in `[-1, 1)`.
    pub fn random<R: Rng>(rng: &mut R, lengths: &[usize]) -> Self {
        let cells: usize = lengths.iter().product();
        Self {
            lengths: lengths.to_vec(),
            weights: (0..cells).map(|_| rng.gen::<f64>()).collect(),
            scores: (0..cells).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::new(&self.lengths).expect("fixture shapes are valid")
    }

    /// Lengths in the signed form the call boundary takes.
    pub fn signed_lengths(&self) -> Vec<i64> {
        self.lengths.iter().map(|&l| l as i64).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Largest absolute score, plus one.
    pub fn scale(&self) -> f64 {
        1.0 + self.scores.iter().fold(0.0f64, |acc, s| acc.max(s.abs()))
    }
}

/// `sum(w * v)`
pub fn weighted_sum(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

/// Weighted mean of every line, in slot order; zero for weightless lines.
pub fn line_means(shape: &Shape, weights: &[f64], values: &[f64]) -> Vec<f64> {
    shape
        .lines()
        .map(|(_, line)| {
            let (weighted, total) = line
                .cells()
                .fold((0.0, 0.0), |(s, t), c| (s + weights[c] * values[c], t + weights[c]));
            if total == 0.0 {
                0.0
            } else {
                weighted / total
            }
        })
        .collect()
}

/// `residual + intercept + every marginal broadcast back onto its cells`.
pub fn reconstruct(shape: &Shape, residual: &[f64], impurities: &[f64], intercept: f64) -> Vec<f64> {
    let mut coords = [0usize; MAX_DIMENSIONS];
    (0..shape.cell_count())
        .map(|cell| {
            let coords = shape.decode(cell, &mut coords).expect("cell in range");
            let marginals: f64 = (0..shape.rank())
                .map(|d| impurities[shape.surface_index(d, coords).expect("coords in range")])
                .sum();
            residual[cell] + intercept + marginals
        })
        .collect()
}

/// Small tensors of rank 1 to `max_rank`, some weights exactly zero.
pub fn tensor_strategy(max_rank: usize, max_len: usize) -> impl Strategy<Value = Tensor> {
    prop::collection::vec(1..=max_len, 1..=max_rank)
        .prop_flat_map(|lengths| {
            let cells = lengths.iter().product::<usize>();
            (
                Just(lengths),
                prop::collection::vec(prop_oneof![1 => Just(0.0), 4 => 0.5f64..4.0], cells),
                prop::collection::vec(-10.0f64..10.0, cells),
            )
        })
        .prop_map(|(lengths, weights, scores)| Tensor {
            lengths,
            weights,
            scores,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_broadcasts_marginals() {
        let shape = Shape::new(&[2, 2]).unwrap();
        let rebuilt = reconstruct(&shape, &[0.0; 4], &[-1.0, 1.0, -0.5, 0.5], 2.5);
        assert_eq!(rebuilt, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_line_means_skip_weightless_lines() {
        let shape = Shape::new(&[2, 2]).unwrap();
        let means = line_means(&shape, &[0.0, 0.0, 1.0, 3.0], &[5.0, 5.0, 1.0, 2.0]);
        assert_eq!(means, vec![0.0, 1.75, 1.0, 2.0]);
    }
}
