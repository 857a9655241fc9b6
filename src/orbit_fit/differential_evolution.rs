//! # Differential evolution
//!
//! A self-contained, bounded **best/1/bin differential-evolution** minimizer: the
//! population-based stochastic global search driving the orbit fit. It assumes
//! nothing about the objective beyond "bounded real vector in, finite scalar out" —
//! no gradients, no smoothness, no initial guess — which is what the orbit loss
//! landscape demands (periodic orientation angles and mirror symmetries make it
//! highly multi-modal).
//!
//! ## Algorithm
//!
//! Per generation, for every population member a **trial** vector is built:
//!
//! 1. *Mutation* — `best + F·(x_r1 − x_r2)` with `r1 ≠ r2 ≠ i` drawn at random and
//!    `F` dithered once per generation within the configured range,
//! 2. *Binomial crossover* — each component is taken from the mutant with
//!    probability CR, with one component forced from the mutant,
//! 3. *Clamping* — components are clamped back into the search box,
//! 4. *Greedy selection* — the trial replaces the member iff its loss is no worse.
//!
//! Convergence is declared when the population's loss spread collapses:
//! `std(losses) ≤ tol · |mean(losses)|`.
//!
//! ## Batch evaluation seam
//!
//! Each generation first materializes the *whole* trial population, then scores it
//! through the single `score_population` call. Objective evaluations are pure and
//! independent, so a parallel (batch or worker-pool) evaluator can replace that one
//! function without touching the search logic; the reference implementation scores
//! sequentially and is fully deterministic under a seeded RNG.

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, trace};

/// Search outcome of a [`DifferentialEvolution`] run.
///
/// Fields
/// ------
/// * `best_candidate`: the best parameter vector found.
/// * `best_loss`: its objective value.
/// * `generations`: number of generations actually run.
/// * `converged`: whether the population-spread test fired before the generation
///   budget ran out.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best_candidate: Vec<f64>,
    pub best_loss: f64,
    pub generations: usize,
    pub converged: bool,
}

/// Configuration of one differential-evolution search over a rectangular box.
///
/// Fields
/// ------
/// * `bounds`: per-dimension `(lower, upper)` intervals of the search box.
/// * `population_size`: number of candidate vectors kept alive (≥ 5).
/// * `max_generations`: generation budget.
/// * `mutation`: dithering interval for the mutation factor `F` (redrawn once per
///   generation, uniform in `[mutation.0, mutation.1)`).
/// * `crossover_probability`: binomial crossover probability CR in `[0, 1]`.
/// * `convergence_tol`: relative population-spread tolerance of the stop test.
#[derive(Debug, Clone)]
pub struct DifferentialEvolution<'a> {
    pub bounds: &'a [(f64, f64)],
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation: (f64, f64),
    pub crossover_probability: f64,
    pub convergence_tol: f64,
}

impl DifferentialEvolution<'_> {
    /// Minimize `objective` over the search box.
    ///
    /// Arguments
    /// ---------
    /// * `objective`: pure scalar loss over candidate vectors of `bounds.len()`
    ///   components.
    /// * `rng`: the random source; seeding it makes the whole search reproducible.
    ///
    /// Return
    /// ------
    /// * The [`SearchOutcome`] with the best vector found within the budget.
    pub fn minimize<F>(&self, objective: F, rng: &mut impl Rng) -> SearchOutcome
    where
        F: Fn(&[f64]) -> f64,
    {
        let dim = self.bounds.len();

        let mut population: Vec<Vec<f64>> = (0..self.population_size)
            .map(|_| {
                self.bounds
                    .iter()
                    .map(|&(lower, upper)| lower + rng.random::<f64>() * (upper - lower))
                    .collect()
            })
            .collect();
        let mut losses = score_population(&objective, &population);

        let mut best_index = lowest_loss_index(&losses);
        let mut generations = 0;
        let mut converged = false;

        for generation in 1..=self.max_generations {
            generations = generation;
            let factor = rng.random_range(self.mutation.0..self.mutation.1);

            // Build the whole trial population first, then score it in one batch.
            let trials: Vec<Vec<f64>> = (0..self.population_size)
                .map(|i| {
                    let (r1, r2) = self.distinct_donors(i, best_index, rng);
                    let forced = rng.random_range(0..dim);
                    let mut trial = population[i].clone();
                    for j in 0..dim {
                        if j == forced || rng.random::<f64>() < self.crossover_probability {
                            let mutant = population[best_index][j]
                                + factor * (population[r1][j] - population[r2][j]);
                            let (lower, upper) = self.bounds[j];
                            trial[j] = mutant.clamp(lower, upper);
                        }
                    }
                    trial
                })
                .collect();
            let trial_losses = score_population(&objective, &trials);

            for (i, (trial, trial_loss)) in trials.into_iter().zip(trial_losses).enumerate() {
                if trial_loss <= losses[i] {
                    population[i] = trial;
                    losses[i] = trial_loss;
                    if trial_loss < losses[best_index] {
                        best_index = i;
                    }
                }
            }

            trace!(
                generation,
                best_loss = losses[best_index],
                "differential evolution generation"
            );

            if self.has_converged(&losses) {
                converged = true;
                break;
            }
        }

        debug!(
            generations,
            converged,
            best_loss = losses[best_index],
            "differential evolution finished"
        );

        SearchOutcome {
            best_candidate: population[best_index].clone(),
            best_loss: losses[best_index],
            generations,
            converged,
        }
    }

    /// Draw two distinct donor indices, both different from `i` and from the
    /// current best.
    fn distinct_donors(&self, i: usize, best: usize, rng: &mut impl Rng) -> (usize, usize) {
        let mut r1 = rng.random_range(0..self.population_size);
        while r1 == i || r1 == best {
            r1 = rng.random_range(0..self.population_size);
        }
        let mut r2 = rng.random_range(0..self.population_size);
        while r2 == i || r2 == best || r2 == r1 {
            r2 = rng.random_range(0..self.population_size);
        }
        (r1, r2)
    }

    /// Population-spread stop test: `std(losses) ≤ tol · |mean(losses)|`.
    fn has_converged(&self, losses: &[f64]) -> bool {
        let n = losses.len() as f64;
        let mean = losses.iter().sum::<f64>() / n;
        let variance = losses.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt() <= self.convergence_tol * mean.abs()
    }
}

/// Score a whole candidate population.
///
/// This is the batch-evaluation seam: candidates are independent, so this is the
/// single place to substitute a parallel evaluator.
fn score_population<F>(objective: &F, population: &[Vec<f64>]) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    population
        .iter()
        .map(|candidate| objective(candidate))
        .collect()
}

fn lowest_loss_index(losses: &[f64]) -> usize {
    losses
        .iter()
        .position_min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}
