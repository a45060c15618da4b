//! Data splitting and hyper-parameter search.
//!
//! This module contains the seeded train/test split, contiguous k-fold
//! splits and an exhaustive grid search scored by cross-validated negative
//! mean squared error. Candidates are evaluated in parallel on the rayon
//! pool; each candidate re-fits the column encoder on its own training folds.
use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{GridPoint, ModelConfig, SearchGrid};
use crate::pipeline::StayPipeline;
use crate::record::StayDataset;
use crate::stats::mean_squared_error;

/// Shuffle `0..n_samples` with `seed` and split off `ceil(n * test_fraction)`
/// indices for testing. Returns `(train, test)`.
pub fn train_test_split(
    n_samples: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(anyhow!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        ));
    }
    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(anyhow!(
            "Cannot split {} samples with test_fraction {}",
            n_samples,
            test_fraction
        ));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// Contiguous, unshuffled k-fold splitter.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    pub n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// `(train, validation)` index pairs. The first `n_samples % n_splits`
    /// folds hold one extra sample.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(anyhow!("k-fold needs at least 2 splits, got {}", self.n_splits));
        }
        if self.n_splits > n_samples {
            return Err(anyhow!(
                "Cannot create {} folds from {} samples",
                self.n_splits,
                n_samples
            ));
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < extra);
            let stop = start + size;
            let validation: Vec<usize> = (start..stop).collect();
            let train: Vec<usize> = (0..start).chain(stop..n_samples).collect();
            folds.push((train, validation));
            start = stop;
        }
        Ok(folds)
    }
}

/// Cross-validated score of one grid point.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub params: GridPoint,
    /// Negative MSE per fold.
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
}

/// Outcome of a grid search: the refitted best pipeline and every score.
pub struct GridSearchResult {
    pub best_pipeline: StayPipeline,
    pub best_params: GridPoint,
    pub best_score: f64,
    pub candidates: Vec<CandidateScore>,
}

/// Exhaustive grid search with k-fold cross-validation.
#[derive(Debug, Clone)]
pub struct GridSearchCv {
    pub base: ModelConfig,
    pub grid: SearchGrid,
    pub cv: KFold,
}

impl GridSearchCv {
    pub fn new(base: ModelConfig, grid: SearchGrid, n_splits: usize) -> Self {
        Self {
            base,
            grid,
            cv: KFold::new(n_splits),
        }
    }

    /// Score every grid point, then refit the best one on all of `dataset`.
    pub fn fit(&self, dataset: &StayDataset) -> Result<GridSearchResult> {
        let points = self.grid.points();
        if points.is_empty() {
            return Err(anyhow!("Search grid has no candidates"));
        }
        let folds = self.cv.split(dataset.len())?;
        log::info!(
            "Fitting {} folds for each of {} candidates, totalling {} fits",
            folds.len(),
            points.len(),
            folds.len() * points.len()
        );

        let candidates: Vec<CandidateScore> = points
            .par_iter()
            .map(|params| self.score_candidate(params, dataset, &folds))
            .collect::<Result<Vec<_>>>()?;

        let best = best_candidate(&candidates)
            .ok_or_else(|| anyhow!("No candidate produced a finite score"))?;
        log::info!(
            "Best parameters: {} (mean score {:.4})",
            best.params,
            best.mean_score
        );

        let best_config = self.base.with_params(&best.params);
        let best_pipeline = StayPipeline::fit(dataset, &best_config)?;

        Ok(GridSearchResult {
            best_pipeline,
            best_params: best.params,
            best_score: best.mean_score,
            candidates,
        })
    }

    fn score_candidate(
        &self,
        params: &GridPoint,
        dataset: &StayDataset,
        folds: &[(Vec<usize>, Vec<usize>)],
    ) -> Result<CandidateScore> {
        let config = self.base.with_params(params);
        let mut fold_scores = Vec::with_capacity(folds.len());
        for (train_idx, valid_idx) in folds {
            let train = dataset.subset(train_idx);
            let valid = dataset.subset(valid_idx);
            let pipeline = StayPipeline::fit(&train, &config)?;
            let predictions = pipeline.predict(&valid.records)?;
            fold_scores.push(-mean_squared_error(&valid.length_of_stay, &predictions));
        }
        let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        log::debug!("[CV] {} score={:.4}", params, mean_score);
        Ok(CandidateScore {
            params: *params,
            fold_scores,
            mean_score,
        })
    }
}

/// Highest finite mean score; ties keep the earliest candidate.
fn best_candidate(candidates: &[CandidateScore]) -> Option<&CandidateScore> {
    let mut best: Option<&CandidateScore> = None;
    for candidate in candidates.iter().filter(|c| c.mean_score.is_finite()) {
        match best {
            Some(current) if candidate.mean_score <= current.mean_score => {}
            _ => best = Some(candidate),
        }
    }
    best
}
