//! Prototype selection over a pairwise distance matrix.
//!
//! Given n elements with pairwise distances and k << n, find the k-element
//! subset that best represents the full set, where "best represents" means
//! maximizing the sum of pairwise distances inside the subset. The problem
//! is NP-hard, so alongside the exact exhaustive search (small instances
//! only) a constructive greedy heuristic is provided.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Dense symmetric distance matrix with string element ids
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    data: Vec<f64>,
    n: usize,
}

impl DistanceMatrix {
    /// Parse a tab-separated matrix: a header row of ids, then one row per
    /// element as `id\tv1\tv2...`. The matrix must be square.
    pub fn from_tsv(text: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().context("Distance matrix is empty")?;
        let ids: Vec<String> = header
            .split('\t')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .collect();
        let n = ids.len();
        if n == 0 {
            bail!("Distance matrix header has no ids");
        }

        let mut data = vec![0.0; n * n];
        let mut rows = 0;
        for (i, line) in lines.enumerate() {
            if i >= n {
                bail!("Distance matrix has more rows than header ids");
            }
            let mut fields = line.split('\t');
            let row_id = fields.next().unwrap_or("").trim();
            if row_id != ids[i] {
                bail!(
                    "Distance matrix row {} is labelled '{}', expected '{}'",
                    i,
                    row_id,
                    ids[i]
                );
            }
            let values: Vec<f64> = fields
                .map(|f| {
                    f.trim()
                        .parse::<f64>()
                        .with_context(|| format!("Bad distance value '{}' in row '{}'", f, row_id))
                })
                .collect::<Result<_>>()?;
            if values.len() != n {
                bail!(
                    "Distance matrix row '{}' has {} values, expected {}",
                    row_id,
                    values.len(),
                    n
                );
            }
            data[i * n..(i + 1) * n].copy_from_slice(&values);
            rows += 1;
        }
        if rows != n {
            bail!("Distance matrix has {} rows, expected {}", rows, n);
        }

        Ok(Self { ids, data, n })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read distance matrix {:?}", path))?;
        Self::from_tsv(&text)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }
}

/// Sum of pairwise distances among the given element indices
pub fn distance_sum(indices: &[usize], dm: &DistanceMatrix) -> f64 {
    let mut sum = 0.0;
    for (a, &i) in indices.iter().enumerate() {
        for &j in &indices[a + 1..] {
            sum += dm.get(i, j);
        }
    }
    sum
}

fn validate(dm: &DistanceMatrix, num_prototypes: usize) -> Result<()> {
    if num_prototypes < 2 {
        bail!("num_prototypes must be >= 2, since a single prototype is useless");
    }
    if num_prototypes >= dm.len() {
        bail!(
            "num_prototypes must be smaller than the number of elements \
             in the distance matrix, otherwise no reduction is necessary"
        );
    }
    Ok(())
}

/// Greedy constructive heuristic: seed with the globally most distant pair,
/// then repeatedly add the element with the largest distance sum to the
/// prototypes found so far.
pub fn select_maxdist(dm: &DistanceMatrix, num_prototypes: usize) -> Result<Vec<String>> {
    validate(dm, num_prototypes)?;
    let n = dm.len();

    let mut selected = vec![false; n];

    // seed: the pair with the globally maximal distance
    let (mut best_i, mut best_j, mut best_d) = (0, 1, f64::NEG_INFINITY);
    for i in 0..n {
        for j in (i + 1)..n {
            if dm.get(i, j) > best_d {
                best_d = dm.get(i, j);
                best_i = i;
                best_j = j;
            }
        }
    }
    selected[best_i] = true;
    selected[best_j] = true;
    let mut prototypes = vec![best_i, best_j];

    // score[c] = sum of distances from every chosen prototype to candidate c
    let mut score: Vec<f64> = (0..n).map(|c| dm.get(best_i, c) + dm.get(best_j, c)).collect();

    while prototypes.len() < num_prototypes {
        let mut next = None;
        let mut next_score = f64::NEG_INFINITY;
        for (c, &s) in score.iter().enumerate() {
            if !selected[c] && s > next_score {
                next_score = s;
                next = Some(c);
            }
        }
        let c = next.context("No candidate element left to select")?;
        selected[c] = true;
        prototypes.push(c);
        for (cand, s) in score.iter_mut().enumerate() {
            *s += dm.get(c, cand);
        }
    }

    prototypes.sort_unstable();
    Ok(prototypes.iter().map(|&i| dm.ids()[i].clone()).collect())
}

fn binomial(n: u64, k: u64) -> u128 {
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.saturating_mul((n - i) as u128) / (i as u128 + 1);
    }
    result
}

/// Exact exhaustive search: test every (n choose k) combination.
/// Refuses instances above `max_combinations` to keep runtime bounded.
pub fn select_exhaustive(
    dm: &DistanceMatrix,
    num_prototypes: usize,
    max_combinations: u128,
) -> Result<Vec<String>> {
    validate(dm, num_prototypes)?;
    let n = dm.len();

    let combos = binomial(n as u64, num_prototypes as u64);
    if combos >= max_combinations {
        bail!(
            "Refusing to test {} combinations; use the maxdist heuristic \
             for instances above {} combinations",
            combos,
            max_combinations
        );
    }

    let k = num_prototypes;
    let mut indices: Vec<usize> = (0..k).collect();
    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut more = true;

    while more {
        let d = distance_sum(&indices, dm);
        if best.as_ref().map_or(true, |(bd, _)| d > *bd) {
            best = Some((d, indices.clone()));
        }
        more = next_combination(&mut indices, n);
    }

    let (_, winner) = best.context("No combination was evaluated")?;
    Ok(winner.iter().map(|&i| dm.ids()[i].clone()).collect())
}

/// Advance to the next k-combination of 0..n; false when exhausted
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut pos = k;
    while pos > 0 {
        pos -= 1;
        if indices[pos] != pos + n - k {
            indices[pos] += 1;
            for later in (pos + 1)..k {
                indices[later] = indices[later - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Default combination cap for the exhaustive algorithm
pub const DEFAULT_MAX_COMBINATIONS: u128 = 200_000;
