//! Group-aware train/validation/test splitting.
//!
//! Splits are chosen at group granularity so that no recording contributes
//! windows to more than one partition, while the split *fractions* are
//! measured in examples. Whole groups are held out until the example target
//! is reached, so achieved fractions are approximate. That variance is
//! accepted behavior, not something to correct per-example.
//!
//! The test split is carved from the full dataset first, then the
//! validation split from the remaining pool, with one seeded RNG threaded
//! through both stages.
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

/// Three disjoint index sets over the dataset rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

impl SplitIndices {
    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

/// Partition `0..groups.len()` into train/validation/test by group id.
///
/// `test_frac` is measured against all examples, `val_frac` against the
/// pool remaining after the test split. Identical input and seed always
/// produce identical indices.
///
/// Fails with [`Error::Split`] when fewer than 3 unique groups exist or a
/// stage would leave an empty partition.
pub fn split_by_group(
    groups: &[String],
    test_frac: f64,
    val_frac: f64,
    seed: u64,
) -> Result<SplitIndices> {
    if groups.is_empty() {
        return Err(Error::Split("no examples to split".into()));
    }
    let unique = groups.iter().map(String::as_str).collect::<HashSet<_>>().len();
    if unique < 3 {
        return Err(Error::Split(format!(
            "{unique} unique groups; a three-way group split needs at least 3"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let all: Vec<usize> = (0..groups.len()).collect();

    let (test, pool) = hold_out_groups(groups, &all, test_frac, &mut rng)?;
    let (val, train) = hold_out_groups(groups, &pool, val_frac, &mut rng)?;

    if train.is_empty() {
        return Err(Error::Split("train split is empty".into()));
    }
    log::debug!(
        "group split: {} train / {} val / {} test examples",
        train.len(),
        val.len(),
        test.len(),
    );
    Ok(SplitIndices { train, val, test })
}

/// Hold out whole groups from `pool` until their example count reaches
/// `round(frac · pool.len())` (at least one group, never all of them).
/// Returns `(held, rest)`, both preserving pool order.
fn hold_out_groups(
    groups: &[String],
    pool: &[usize],
    frac: f64,
    rng: &mut ChaCha8Rng,
) -> Result<(Vec<usize>, Vec<usize>)> {
    // Unique ids in first-appearance order; shuffle order is then a pure
    // function of the RNG state, not of hashing.
    let mut ids: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &i in pool {
        let g = groups[i].as_str();
        if !counts.contains_key(g) {
            ids.push(g);
        }
        *counts.entry(g).or_insert(0) += 1;
    }
    if ids.len() < 2 {
        return Err(Error::Split(format!(
            "{} unique groups left in pool; cannot hold out a split",
            ids.len()
        )));
    }

    ids.shuffle(rng);

    let target = ((pool.len() as f64) * frac).round() as usize;
    let target = target.max(1);

    let mut held: HashSet<&str> = HashSet::new();
    let mut held_rows = 0usize;
    for &id in &ids {
        if held_rows >= target {
            break;
        }
        if held.len() + 1 == ids.len() {
            break; // leave at least one group in the pool
        }
        held.insert(id);
        held_rows += counts[id];
    }

    let (held_idx, rest_idx): (Vec<usize>, Vec<usize>) = pool
        .iter()
        .copied()
        .partition(|&i| held.contains(groups[i].as_str()));
    Ok((held_idx, rest_idx))
}
