use std::cmp::Ordering;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::first_round::first_round_merge;
use crate::iterative::iterative_merge;
use crate::run_count::run_count;
use crate::tasks::Tasks;
use crate::two_way::merge_into;

/// Stable k-way merge of sorted runs, using `Ord`.
///
/// Every run must already be sorted. Equal elements keep their order within a run, and
/// across runs the element from the earlier run comes first. Runs on rayon's global pool.
///
/// ```
/// let runs = vec![vec![1, 3, 5], vec![], vec![2, 4]];
/// assert_eq!(kway_merge::merge(&runs).unwrap(), [1, 2, 3, 4, 5]);
/// ```
pub fn merge<'a, C, S, T>(runs: C) -> Result<Vec<T>>
where
    C: IntoIterator<Item = &'a S>,
    C::IntoIter: Clone,
    S: AsRef<[T]> + ?Sized + 'a,
    T: Ord + Clone + Default + Send + Sync + 'a,
{
    Merger::default().merge(runs)
}

/// Like [`merge`], ordering elements with `compare`.
///
/// ```
/// let runs = [vec![1.0, 3.0], vec![2.0, 2.0, 4.0], vec![0.5]];
/// let merged = kway_merge::merge_by(&runs, f64::total_cmp).unwrap();
/// assert_eq!(merged, [0.5, 1.0, 2.0, 2.0, 3.0, 4.0]);
/// ```
pub fn merge_by<'a, C, S, T, F>(runs: C, compare: F) -> Result<Vec<T>>
where
    C: IntoIterator<Item = &'a S>,
    C::IntoIter: Clone,
    S: AsRef<[T]> + ?Sized + 'a,
    T: Clone + Default + Send + Sync + 'a,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    Merger::default().merge_by(runs, compare)
}

/// Like [`merge`], ordering elements by the key `f` extracts.
pub fn merge_by_key<'a, C, S, T, K, F>(runs: C, f: F) -> Result<Vec<T>>
where
    C: IntoIterator<Item = &'a S>,
    C::IntoIter: Clone,
    S: AsRef<[T]> + ?Sized + 'a,
    T: Clone + Default + Send + Sync + 'a,
    K: Ord,
    F: Fn(&T) -> K + Sync,
{
    Merger::default().merge_by_key(runs, f)
}

/// A configured merge engine, optionally owning its own worker pool.
///
/// The result never depends on the configuration; only the speed does.
#[derive(Debug, Default)]
pub struct Merger {
    config: MergeConfig,
    pool: Option<ThreadPool>,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Result<Self> {
        let pool = match config.num_threads {
            Some(num_threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("kway-merge-{i}"))
                    .build()?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn merge<'a, C, S, T>(&self, runs: C) -> Result<Vec<T>>
    where
        C: IntoIterator<Item = &'a S>,
        C::IntoIter: Clone,
        S: AsRef<[T]> + ?Sized + 'a,
        T: Ord + Clone + Default + Send + Sync + 'a,
    {
        self.merge_runs(runs.into_iter().map(<S as AsRef<[T]>>::as_ref), &T::lt)
    }

    pub fn merge_by<'a, C, S, T, F>(&self, runs: C, compare: F) -> Result<Vec<T>>
    where
        C: IntoIterator<Item = &'a S>,
        C::IntoIter: Clone,
        S: AsRef<[T]> + ?Sized + 'a,
        T: Clone + Default + Send + Sync + 'a,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let is_less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
        self.merge_runs(runs.into_iter().map(<S as AsRef<[T]>>::as_ref), &is_less)
    }

    pub fn merge_by_key<'a, C, S, T, K, F>(&self, runs: C, f: F) -> Result<Vec<T>>
    where
        C: IntoIterator<Item = &'a S>,
        C::IntoIter: Clone,
        S: AsRef<[T]> + ?Sized + 'a,
        T: Clone + Default + Send + Sync + 'a,
        K: Ord,
        F: Fn(&T) -> K + Sync,
    {
        let is_less = |a: &T, b: &T| f(a) < f(b);
        self.merge_runs(runs.into_iter().map(<S as AsRef<[T]>>::as_ref), &is_less)
    }

    fn merge_runs<'a, I, T, F>(&self, runs: I, is_less: &F) -> Result<Vec<T>>
    where
        I: Iterator<Item = &'a [T]> + Clone,
        T: Clone + Default + Send + Sync + 'a,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let k = run_count(&runs);
        let total = runs
            .clone()
            .try_fold(0usize, |acc, run| acc.checked_add(run.len()))
            .ok_or(MergeError::LengthOverflow)?;

        let mut output = Vec::new();
        output.try_reserve_exact(total)?;
        output.resize_with(total, T::default);
        debug!(runs = k, elements = total, "k-way merge");

        let mut runs = runs;
        match k {
            0 => {}
            1 => {
                if let Some(run) = runs.next() {
                    output.clone_from_slice(run);
                }
            }
            2 => {
                if let (Some(left), Some(right)) = (runs.next(), runs.next()) {
                    merge_into(left, right, &mut output, is_less);
                }
            }
            _ => {
                let tasks = Tasks::new(self.pool.as_ref(), self.config.min_task_len);
                let mut separators = first_round_merge(runs, &mut output, tasks, is_less);
                iterative_merge(&mut output, &mut separators, tasks, is_less);
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_run_counts() {
        let none: Vec<Vec<i32>> = Vec::new();
        assert!(merge(&none).unwrap().is_empty());

        let one = vec![vec![1, 1, 2]];
        assert_eq!(merge(&one).unwrap(), [1, 1, 2]);

        let two = vec![vec![1, 4], vec![2, 3]];
        assert_eq!(merge(&two).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn three_runs_of_floats() {
        let runs = [vec![1.0, 3.0], vec![2.0, 2.0, 4.0], vec![0.5]];
        let merged = merge_by(&runs, f64::total_cmp).unwrap();
        assert_eq!(merged, [0.5, 1.0, 2.0, 2.0, 3.0, 4.0]);
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn descending_comparator() {
        let runs = vec![vec![9, 5, 1], vec![8, 2], vec![7, 6, 0]];
        let merged = merge_by(&runs, |a: &i32, b: &i32| b.cmp(a)).unwrap();
        assert_eq!(merged, [9, 8, 7, 6, 5, 2, 1, 0]);
    }

    #[test]
    fn by_key_is_stable() {
        let runs = vec![
            vec![(1, 'a'), (2, 'b')],
            vec![(1, 'c'), (2, 'd')],
            vec![(1, 'e')],
        ];
        let merged = merge_by_key(&runs, |x: &(i32, char)| x.0).unwrap();
        assert_eq!(merged, [(1, 'a'), (1, 'c'), (1, 'e'), (2, 'b'), (2, 'd')]);
    }

    #[test]
    fn dedicated_pool() {
        let merger = Merger::new(MergeConfig::default().num_threads(2).min_task_len(0)).unwrap();
        assert_eq!(merger.config().num_threads, Some(2));
        let runs = vec![vec![3, 6], vec![1, 4], vec![2, 5], vec![0]];
        assert_eq!(merger.merge(&runs).unwrap(), [0, 1, 2, 3, 4, 5, 6]);
    }
}
