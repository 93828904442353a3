use std::mem;

use tracing::trace;

use crate::separators::Separators;
use crate::tasks::Tasks;
use crate::two_way::merge_in_place;

/// Fuses the runs described by `separators` pairwise, in place, until a single run covers all
/// of `output`.
///
/// Each pass fuses every `(left, middle, right)` triple as an independent task and drops the
/// `middle` bounds once the pass has been joined. The next pass only starts after that join,
/// so no task ever sees a half-fused run. The loop ends on the list shrinking to two bounds
/// rather than on a precomputed pass count.
pub(crate) fn iterative_merge<T, F>(
    output: &mut [T],
    separators: &mut Separators,
    tasks: Tasks<'_>,
    is_less: &F,
) where
    T: Default + Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    debug_assert_eq!(separators.end(), output.len());

    let mut pass = 0;
    while !separators.is_single_run() {
        trace!(pass, runs = separators.run_count(), "in-place merge pass");

        tasks.scope(|scope| {
            let mut rest: &mut [T] = &mut *output;
            let mut consumed = 0;
            for (left, middle, right) in separators.triples() {
                debug_assert_eq!(left, consumed);
                let (region, tail) = mem::take(&mut rest).split_at_mut(right - left);
                rest = tail;
                consumed = right;
                tasks.spawn_or_run(scope, region.len(), move || {
                    merge_in_place(region, middle - left, is_less);
                });
            }
        });

        separators.fuse_pairs();
        pass += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn less(a: &i32, b: &i32) -> bool {
        a < b
    }

    #[test]
    fn fuses_down_to_one_run() {
        // Five runs: the unpaired tail waits a pass before it gets fused.
        let mut output = vec![4, 9, 1, 7, 0, 3, 2, 8, 5, 6];
        let mut separators = Separators::from_bounds(vec![0, 2, 4, 6, 8, 10]);
        for min_task_len in [0, usize::MAX] {
            let mut output = output.clone();
            let mut separators = separators.clone();
            iterative_merge(&mut output, &mut separators, Tasks::new(None, min_task_len), &less);
            assert_eq!(output, (0..10).collect::<Vec<_>>());
            assert_eq!(separators, Separators::from_bounds(vec![0, 10]));
        }

        iterative_merge(&mut output, &mut separators, Tasks::new(None, 0), &less);
        assert!(output.is_sorted());
    }

    #[test]
    fn single_run_is_left_alone() {
        let mut output = vec![1, 2, 3];
        let mut separators = Separators::from_bounds(vec![0, 3]);
        iterative_merge(&mut output, &mut separators, Tasks::new(None, 0), &less);
        assert_eq!(output, [1, 2, 3]);
        assert_eq!(separators.len(), 2);
    }

    #[test]
    fn empty_runs_between_real_ones() {
        let mut output = vec![5, 6, 1, 2, 3, 4];
        let mut separators = Separators::from_bounds(vec![0, 0, 2, 2, 2, 6, 6]);
        iterative_merge(&mut output, &mut separators, Tasks::new(None, 0), &less);
        assert_eq!(output, [1, 2, 3, 4, 5, 6]);
        assert!(separators.is_single_run());
    }
}
