use std::mem;

use tracing::debug;

use crate::separators::Separators;
use crate::tasks::Tasks;
use crate::two_way::merge_into;

/// Merges run `2i` with run `2i + 1` into consecutive regions of `output`, one task per pair.
///
/// `output` must already be exactly as long as all runs together. An unpaired last run is
/// copied into its region as is. Returns the start of every region plus `output.len()`.
///
/// Region offsets only depend on the lengths of earlier runs, so they are handed out while the
/// previous pairs are still merging. All tasks are joined before this returns.
pub(crate) fn first_round_merge<'a, T, I, F>(
    runs: I,
    output: &mut [T],
    tasks: Tasks<'_>,
    is_less: &F,
) -> Separators
where
    I: Iterator<Item = &'a [T]>,
    T: Clone + Send + Sync + 'a,
    F: Fn(&T, &T) -> bool + Sync,
{
    let mut runs = runs;
    let mut bounds = Vec::with_capacity(runs.size_hint().0.div_ceil(2) + 1);
    let total = output.len();

    tasks.scope(|scope| {
        let mut rest: &mut [T] = output;
        let mut offset = 0;
        while let Some(left) = runs.next() {
            let right = runs.next();
            let len = left.len() + right.map_or(0, <[T]>::len);
            let (region, tail) = mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            bounds.push(offset);
            offset += len;

            match right {
                Some(right) => tasks.spawn_or_run(scope, len, move || {
                    merge_into(left, right, region, is_less);
                }),
                None => tasks.spawn_or_run(scope, len, move || region.clone_from_slice(left)),
            }
        }
        debug_assert!(rest.is_empty());
    });

    bounds.push(total);
    let separators = Separators::from_bounds(bounds);
    debug!(
        runs = separators.run_count(),
        separators = separators.len(),
        elements = total,
        "first round merged"
    );
    separators
}
