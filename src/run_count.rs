/// Number of runs yielded by `runs`.
///
/// Iterators over sized containers (`Vec`, `VecDeque`, `LinkedList`, slices) report an exact
/// `size_hint`, which is answered in O(1). Anything else (filters, chained adaptors, ...) is
/// counted by walking a clone, O(k). The iterator itself is not advanced.
pub fn run_count<I>(runs: &I) -> usize
where
    I: Iterator + Clone,
{
    match runs.size_hint() {
        (lower, Some(upper)) if lower == upper => lower,
        _ => runs.clone().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::LinkedList;

    #[test]
    fn exact_size_iterators() {
        let runs = vec![vec![1], vec![2, 3], vec![]];
        assert_eq!(run_count(&runs.iter()), 3);

        let list: LinkedList<Vec<i32>> = runs.iter().cloned().collect();
        assert_eq!(run_count(&list.iter()), 3);

        let empty: Vec<Vec<i32>> = Vec::new();
        assert_eq!(run_count(&empty.iter()), 0);
    }

    #[test]
    fn inexact_iterators_are_traversed() {
        let runs = vec![vec![1], vec![], vec![2, 3], vec![], vec![4]];
        let non_empty = runs.iter().filter(|run| !run.is_empty());
        assert_ne!(non_empty.size_hint().1, Some(non_empty.size_hint().0));
        assert_eq!(run_count(&non_empty), 3);
        // The probe works on a clone, so the original is still whole.
        assert_eq!(non_empty.count(), 3);
    }
}
