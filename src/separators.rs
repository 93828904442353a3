/// Boundaries of the sorted runs currently laid out in the output buffer.
///
/// `bounds[i]..bounds[i + 1]` is always one sorted run. The first bound is `0` and the last is
/// the output length, so a list with `r` bounds describes `r - 1` runs. Empty runs are allowed
/// and show up as repeated bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Separators {
    bounds: Vec<usize>,
}

impl Separators {
    /// Builds the list from the start offset of every run plus the total length.
    pub(crate) fn from_bounds(bounds: Vec<usize>) -> Self {
        debug_assert!(bounds.len() >= 2);
        debug_assert_eq!(bounds[0], 0);
        debug_assert!(bounds.is_sorted());
        Self { bounds }
    }

    pub(crate) fn len(&self) -> usize {
        self.bounds.len()
    }

    pub(crate) fn run_count(&self) -> usize {
        self.bounds.len() - 1
    }

    pub(crate) fn is_single_run(&self) -> bool {
        self.bounds.len() <= 2
    }

    pub(crate) fn end(&self) -> usize {
        self.bounds[self.bounds.len() - 1]
    }

    /// Walks the non-overlapping `(left, middle, right)` triples of one pass. A trailing run
    /// without a partner is not part of any triple.
    pub(crate) fn triples(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.bounds
            .windows(3)
            .step_by(2)
            .map(|w| (w[0], w[1], w[2]))
    }

    /// Drops the middle bound of every triple yielded by [`Separators::triples`], which is what
    /// remains once those pairs of runs have been fused.
    pub(crate) fn fuse_pairs(&mut self) {
        let last = self.bounds.len() - 1;
        let mut index = 0;
        self.bounds.retain(|_| {
            let keep = index % 2 == 0 || index == last;
            index += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_skip_unpaired_tail() {
        // Three runs: the third has no partner this pass.
        let separators = Separators::from_bounds(vec![0, 3, 5, 9]);
        assert_eq!(separators.triples().collect::<Vec<_>>(), [(0, 3, 5)]);

        let separators = Separators::from_bounds(vec![0, 3, 5, 9, 12]);
        assert_eq!(separators.triples().collect::<Vec<_>>(), [(0, 3, 5), (5, 9, 12)]);

        let separators = Separators::from_bounds(vec![0, 4]);
        assert_eq!(separators.triples().count(), 0);
    }

    #[test]
    fn fuse_pairs_halves_run_count() {
        let mut separators = Separators::from_bounds(vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(separators.run_count(), 5);

        separators.fuse_pairs();
        assert_eq!(separators, Separators::from_bounds(vec![0, 4, 8, 10]));
        assert_eq!(separators.run_count(), 3);

        separators.fuse_pairs();
        assert_eq!(separators, Separators::from_bounds(vec![0, 8, 10]));

        separators.fuse_pairs();
        assert_eq!(separators, Separators::from_bounds(vec![0, 10]));
        assert!(separators.is_single_run());
        assert_eq!(separators.end(), 10);

        // Fusing a single run changes nothing.
        separators.fuse_pairs();
        assert_eq!(separators.len(), 2);
    }

    #[test]
    fn empty_runs_are_kept_as_repeated_bounds() {
        let mut separators = Separators::from_bounds(vec![0, 0, 3, 3]);
        assert_eq!(separators.triples().collect::<Vec<_>>(), [(0, 0, 3)]);
        separators.fuse_pairs();
        assert_eq!(separators, Separators::from_bounds(vec![0, 3, 3]));
    }
}
