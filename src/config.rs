/// Regions smaller than this are merged on the orchestrating thread rather than spawned.
pub const DEFAULT_MIN_TASK_LEN: usize = 4096;

/// Tuning knobs for a [`Merger`](crate::Merger). None of them affect the merged output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool.
    pub num_threads: Option<usize>,
    /// Output regions shorter than this are merged inline instead of becoming a task.
    pub min_task_len: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_task_len: DEFAULT_MIN_TASK_LEN,
        }
    }
}

impl MergeConfig {
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn min_task_len(mut self, min_task_len: usize) -> Self {
        self.min_task_len = min_task_len;
        self
    }
}
