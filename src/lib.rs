//! Stable, parallel k-way merge of sorted runs.
//!
//! The merge happens in two rounds. The first merges run `2i` with run `2i + 1` straight into
//! consecutive regions of the output, one task per pair. The second repeatedly fuses adjacent
//! regions in place, halving their number each pass, until one sorted region remains. Tasks run
//! on a rayon pool and every task owns a disjoint slice of the output.
//!
//! 0, 1 and 2 runs are handled directly without spawning anything.

mod config;
mod error;
mod first_round;
mod iterative;
mod merge;
mod run_count;
mod separators;
mod tasks;
mod two_way;

pub use config::{DEFAULT_MIN_TASK_LEN, MergeConfig};
pub use error::{MergeError, Result};
pub use merge::{Merger, merge, merge_by, merge_by_key};
pub use run_count::run_count;
