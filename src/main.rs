use std::hint::black_box;
use std::time::{Duration, Instant};

use kway_merge::{MergeConfig, Merger};
use rayon::slice::ParallelSliceMut;
use tracing_subscriber::EnvFilter;
use voracious_radix_sort::RadixSort;

/// Above this many runs the two-way fold baseline is quadratic enough to dominate the run.
const MAX_FOLD_RUNS: usize = 16;

fn sorted_runs(rng: &mut fastrand::Rng, k: usize, run_len: usize) -> Vec<Vec<u64>> {
    (0..k)
        .map(|_| {
            // Vary lengths a little so pair regions are not all aligned.
            let len = rng.usize(run_len / 2..=run_len);
            let mut run: Vec<u64> = (0..len).map(|_| rng.u64(..)).collect();
            run.sort_unstable();
            run
        })
        .collect()
}

fn two_way_fold(runs: &[Vec<u64>]) -> kway_merge::Result<Vec<u64>> {
    runs.iter().try_fold(Vec::new(), |acc, run| kway_merge::merge([&acc, run]))
}

fn benchmark(name: &str, repeats: usize, mut f: impl FnMut()) {
    // Warmup.
    for _ in 0..repeats {
        f();
    }
    let start = Instant::now();
    for _ in 0..repeats {
        f();
    }
    let duration = start.elapsed();
    println!("  {}: {}", name, human_time(repeats, duration));
}

fn human_time(repeats: usize, duration: Duration) -> String {
    let mut duration = duration.as_nanos() as f64 / repeats as f64;
    if duration < 1000.0 {
        return format!("{:.1}ns", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}us", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}ms", duration);
    }
    duration /= 1000.0;
    format!("{:.1}s", duration)
}

fn human_size(size: usize) -> String {
    if size < 1024 {
        return format!("{}B", size);
    }
    let mut size = size as f64;
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{:.1}KiB", size);
    }
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{:.1}MiB", size);
    }
    size /= 1024.0;
    format!("{:.1}GiB", size)
}

fn main() -> kway_merge::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
    let merger = Merger::new(MergeConfig::default())?;
    let mut rng = fastrand::Rng::with_seed(0);

    for lg_runs in [1, 4, 8] {
        for lg_run_len in [5, 10, 15] {
            let runs = sorted_runs(&mut rng, 1 << lg_runs, 1 << lg_run_len);
            let total: usize = runs.iter().map(Vec::len).sum();
            let repeats = 1usize << 24usize.saturating_sub(lg_runs + lg_run_len);
            println!(
                "runs: {}, total size: {}",
                runs.len(),
                human_size(std::mem::size_of::<u64>() * total)
            );

            let merged = merger.merge(&runs)?;
            assert_eq!(merged.len(), total);
            assert!(merged.is_sorted());

            benchmark("k-way merge", repeats, || {
                black_box(merger.merge(&runs).ok());
            });

            if runs.len() <= MAX_FOLD_RUNS {
                assert_eq!(two_way_fold(&runs)?, merged);
                benchmark("two-way fold", repeats, || {
                    black_box(two_way_fold(&runs).ok());
                });
            }

            benchmark("concat + par_sort", repeats, || {
                let mut all = runs.concat();
                all.par_sort();
                black_box(all);
            });

            benchmark("concat + voracious_mt_sort", repeats, || {
                let mut all = runs.concat();
                all.voracious_mt_sort(threads);
                black_box(all);
            });
        }
    }
    Ok(())
}
