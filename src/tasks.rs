use rayon::{Scope, ThreadPool};

/// Fork-join dispatch for one merge: which pool the tasks go to and how big a region must be
/// before it is worth a task of its own.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tasks<'p> {
    pool: Option<&'p ThreadPool>,
    min_task_len: usize,
}

impl<'p> Tasks<'p> {
    pub(crate) fn new(pool: Option<&'p ThreadPool>, min_task_len: usize) -> Self {
        Self { pool, min_task_len }
    }

    /// Runs `op` on the calling thread; everything it spawns has finished when this returns.
    pub(crate) fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&Scope<'scope>) -> R,
    {
        match self.pool {
            Some(pool) => pool.in_place_scope(op),
            None => rayon::in_place_scope(op),
        }
    }

    /// Spawns `body` into `scope`, or runs it right here when its region is small.
    pub(crate) fn spawn_or_run<'scope, BODY>(&self, scope: &Scope<'scope>, len: usize, body: BODY)
    where
        BODY: FnOnce() + Send + 'scope,
    {
        if len < self.min_task_len {
            body();
        } else {
            scope.spawn(move |_| body());
        }
    }
}
