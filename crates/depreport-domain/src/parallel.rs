use rayon::prelude::*;

/// Map `items` on a pool of at most `concurrency` threads, keeping input order.
pub(crate) fn ordered_map<T, R, F>(items: &[T], concurrency: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if concurrency <= 1 || items.len() <= 1 {
        return items.iter().map(f).collect();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .build()
    {
        Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        Err(err) => {
            tracing::warn!(error = %err, "thread pool unavailable, running sequentially");
            items.iter().map(f).collect()
        }
    }
}
