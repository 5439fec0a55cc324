use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use dataloader::non_cached::Loader;
use dataloader::BatchFn;
use tokio::sync::Mutex;

use crate::ShareableError;

/// Request-scoped loader.
///
/// Loads issued in the same batch window go through [`Loader`] and reach the
/// batch function as a single call. Settled outcomes (including "not found",
/// which callers encode in `V`) are memoised for the lifetime of the loader,
/// so repeated loads of a key observe the first result. A failed batch is
/// delivered to every waiting caller and leaves nothing behind in the cache.
///
/// The batch size is unbounded: every key requested in one window goes out in
/// a single bulk call, however many there are.
pub struct CachedLoader<K, V, F>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    F: BatchFn<K, Result<V, ShareableError>>,
{
    loader: Loader<K, Result<V, ShareableError>, F>,
    settled: Mutex<HashMap<K, V>>,
}

impl<K, V, F> CachedLoader<K, V, F>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    F: BatchFn<K, Result<V, ShareableError>>,
{
    pub fn new(batch_fn: F) -> Self {
        Self {
            loader: Loader::new(batch_fn).with_max_batch_size(usize::MAX),
            settled: Mutex::new(HashMap::new()),
        }
    }

    pub async fn load(&self, key: K) -> Result<V, ShareableError> {
        if let Some(value) = self.settled.lock().await.get(&key) {
            return Ok(value.clone());
        }

        let value = self
            .loader
            .try_load(key.clone())
            .await
            .map_err(|e| ShareableError::from(anyhow::Error::from(e)))??;

        // 同じウィンドウ外で並行に解決された場合は先に確定した値を返す
        let mut settled = self.settled.lock().await;
        Ok(settled.entry(key).or_insert(value).clone())
    }

    #[cfg(test)]
    pub(crate) async fn is_settled(&self, key: &K) -> bool {
        self.settled.lock().await.contains_key(key)
    }
}

/// Spreads one bulk result over the requested keys. Keys missing from `found`
/// resolve to `missing()`; a failed fetch is cloned to every key.
pub fn distribute<K, V>(
    keys: &[K],
    found: Result<HashMap<K, V>, ShareableError>,
    missing: impl Fn() -> V,
) -> HashMap<K, Result<V, ShareableError>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    keys.iter()
        .map(|key| {
            (
                key.clone(),
                found
                    .as_ref()
                    .map(|found| found.get(key).cloned().unwrap_or_else(&missing))
                    .map_err(|e| e.clone()),
            )
        })
        .collect()
}
