/// Wraps a computation in a cache lookup.
///
/// Returns the cached value when `$cache` has one for `$key`. Otherwise awaits
/// `$block`, stores the result when `$keep` accepts it, and returns it.
/// `$cache` must implement `DetailsCache`.
///
/// # Example
/// ```rust,ignore
/// let details = cached!(cache, CacheKey::Details(title.clone()), async move {
///     fetch_uncached(&title).await
/// }, |d: &MovieDetails| !d.is_placeholder());
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {
        $crate::cached!($cache, $key, $block, |_| true)
    };
    ($cache:expr, $key:expr, $block:expr, $keep:expr) => {{
        let key = $key;
        if let Some(hit) = $cache.get(&key).await {
            tracing::debug!(key = %key, backend = $cache.name(), "Cache hit");
            hit
        } else {
            let value = $block.await;
            if ($keep)(&value) {
                $cache.put(&key, &value).await;
            }
            value
        }
    }};
}
