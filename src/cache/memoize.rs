//! Memoizing Wrapper
//!
//! Wraps an async producer so repeated calls with the same key are served
//! from the shared cache until the entry expires.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::SharedCache;

/// Boxed future returned by a memoized producer.
pub type ProducerFuture<R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send>>;

type Producer<A, R, E> = dyn Fn(A) -> ProducerFuture<R, E> + Send + Sync;
type KeyFn<A> = dyn Fn(&A) -> String + Send + Sync;

// == Memoized ==
/// An async function whose successful results are cached for `ttl`.
///
/// There is no single-flight: two concurrent misses on the same key both
/// run the producer and the later write wins. Failures are never cached.
pub struct Memoized<A, R, E> {
    cache: SharedCache,
    producer: Arc<Producer<A, R, E>>,
    key_of: Arc<KeyFn<A>>,
    ttl: Duration,
}

impl<A, R, E> Memoized<A, R, E>
where
    A: Send + 'static,
    R: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    // == Constructor ==
    /// Wraps `producer`, keying each call with `key_of`.
    ///
    /// # Arguments
    /// * `cache` - Shared cache the results are stored in
    /// * `ttl` - Lifetime of every stored result
    /// * `key_of` - Maps call arguments to a cache key
    /// * `producer` - The expensive async lookup
    pub fn new<K, F, Fut>(cache: SharedCache, ttl: Duration, key_of: K, producer: F) -> Self
    where
        K: Fn(&A) -> String + Send + Sync + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        Self {
            cache,
            producer: Arc::new(move |args: A| -> ProducerFuture<R, E> {
                Box::pin(producer(args))
            }),
            key_of: Arc::new(key_of),
            ttl,
        }
    }

    /// Lifetime applied to stored results.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Call ==
    /// Returns the cached result for these arguments, or runs the producer
    /// and caches its success.
    pub async fn call(&self, args: A) -> Result<R, E> {
        let key = (self.key_of)(&args);

        // The lock guard is dropped before the producer is awaited
        let cached = self.cache.write().await.get::<R>(&key);
        if let Some(value) = cached {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        debug!(key = %key, "cache miss, running producer");
        let result = (self.producer)(args).await?;

        self.cache
            .write()
            .await
            .set(key, result.clone(), self.ttl);

        Ok(result)
    }
}

impl<A, R, E> Clone for Memoized<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            producer: Arc::clone(&self.producer),
            key_of: Arc::clone(&self.key_of),
            ttl: self.ttl,
        }
    }
}
