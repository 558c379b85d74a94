use std::future::Future;
use std::pin::Pin;
use log::{debug, warn};
use crate::error::Result;

/// A deferred, fallible strategy; nothing runs until it is awaited
pub type Attempt<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Boxes a future as an [`Attempt`]
pub fn attempt<'a, T, F>(future: F) -> Attempt<'a, T>
where
    F: Future<Output = Result<T>> + Send + 'a,
{
    Box::pin(future)
}

/// Awaits each attempt in order and returns the first `Ok` value
///
/// Later attempts are never polled once one succeeds. Returns `None`
/// when every attempt fails; callers pick their own default. Transient
/// failures are logged at debug, anything else at warn.
pub async fn first_success<'a, T, I>(label: &str, attempts: I) -> Option<T>
where
    I: IntoIterator<Item = Attempt<'a, T>>,
{
    for (index, attempt) in attempts.into_iter().enumerate() {
        match attempt.await {
            Ok(value) => return Some(value),
            Err(e) if e.is_transient() => debug!("{}: strategy {} failed: {}", label, index + 1, e),
            Err(e) => warn!("{}: strategy {} failed: {}", label, index + 1, e),
        }
    }
    None
}
