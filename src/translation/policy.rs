//! Timeout and retry wrappers for fallible async operations.

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Fails with [`Error::Timeout`] unless `future` settles within `duration`.
///
/// The inner future is dropped on timeout, so its eventual result is lost.
pub async fn with_timeout<F, T>(future: F, duration: Duration) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| Error::Timeout(duration))?
}

/// Runs `operation` up to `times` attempts (at least one), one after another,
/// returning the first success or the last failure. No delay between attempts.
pub async fn retry<Op, Fut, T, E>(mut operation: Op, times: usize) -> std::result::Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= times => return Err(e),
            Err(_) => attempt += 1,
        }
    }
}
