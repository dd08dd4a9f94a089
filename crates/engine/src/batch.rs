//! Batch executor.
//!
//! Applies an async operation to every item of a sequence, at most
//! `batch_size` items at a time:
//! 1. Items are split into consecutive chunks of `batch_size`.
//! 2. Chunks run one after another, in input order.
//! 3. Within a chunk all operations are created in input order and driven
//!    concurrently on the calling task (no spawning).
//! 4. Results are placed by input index, so completion order never leaks
//!    into the output.
//! 5. The first failing item fails the whole call with its own error.  Its
//!    in-flight siblings are allowed to finish (their results are dropped)
//!    and no later chunk is started.

use std::fmt::Display;
use std::future::Future;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::BatchConfig;

/// Run `op` over `items` in chunks and return the results in input order.
///
/// A failure is only returned once every item already started in the same
/// chunk has finished, so the call takes at least as long as the slowest
/// sibling of the failing item.  A sibling that never completes keeps the
/// error from ever reaching the caller.
///
/// # Errors
/// The error of the first item to fail, unchanged.
pub async fn run_batched<I, R, E, F, Fut>(
    items: I,
    config: &BatchConfig,
    mut op: F,
) -> Result<Vec<R>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let batch_size = config.batch_size();
    let items: Vec<I::Item> = items.into_iter().collect();
    let total = items.len();
    let mut results: Vec<R> = Vec::with_capacity(total);

    let mut pending = items.into_iter().enumerate();
    let mut chunk_no = 0usize;

    loop {
        let chunk: Vec<(usize, I::Item)> = pending.by_ref().take(batch_size).collect();
        if chunk.is_empty() {
            break;
        }

        let offset = chunk_no * batch_size;
        let chunk_len = chunk.len();
        debug!(
            "starting batch chunk {} (items {}..{} of {})",
            chunk_no,
            offset,
            offset + chunk_len,
            total
        );

        let mut in_flight: FuturesUnordered<_> = chunk
            .into_iter()
            .map(|(index, item)| {
                let fut = op(item);
                async move { (index, fut.await) }
            })
            .collect();

        let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(chunk_len).collect();
        let mut failure: Option<E> = None;

        while let Some((index, outcome)) = in_flight.next().await {
            match outcome {
                Ok(value) => {
                    if let Some(slot) = slots.get_mut(index - offset) {
                        *slot = Some(value);
                    }
                }
                Err(err) if failure.is_none() => {
                    warn!(
                        "batch item {} failed, aborting batch after in-flight items finish: {}",
                        index, err
                    );
                    failure = Some(err);
                }
                Err(err) => {
                    warn!("batch item {} also failed, result discarded: {}", index, err);
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        results.extend(slots.into_iter().flatten());
        chunk_no += 1;
    }

    debug_assert_eq!(results.len(), total);
    Ok(results)
}
