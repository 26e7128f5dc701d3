//! Apply one transform request to many images.
//!
//! Every image is processed independently: a failure is recorded in that
//! image's slot and the rest of the batch carries on. Results always come
//! back in input order, whether or not the batch ran in parallel.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use tracing::warn;

use crate::decode::{decode_image, DecodeError, PixelBuffer};
use crate::encode::{encode_png, EncodeError};
use crate::transform::{apply, TransformError, TransformOutput, TransformParameters};

/// Per-image failure in a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The batch was cancelled before this image was started.
    #[error("Batch cancelled before this image was processed")]
    Cancelled,
}

/// How a batch is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Spread images across worker threads. Ignored without the `parallel`
    /// feature.
    pub parallel: bool,
    /// Upper bound on worker threads. `None` uses one per available core.
    pub max_threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_threads: None,
        }
    }
}

impl BatchOptions {
    /// Options for running a batch on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            max_threads: None,
        }
    }
}

/// Apply `params` to every image.
///
/// Returns one result per input, in input order.
pub fn apply_batch(
    images: &[PixelBuffer],
    params: &TransformParameters,
    options: &BatchOptions,
) -> Vec<Result<TransformOutput, BatchError>> {
    apply_batch_with_cancel(images, params, options, &AtomicBool::new(false))
}

/// Like [`apply_batch`], but checks `cancel` before starting each image.
///
/// Images not yet started when `cancel` is set report
/// [`BatchError::Cancelled`]; images already in progress finish normally.
pub fn apply_batch_with_cancel(
    images: &[PixelBuffer],
    params: &TransformParameters,
    options: &BatchOptions,
    cancel: &AtomicBool,
) -> Vec<Result<TransformOutput, BatchError>> {
    let results = run_batch(images.len(), options, cancel, |index| {
        apply(&images[index], params).map_err(BatchError::from)
    });
    log_summary("transform", &results);
    results
}

/// Decode each input, apply `params`, and encode the result as PNG.
///
/// For region-of-interest requests the scaled region is encoded.
pub fn process_encoded_batch<B>(
    inputs: &[B],
    params: &TransformParameters,
    options: &BatchOptions,
) -> Vec<Result<Vec<u8>, BatchError>>
where
    B: AsRef<[u8]> + Sync,
{
    let results = run_batch(inputs.len(), options, &AtomicBool::new(false), |index| {
        let image = decode_image(inputs[index].as_ref())?;
        let output = apply(&image, params)?;
        Ok(encode_png(output.image())?)
    });
    log_summary("encoded", &results);
    results
}

fn run_batch<T, F>(
    count: usize,
    options: &BatchOptions,
    cancel: &AtomicBool,
    process: F,
) -> Vec<Result<T, BatchError>>
where
    T: Send,
    F: Fn(usize) -> Result<T, BatchError> + Sync,
{
    let task = |index: usize| {
        if cancel.load(Ordering::Relaxed) {
            return Err(BatchError::Cancelled);
        }
        process(index)
    };

    #[cfg(feature = "parallel")]
    if options.parallel && count > 1 {
        return run_parallel(count, options.max_threads, &task);
    }

    debug!(count, parallel = options.parallel, "running batch sequentially");
    (0..count).map(task).collect()
}

#[cfg(feature = "parallel")]
fn run_parallel<T, F>(count: usize, max_threads: Option<usize>, task: &F) -> Vec<Result<T, BatchError>>
where
    T: Send,
    F: Fn(usize) -> Result<T, BatchError> + Sync,
{
    let run = || (0..count).into_par_iter().map(task).collect::<Vec<_>>();

    match max_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                debug!(count, threads, "running batch on dedicated pool");
                pool.install(run)
            }
            Err(err) => {
                warn!(threads, error = %err, "failed to build batch thread pool, using global pool");
                run()
            }
        },
        None => {
            debug!(count, "running batch on global pool");
            run()
        }
    }
}

fn log_summary<T>(kind: &str, results: &[Result<T, BatchError>]) {
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let cancelled = results
        .iter()
        .filter(|r| matches!(r, Err(BatchError::Cancelled)))
        .count();
    info!(
        kind,
        total = results.len(),
        succeeded,
        failed = results.len() - succeeded - cancelled,
        cancelled,
        "batch finished"
    );
}
