//! Data-parallel kernel dispatch
//!
//! [`parallel_for_each`] is the single launch primitive: a blocking,
//! launch-and-wait map of a kernel over every lane of an extent. Lane
//! scheduling is opaque to the caller; no ordering between lanes is
//! guaranteed or observable, and the call returns only after every lane has
//! completed and its writes are visible to the host.

use crate::error::AmpError;
use crate::index::{Extent, Index};
use crate::Result;

use super::accelerator::BackendKind;
use super::queue::CommandQueue;
use super::{clear_lane_context, set_lane_context, Accelerator, LaneContext};

/// A function executable once per lane of a launch.
///
/// Implemented for any `Fn(Index) + Sync` closure, so kernels are usually
/// written inline, capturing views of the buffers they read and write.
pub trait AmpKernel: Sync {
    /// Execute the lane at `idx`.
    fn execute(&self, idx: Index);

    /// Kernel name for logging.
    fn name(&self) -> &str {
        "kernel"
    }
}

impl<F> AmpKernel for F
where
    F: Fn(Index) + Sync,
{
    fn execute(&self, idx: Index) {
        self(idx)
    }
}

/// Launch `kernel` over every lane of `extent` on the default accelerator.
///
/// Blocks until all lanes complete. Equivalent to creating a queue on the
/// default accelerator and calling [`parallel_for_each_on`].
pub fn parallel_for_each<K: AmpKernel>(extent: Extent, kernel: K) -> Result<()> {
    let accelerator = Accelerator::get_default()?;
    let queue = CommandQueue::new(accelerator)?;
    parallel_for_each_on(&queue, extent, kernel)
}

/// Launch `kernel` over every lane of `extent`, submitting through `queue`.
///
/// Blocks until all lanes complete; the launch has left the queue's
/// in-flight list and retired its lanes when this returns.
pub fn parallel_for_each_on<K: AmpKernel>(
    queue: &CommandQueue,
    extent: Extent,
    kernel: K,
) -> Result<()> {
    if extent.size() == 0 {
        return Err(AmpError::InvalidExtent(format!(
            "cannot launch over zero-sized extent {extent}"
        )));
    }

    let accelerator = queue.accelerator();
    log::debug!(
        "Launching '{}' over extent {} on '{}'",
        kernel.name(),
        extent,
        accelerator.properties().name
    );

    queue.begin_launch(kernel.name(), extent)?;
    run_lanes(&accelerator, extent, &kernel);
    queue.finish_launch()?;
    Ok(())
}

/// Fan the lane range out over worker threads and run every lane to
/// completion. Panics in kernel lanes propagate to the caller after all
/// workers have been joined.
fn run_lanes<K: AmpKernel>(accelerator: &Accelerator, extent: Extent, kernel: &K) {
    let total = extent.size();
    let workers = match accelerator.backend() {
        BackendKind::Sequential => 1,
        BackendKind::CpuThreads => accelerator.properties().worker_threads.min(total),
    };

    if workers <= 1 {
        run_lane_range(extent, 0, total, 0, kernel);
        return;
    }

    let chunk = total.div_ceil(workers);
    std::thread::scope(|scope| {
        for worker in 0..workers {
            let start = worker * chunk;
            let end = (start + chunk).min(total);
            if start >= end {
                break;
            }
            scope.spawn(move || {
                run_lane_range(extent, start, end, worker, kernel);
            });
        }
    });
}

/// Execute lanes `[start, end)` on the current thread, installing the lane
/// context before each kernel call.
fn run_lane_range<K: AmpKernel>(
    extent: Extent,
    start: usize,
    end: usize,
    worker: usize,
    kernel: &K,
) {
    for lane in start..end {
        let index = extent.index_of(lane);
        set_lane_context(LaneContext {
            index,
            extent,
            worker,
        });
        kernel.execute(index);
    }
    clear_lane_context();
}
