//! Runtime: accelerator selection, queues, and kernel dispatch

pub mod accelerator;
pub mod launch;
pub mod queue;

use crate::index::{Extent, Index};
use crate::Result;
use std::cell::RefCell;
use std::sync::Arc;

pub use accelerator::{Accelerator, AcceleratorProperties, BackendKind};
pub use launch::{parallel_for_each, parallel_for_each_on, AmpKernel};
pub use queue::{CommandQueue, LaunchRecord};

// ── Lane execution context ────────────────────────────────────────

/// Execution context of the current kernel lane.
///
/// Each lane of a launch has its context installed thread-locally before
/// the kernel body runs, giving kernel helpers access to the lane index and
/// the launch extent without threading them through every call.
#[derive(Debug, Clone, Copy)]
pub struct LaneContext {
    /// Index of this lane within the launch extent.
    pub index: Index,
    /// Extent of the launch.
    pub extent: Extent,
    /// Worker thread the lane was scheduled on. Opaque scheduling detail,
    /// exposed for diagnostics only.
    pub worker: usize,
}

thread_local! {
    static LANE_CONTEXT: RefCell<Option<LaneContext>> = const { RefCell::new(None) };
}

/// Install `ctx` as the current thread's lane context.
pub fn set_lane_context(ctx: LaneContext) {
    LANE_CONTEXT.with(|c| {
        *c.borrow_mut() = Some(ctx);
    });
}

/// Clear the current thread's lane context.
pub fn clear_lane_context() {
    LANE_CONTEXT.with(|c| {
        *c.borrow_mut() = None;
    });
}

/// Run `f` with `ctx` installed, clearing the context afterwards.
pub fn with_lane_context<F, R>(ctx: LaneContext, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_lane_context(ctx);
    let result = f();
    clear_lane_context();
    result
}

/// Accessors for the current lane's context, usable inside kernel bodies.
///
/// Outside a launch the accessors return defaults: index zero and a
/// single-lane extent.
pub mod lane {
    use super::{Extent, Index, LANE_CONTEXT};

    /// Index of the current lane.
    pub fn index() -> Index {
        LANE_CONTEXT.with(|c| c.borrow().map(|ctx| ctx.index).unwrap_or_default())
    }

    /// Extent of the current launch.
    pub fn extent() -> Extent {
        LANE_CONTEXT.with(|c| {
            c.borrow()
                .map(|ctx| ctx.extent)
                .unwrap_or_else(|| Extent::new(1))
        })
    }

    /// Worker thread the current lane runs on.
    pub fn worker() -> usize {
        LANE_CONTEXT.with(|c| c.borrow().map(|ctx| ctx.worker).unwrap_or(0))
    }
}

// ── Main runtime context ──────────────────────────────────────────

/// Main runtime context: the default accelerator plus its default queue.
pub struct Runtime {
    accelerator: Arc<Accelerator>,
    default_queue: CommandQueue,
}

impl Runtime {
    /// Create a runtime on the default accelerator.
    pub fn new() -> Result<Self> {
        let accelerator = Accelerator::get_default()?;
        let default_queue = CommandQueue::new(accelerator.clone())?;
        Ok(Self {
            accelerator,
            default_queue,
        })
    }

    /// The accelerator this runtime targets.
    pub fn accelerator(&self) -> &Arc<Accelerator> {
        &self.accelerator
    }

    /// The default submission queue.
    pub fn default_queue(&self) -> &CommandQueue {
        &self.default_queue
    }

    /// Create an additional queue on this runtime's accelerator.
    pub fn create_queue(&self) -> Result<CommandQueue> {
        CommandQueue::new(self.accelerator.clone())
    }

    /// Block until every launch submitted through the default queue has
    /// completed.
    pub fn synchronize(&self) -> Result<()> {
        self.default_queue.synchronize()
    }
}
