//! Command queue for launch submission and completion tracking
//!
//! The queue is the accelerator-view analog: every launch is submitted
//! through one, and the queue keeps each launch's identity — kernel name
//! and extent — while it is in flight, so diagnostics can say *what* is
//! outstanding, not merely how much. Finished launches retire their lane
//! count into a lifetime total. Lanes on the CPU backend execute
//! synchronously, so a launch finishes before the submitting call returns;
//! `synchronize` verifies the in-flight list has drained and names the
//! kernels that have not.

use crate::index::Extent;
use crate::{runtime_error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::Accelerator;

/// Identity of one submitted launch.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Kernel name, as reported by `AmpKernel::name`.
    pub kernel: String,
    /// Extent the launch covers.
    pub extent: Extent,
}

/// Ordered submission queue bound to one accelerator.
///
/// Launches enter through [`begin_launch`](Self::begin_launch) and leave
/// through [`finish_launch`](Self::finish_launch) in submission order.
/// The in-flight list is normally empty again before a launch call
/// returns; a non-empty list at synchronize time means a launch never
/// finished, and the error says which kernel it was.
pub struct CommandQueue {
    accelerator: Arc<Accelerator>,
    /// Launches submitted but not yet finished, oldest first.
    in_flight: Mutex<Vec<LaunchRecord>>,
    /// Total launches submitted over the queue's lifetime.
    launches_submitted: AtomicU64,
    /// Total kernel lanes retired by finished launches.
    lanes_retired: AtomicU64,
}

impl CommandQueue {
    /// Create a queue bound to `accelerator`.
    pub fn new(accelerator: Arc<Accelerator>) -> Result<Self> {
        Ok(Self {
            accelerator,
            in_flight: Mutex::new(Vec::new()),
            launches_submitted: AtomicU64::new(0),
            lanes_retired: AtomicU64::new(0),
        })
    }

    /// The accelerator this queue submits to.
    pub fn accelerator(&self) -> Arc<Accelerator> {
        self.accelerator.clone()
    }

    /// Record `kernel` entering the queue over `extent`.
    pub fn begin_launch(&self, kernel: &str, extent: Extent) -> Result<()> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|e| runtime_error!("Queue lock poisoned: {e}"))?;
        in_flight.push(LaunchRecord {
            kernel: kernel.to_string(),
            extent,
        });
        self.launches_submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Retire the oldest in-flight launch, crediting its lanes.
    ///
    /// Returns the retired launch's record. Errors if nothing is in flight.
    pub fn finish_launch(&self) -> Result<LaunchRecord> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|e| runtime_error!("Queue lock poisoned: {e}"))?;
        if in_flight.is_empty() {
            return Err(runtime_error!("finish_launch with no launch in flight"));
        }
        let record = in_flight.remove(0);
        self.lanes_retired
            .fetch_add(record.extent.size() as u64, Ordering::SeqCst);
        Ok(record)
    }

    /// Block until every in-flight launch has finished.
    ///
    /// Launches are synchronous on the CPU backend, so the list should
    /// already be empty; the spin guard catches a race on retirement and
    /// the timeout error names the kernels still outstanding.
    pub fn synchronize(&self) -> Result<()> {
        let mut spins = 0u32;
        loop {
            let stuck = self.pending_kernels()?;
            if stuck.is_empty() {
                return Ok(());
            }
            std::thread::yield_now();
            spins += 1;
            if spins > 10_000 {
                return Err(runtime_error!(
                    "Queue synchronize timed out; still in flight: {}",
                    stuck.join(", ")
                ));
            }
        }
    }

    /// Whether every submitted launch has finished.
    pub fn is_complete(&self) -> bool {
        self.pending_launches() == 0
    }

    /// Number of launches still in flight.
    pub fn pending_launches(&self) -> usize {
        // A poisoned lock still holds the list; report what it contains.
        match self.in_flight.lock() {
            Ok(in_flight) => in_flight.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Kernel names of the launches still in flight, oldest first.
    pub fn pending_kernels(&self) -> Result<Vec<String>> {
        let in_flight = self
            .in_flight
            .lock()
            .map_err(|e| runtime_error!("Queue lock poisoned: {e}"))?;
        Ok(in_flight.iter().map(|r| r.kernel.clone()).collect())
    }

    /// Total launches submitted over the queue's lifetime.
    pub fn launches_submitted(&self) -> u64 {
        self.launches_submitted.load(Ordering::SeqCst)
    }

    /// Total kernel lanes retired by finished launches.
    pub fn lanes_retired(&self) -> u64 {
        self.lanes_retired.load(Ordering::SeqCst)
    }
}
