//! Accelerator abstraction for the CPU lanes backend

use crate::{runtime_error, Result};
use std::sync::Arc;

/// Properties of an accelerator.
#[derive(Debug, Clone)]
pub struct AcceleratorProperties {
    /// Human-readable accelerator name.
    pub name: String,
    /// Worker threads available to a launch.
    pub worker_threads: usize,
    /// Whether this accelerator shares memory with the host. The CPU lanes
    /// backend always does, so views need no copy-in/copy-out step.
    pub unified_memory: bool,
}

/// Execution backend for kernel lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Lanes fan out over a pool of OS threads.
    CpuThreads,
    /// All lanes run on the calling thread, in lane order. Useful for
    /// debugging kernels under a deterministic schedule.
    Sequential,
}

/// An accelerator a launch can target.
///
/// Only the CPU lanes backend exists today; the abstraction keeps launch
/// code and tests independent of that fact.
pub struct Accelerator {
    backend: BackendKind,
    properties: AcceleratorProperties,
    id: usize,
}

impl Accelerator {
    /// Select the default accelerator.
    pub fn get_default() -> Result<Arc<Self>> {
        let backend = Self::detect_backend();
        let properties = Self::cpu_properties(backend);
        log::debug!(
            "Selected accelerator '{}' ({:?}, {} workers)",
            properties.name,
            backend,
            properties.worker_threads
        );
        Ok(Arc::new(Self {
            backend,
            properties,
            id: 0,
        }))
    }

    /// Get an accelerator by id. Only id 0 exists.
    pub fn get_by_id(id: usize) -> Result<Arc<Self>> {
        if id != 0 {
            return Err(runtime_error!("Accelerator {} not found", id));
        }
        Self::get_default()
    }

    /// Number of available accelerators.
    pub fn count() -> Result<usize> {
        Ok(1)
    }

    /// Accelerator properties.
    pub fn properties(&self) -> &AcceleratorProperties {
        &self.properties
    }

    /// Backend kind.
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Accelerator id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Pick the lanes backend. `AMP_SEQUENTIAL=1` forces the deterministic
    /// single-threaded schedule.
    fn detect_backend() -> BackendKind {
        match std::env::var("AMP_SEQUENTIAL") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => BackendKind::Sequential,
            _ => BackendKind::CpuThreads,
        }
    }

    fn cpu_properties(backend: BackendKind) -> AcceleratorProperties {
        let worker_threads = match backend {
            BackendKind::Sequential => 1,
            BackendKind::CpuThreads => num_cpus::get().max(1),
        };
        AcceleratorProperties {
            name: format!("CPU lanes ({worker_threads} workers)"),
            worker_threads,
            unified_memory: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accelerator() {
        let accel = Accelerator::get_default().unwrap();
        assert_eq!(accel.id(), 0);
        let props = accel.properties();
        assert!(!props.name.is_empty());
        assert!(props.worker_threads >= 1);
        assert!(props.unified_memory);
    }

    #[test]
    fn test_get_by_id_rejects_unknown() {
        assert!(Accelerator::get_by_id(0).is_ok());
        assert!(Accelerator::get_by_id(1).is_err());
    }

    #[test]
    fn test_count_is_one() {
        assert_eq!(Accelerator::count().unwrap(), 1);
    }

    #[test]
    fn test_sequential_properties_single_worker() {
        let props = Accelerator::cpu_properties(BackendKind::Sequential);
        assert_eq!(props.worker_threads, 1);
    }

    #[test]
    fn test_sequential_env_selects_backend_and_launches() {
        use crate::index::{Extent, Index};
        use crate::runtime::{parallel_for_each_on, CommandQueue};
        use std::sync::atomic::{AtomicUsize, Ordering};

        std::env::set_var("AMP_SEQUENTIAL", "1");
        let one = Accelerator::detect_backend();
        std::env::set_var("AMP_SEQUENTIAL", "true");
        let word = Accelerator::detect_backend();
        let accel = Accelerator::get_default().unwrap();
        std::env::remove_var("AMP_SEQUENTIAL");

        assert_eq!(one, BackendKind::Sequential);
        assert_eq!(word, BackendKind::Sequential);
        assert_eq!(accel.backend(), BackendKind::Sequential);
        assert_eq!(accel.properties().worker_threads, 1);
        assert_eq!(Accelerator::detect_backend(), BackendKind::CpuThreads);

        // A launch on the sequential backend still covers every lane.
        let queue = CommandQueue::new(accel).unwrap();
        let extent = Extent::new(333);
        let hits = AtomicUsize::new(0);
        parallel_for_each_on(&queue, extent, |_idx: Index| {
            hits.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 333);
        assert_eq!(queue.lanes_retired(), 333);
    }
}
