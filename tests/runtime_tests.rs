//! Runtime system tests
//!
//! Exercises the runtime, accelerator, queue, and launch subsystems through
//! the public API.

use amp_rust::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_runtime_initialization() {
    let runtime = Runtime::new();
    assert!(runtime.is_ok(), "Runtime should initialize successfully");
}

#[test]
fn test_runtime_accelerator_access() {
    let runtime = Runtime::new().unwrap();
    let props = runtime.accelerator().properties();
    assert!(!props.name.is_empty(), "Accelerator should have a name");
    assert!(props.worker_threads >= 1);
    assert!(props.unified_memory);
}

#[test]
fn test_runtime_synchronize() {
    let runtime = Runtime::new().unwrap();
    assert!(runtime.synchronize().is_ok(), "Synchronize should succeed");
}

#[test]
fn test_accelerator_default_and_count() {
    let accel = Accelerator::get_default().unwrap();
    assert_eq!(accel.id(), 0, "Default accelerator should have id 0");
    assert!(Accelerator::count().unwrap() >= 1);
    assert!(Accelerator::get_by_id(5).is_err());
}

#[test]
fn test_queue_tracks_launches() {
    let runtime = Runtime::new().unwrap();
    let queue = runtime.create_queue().unwrap();

    let extent = Extent::new(512);
    let hits = AtomicUsize::new(0);
    parallel_for_each_on(&queue, extent, |_idx: Index| {
        hits.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();

    assert_eq!(hits.load(Ordering::Relaxed), 512);
    assert!(queue.is_complete());
    assert_eq!(queue.launches_submitted(), 1);
    assert_eq!(queue.lanes_retired(), 512);
    assert!(queue.pending_kernels().unwrap().is_empty());
    assert!(queue.synchronize().is_ok());
}

#[test]
fn test_launch_is_blocking() {
    // All device-side writes must be visible when the launch call returns.
    let extent = Extent::new(10_000);
    let mut out: Array<u64> = Array::new(extent).unwrap();
    {
        let view = out.view_mut();
        parallel_for_each(extent, |idx: Index| {
            // SAFETY: each lane writes only its own index.
            unsafe { view.set(idx, idx.x as u64 + 1) };
        })
        .unwrap();
    }
    let sum: u64 = out.as_slice().iter().sum();
    assert_eq!(sum, 10_000u64 * 10_001 / 2);
}

#[test]
fn test_launch_rejects_zero_extent() {
    let err = parallel_for_each(Extent::new(0), |_idx: Index| {}).unwrap_err();
    assert!(matches!(err, AmpError::InvalidExtent(_)));
}

#[test]
fn test_kernel_trait_object_style_kernel() {
    // Kernels can also be named types implementing AmpKernel directly.
    struct FillKernel<'a> {
        out: &'a ArrayViewMut<'a, f32>,
        value: f32,
    }

    impl AmpKernel for FillKernel<'_> {
        fn execute(&self, idx: Index) {
            // SAFETY: each lane writes only its own index.
            unsafe { self.out.set(idx, self.value) };
        }

        fn name(&self) -> &str {
            "fill"
        }
    }

    let extent = Extent::new(64);
    let mut out: Array<f32> = Array::new(extent).unwrap();
    {
        let view = out.view_mut();
        let kernel = FillKernel {
            out: &view,
            value: 2.5,
        };
        parallel_for_each(extent, kernel).unwrap();
    }
    assert!(out.as_slice().iter().all(|&v| v == 2.5));
}

#[test]
fn test_independent_launches_use_disjoint_buffers() {
    // Two sequential launches writing different buffers from the same input.
    let extent = Extent::new(256);
    let input: Vec<f32> = (0..256).map(|i| i as f32).collect();
    let source = Array::from_vec(extent, input.clone()).unwrap();

    let mut doubled: Array<f32> = Array::new(extent).unwrap();
    let mut squared: Array<f32> = Array::new(extent).unwrap();

    {
        let src = source.view();
        let dst = doubled.view_mut();
        parallel_for_each(extent, |idx: Index| {
            // SAFETY: each lane writes only its own index.
            unsafe { dst.set(idx, src.get(idx) * 2.0) };
        })
        .unwrap();
    }
    {
        let src = source.view();
        let dst = squared.view_mut();
        parallel_for_each(extent, |idx: Index| {
            let x = src.get(idx);
            // SAFETY: each lane writes only its own index.
            unsafe { dst.set(idx, x * x) };
        })
        .unwrap();
    }

    for i in 0..256 {
        assert_eq!(doubled.as_slice()[i], input[i] * 2.0);
        assert_eq!(squared.as_slice()[i], input[i] * input[i]);
    }
}
