//! Accelerator/host parity harness for element-wise math routines
//!
//! The harness runs one math routine twice over the same input: once as a
//! data-parallel launch writing through a view, once as a sequential host
//! loop. It then accumulates the element-wise magnitude gap
//! `| |device[i]| - |host[i]| |` and passes iff the sum stays within the
//! configured tolerance. Wrapping each operand in `fabs` before differencing
//! means a sign disagreement between the two paths is tolerated; only
//! magnitudes must match.
//!
//! The tolerance is a harness parameter, not a precision guarantee. The
//! historical default is 0.1 summed over 1000 samples (about 1e-4 per
//! element on average).

use crate::array::Array;
use crate::fast_math;
use crate::index::{Extent, Index};
use crate::runtime::parallel_for_each;
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound (exclusive) of the raw sample range, a 15-bit generator
/// range divided by 1000: inputs fall in `[0, 32.768)`.
const SAMPLE_RANGE: u32 = 32_768;

/// Harness parameters.
#[derive(Debug, Clone)]
pub struct ParityConfig {
    /// Number of input samples.
    pub samples: usize,
    /// Maximum allowed sum of magnitude gaps across all samples.
    pub tolerance: f32,
    /// Seed for the input generator. `None` draws fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            tolerance: 0.1,
            seed: None,
        }
    }
}

/// Outcome of one harness run.
#[derive(Debug, Clone)]
pub struct ParityReport {
    /// Number of samples compared.
    pub samples: usize,
    /// Tolerance the run was judged against.
    pub tolerance: f32,
    /// Sum of per-element magnitude gaps.
    pub sum_abs_diff: f32,
    /// Largest single magnitude gap.
    pub max_abs_diff: f32,
    /// Index of the largest gap.
    pub worst_index: usize,
}

impl ParityReport {
    /// Whether the run is within tolerance.
    ///
    /// A NaN sum (one path produced NaN where the other did not) fails.
    pub fn passed(&self) -> bool {
        self.sum_abs_diff <= self.tolerance
    }
}

/// Draw `cfg.samples` inputs from the generator range.
pub fn generate_input(cfg: &ParityConfig) -> Vec<f32> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..cfg.samples)
        .map(|_| rng.gen_range(0..SAMPLE_RANGE) as f32 / 1000.0)
        .collect()
}

/// Magnitude gap between one device result and one host result.
///
/// Equal magnitudes contribute zero even when both are infinite, so a
/// routine that produces `-inf` on both paths (e.g. `log10(0)`) compares
/// clean instead of poisoning the sum with `inf - inf`.
pub fn magnitude_gap(device: f32, host: f32) -> f32 {
    let md = fast_math::fabs(device);
    let mh = fast_math::fabs(host);
    if md == mh {
        0.0
    } else {
        fast_math::fabs(md - mh)
    }
}

/// Accumulate magnitude gaps over two equally sized result slices.
///
/// Returns `(sum, max, worst_index)`.
pub fn compare_magnitudes(device: &[f32], host: &[f32]) -> Result<(f32, f32, usize)> {
    if device.len() != host.len() {
        return Err(crate::error::AmpError::ShapeMismatch {
            expected: device.len(),
            actual: host.len(),
        });
    }
    let mut sum = 0.0f32;
    let mut max = 0.0f32;
    let mut worst = 0usize;
    for (i, (&d, &h)) in device.iter().zip(host.iter()).enumerate() {
        let gap = magnitude_gap(d, h);
        sum += gap;
        if gap > max || gap.is_nan() {
            max = gap;
            worst = i;
        }
    }
    Ok((sum, max, worst))
}

/// Run the harness over a freshly generated input.
pub fn run_parity<F>(cfg: &ParityConfig, op: F) -> Result<ParityReport>
where
    F: Fn(f32) -> f32 + Sync,
{
    let input = generate_input(cfg);
    run_parity_on(cfg, &input, op)
}

/// Run the harness over a caller-supplied input.
///
/// The device path launches `op` as a data-parallel map over the full
/// extent; the host path is a sequential loop over the same range. The two
/// never run concurrently: the launch blocks until every lane's write is
/// visible, and only then does the host loop start.
pub fn run_parity_on<F>(cfg: &ParityConfig, input: &[f32], op: F) -> Result<ParityReport>
where
    F: Fn(f32) -> f32 + Sync,
{
    let extent = Extent::new(input.len());
    let source = Array::from_vec(extent, input.to_vec())?;
    let mut device_result: Array<f32> = Array::new(extent)?;

    {
        let src = source.view();
        let dst = device_result.view_mut();
        parallel_for_each(extent, |idx: Index| {
            // SAFETY: each lane writes only its own index.
            unsafe { dst.set(idx, op(src.get(idx))) };
        })?;
    }

    let mut host_result = vec![0.0f32; input.len()];
    for (out, &x) in host_result.iter_mut().zip(input.iter()) {
        *out = op(x);
    }

    let (sum_abs_diff, max_abs_diff, worst_index) =
        compare_magnitudes(device_result.as_slice(), &host_result)?;

    let report = ParityReport {
        samples: input.len(),
        tolerance: cfg.tolerance,
        sum_abs_diff,
        max_abs_diff,
        worst_index,
    };
    log::debug!(
        "Parity over {} samples: sum {:.6}, max {:.6} at index {} (tolerance {})",
        report.samples,
        report.sum_abs_diff,
        report.max_abs_diff,
        report.worst_index,
        report.tolerance
    );
    Ok(report)
}
