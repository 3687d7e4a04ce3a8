//! log10 accelerator/host parity check
//!
//! Fills a vector with pseudo-random samples, computes `log10` once as a
//! data-parallel launch and once as a sequential host loop, and compares
//! the results by summed magnitude gap. The process exit code is the
//! verdict consumed by the test runner: 0 within tolerance, 1 over
//! tolerance, 2 on usage or runtime errors.
//!
//! Usage: `log10_parity [samples] [tolerance] [seed]`

use amp_rust::fast_math;
use amp_rust::parity::{run_parity, ParityConfig};
use std::process::ExitCode;

fn parse_config(args: &[String]) -> Result<ParityConfig, String> {
    let mut cfg = ParityConfig::default();
    if let Some(samples) = args.first() {
        cfg.samples = samples
            .parse()
            .map_err(|e| format!("bad sample count '{samples}': {e}"))?;
    }
    if let Some(tolerance) = args.get(1) {
        cfg.tolerance = tolerance
            .parse()
            .map_err(|e| format!("bad tolerance '{tolerance}': {e}"))?;
    }
    if let Some(seed) = args.get(2) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|e| format!("bad seed '{seed}': {e}"))?,
        );
    }
    Ok(cfg)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = match parse_config(&args) {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: log10_parity [samples] [tolerance] [seed]");
            return ExitCode::from(2);
        }
    };

    let report = match run_parity(&cfg, fast_math::log10) {
        Ok(report) => report,
        Err(err) => {
            log::error!("Parity run failed: {err}");
            return ExitCode::from(2);
        }
    };

    log::info!(
        "log10 parity: {} samples, sum {:.6}, max {:.6} at index {}, tolerance {}",
        report.samples,
        report.sum_abs_diff,
        report.max_abs_diff,
        report.worst_index,
        report.tolerance
    );

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
