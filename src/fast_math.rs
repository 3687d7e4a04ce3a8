//! Accelerator-profile single-precision math routines
//!
//! On a real accelerator these map to reduced-precision device intrinsics
//! (`__log10f` and friends). On the CPU lanes backend they lower to the
//! native f32 operations, which keeps the two invocation paths honest: the
//! parity harnesses compare exactly what a kernel lane computes against what
//! the sequential host loop computes.
//!
//! All functions are total over f32: out-of-domain inputs produce the IEEE
//! results (`log10(0) == -inf`, `log10(-1)` is NaN, `sqrt(-1)` is NaN).

/// Base-10 logarithm.
#[inline(always)]
pub fn log10(x: f32) -> f32 {
    x.log10()
}

/// Base-2 logarithm.
#[inline(always)]
pub fn log2(x: f32) -> f32 {
    x.log2()
}

/// Natural logarithm.
#[inline(always)]
pub fn log(x: f32) -> f32 {
    x.ln()
}

/// Natural exponential.
#[inline(always)]
pub fn exp(x: f32) -> f32 {
    x.exp()
}

/// Base-2 exponential.
#[inline(always)]
pub fn exp2(x: f32) -> f32 {
    x.exp2()
}

/// Square root.
#[inline(always)]
pub fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

/// Reciprocal square root.
#[inline(always)]
pub fn rsqrt(x: f32) -> f32 {
    x.sqrt().recip()
}

/// `x` raised to the power `y`.
#[inline(always)]
pub fn pow(x: f32, y: f32) -> f32 {
    x.powf(y)
}

/// Absolute value.
#[inline(always)]
pub fn fabs(x: f32) -> f32 {
    x.abs()
}

/// Largest integer value not greater than `x`.
#[inline(always)]
pub fn floor(x: f32) -> f32 {
    x.floor()
}

/// Smallest integer value not less than `x`.
#[inline(always)]
pub fn ceil(x: f32) -> f32 {
    x.ceil()
}

/// Minimum of two values, propagating the non-NaN operand.
#[inline(always)]
pub fn fmin(x: f32, y: f32) -> f32 {
    x.min(y)
}

/// Maximum of two values, propagating the non-NaN operand.
#[inline(always)]
pub fn fmax(x: f32, y: f32) -> f32 {
    x.max(y)
}

/// Sine, radians.
#[inline(always)]
pub fn sin(x: f32) -> f32 {
    x.sin()
}

/// Cosine, radians.
#[inline(always)]
pub fn cos(x: f32) -> f32 {
    x.cos()
}

/// Tangent, radians.
#[inline(always)]
pub fn tan(x: f32) -> f32 {
    x.tan()
}
