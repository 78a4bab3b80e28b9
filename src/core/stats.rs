//! Descriptive statistics over a single-channel buffer: min/max with a
//! defensive exact fallback, sum, and non-zero count.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{PixelBuffer, Samples};
use crate::error::{Error, Result};
use crate::types::PixelEncoding;

/// Statistics computed by [`compute_stats`].
///
/// `min_val`/`max_val` are NaN for empty or all-NaN buffers. For multi-channel
/// buffers only `encoding`, `width`, and `height` are populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferStats {
    pub encoding: PixelEncoding,
    pub width: usize,
    pub height: usize,
    /// Exact count of non-zero samples; 0 for float buffers.
    pub nonzero_count: u64,
    pub sum: f64,
    pub min_val: f32,
    pub max_val: f32,
}

impl BufferStats {
    fn dims_only(buf: &PixelBuffer) -> Self {
        BufferStats {
            encoding: buf.encoding(),
            width: buf.width(),
            height: buf.height(),
            nonzero_count: 0,
            sum: 0.0,
            min_val: f32::NAN,
            max_val: f32::NAN,
        }
    }
}

/// Find min and max in a buffer of any encoding, as floats.
///
/// Uses the bulk reduction as the fast path. If the reduction reports NaN on a
/// non-float buffer that is an invariant violation; on a float buffer it means
/// NaN samples poisoned the reduction, so an exact NaN-skipping scan decides
/// whether any valid samples exist. All-NaN and empty buffers yield
/// `(NaN, NaN)`.
pub fn compute_min_max(buf: &PixelBuffer) -> Result<(f32, f32)> {
    if buf.is_empty() {
        return Ok((f32::NAN, f32::NAN));
    }

    let (mut lo, mut hi) = buf.reduce_min_max();

    if lo.is_nan() || hi.is_nan() {
        if !buf.encoding().is_float() {
            return Err(Error::InternalInconsistency(format!(
                "min/max reduction returned NaN on a {} buffer",
                buf.encoding()
            )));
        }

        debug!("min/max fast path reported NaN, rescanning exactly");
        lo = f32::MAX;
        hi = f32::MIN;
        for v in buf.samples_f32() {
            if !v.is_nan() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }

        // No valid samples at all.
        if hi < lo {
            lo = f32::NAN;
            hi = f32::NAN;
        }
    }

    Ok((lo, hi))
}

/// Compute stats on a single-channel buffer.
///
/// Multi-channel buffers are not analyzed; the returned record carries only
/// the encoding and dimensions.
pub fn compute_stats(buf: &PixelBuffer) -> Result<BufferStats> {
    let mut stats = BufferStats::dims_only(buf);

    if buf.channels() != 1 || buf.is_empty() {
        return Ok(stats);
    }

    stats.nonzero_count = match buf.samples() {
        Samples::U8(d) => d.iter().filter(|&&v| v != 0).count() as u64,
        Samples::U16(d) => d.iter().filter(|&&v| v != 0).count() as u64,
        Samples::I32(d) => d.iter().filter(|&&v| v != 0).count() as u64,
        Samples::F32(_) => 0,
    };

    stats.sum = buf.samples_f32().map(f64::from).sum();
    (stats.min_val, stats.max_val) = compute_min_max(buf)?;

    Ok(stats)
}
