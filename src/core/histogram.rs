//! Exact integer-domain and uniform float-domain histograms.
use crate::buffer::{PixelBuffer, Samples};
use crate::core::stats::compute_min_max;
use crate::error::{Error, Result};

/// A uniform histogram: parallel bin lower edges and counts, plus the
/// resolved value range the bins were laid over.
///
/// Empty `bins`/`counts` mean the buffer held no valid samples to bin. A
/// single bin with count 0 means the requested range had zero width; callers
/// must treat that as "no usable range", not as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min_val: f32,
    pub max_val: f32,
    pub bins: Vec<f32>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Exact per-value histogram for U8/U16 buffers.
///
/// `bin_shift` coarsens bin width by powers of two: slot count is
/// `domain >> bin_shift` and each sample lands in slot `value >> bin_shift`.
/// A shift that leaves no slots is rejected.
pub fn hist_int(buf: &PixelBuffer, bin_shift: u32) -> Result<Vec<u64>> {
    match buf.samples() {
        Samples::U8(data) => count_shifted(data.iter().map(|&v| v as usize), 256, bin_shift),
        Samples::U16(data) => count_shifted(data.iter().map(|&v| v as usize), 65536, bin_shift),
        _ => Err(Error::UnsupportedEncoding {
            operation: "hist_int",
            encoding: buf.encoding(),
        }),
    }
}

fn count_shifted(
    values: impl Iterator<Item = usize>,
    domain: usize,
    bin_shift: u32,
) -> Result<Vec<u64>> {
    let slots = if bin_shift < usize::BITS {
        domain >> bin_shift
    } else {
        0
    };
    if slots == 0 {
        return Err(Error::invalid_argument("bin_shift", bin_shift));
    }

    let mut counts = vec![0u64; slots];
    for v in values {
        counts[v >> bin_shift] += 1;
    }
    Ok(counts)
}

/// Uniform histogram on a buffer of any encoding, binned in the float domain.
///
/// `min_val` defaults to 0 and `max_val` to the buffer's computed maximum.
/// If the maximum cannot be resolved (no valid samples) the histogram is
/// empty. If `max_val <= min_val` the result is a single bin at `min_val`
/// with count 0. NaN samples and samples outside the binned range are not
/// counted.
pub fn hist_float(
    buf: &PixelBuffer,
    bin_count: usize,
    min_val: Option<f32>,
    max_val: Option<f32>,
) -> Result<Histogram> {
    if bin_count == 0 {
        return Err(Error::invalid_argument("bin_count", bin_count));
    }

    let min_val = min_val.unwrap_or(0.0);
    let max_val = match max_val {
        Some(v) => v,
        None => compute_min_max(buf)?.1,
    };

    // No non-NaN values in the buffer.
    if max_val.is_nan() {
        return Ok(Histogram {
            min_val,
            max_val,
            bins: Vec::new(),
            counts: Vec::new(),
        });
    }

    if max_val <= min_val {
        return Ok(Histogram {
            min_val,
            max_val,
            bins: vec![min_val],
            counts: vec![0],
        });
    }

    let bin_size = (max_val - min_val) / bin_count as f32;
    let bins: Vec<f32> = (0..bin_count).map(|i| min_val + i as f32 * bin_size).collect();

    // The nominal upper bound is exclusive but max_val is usually the exact
    // maximum sample, so widen by a fraction of a bin. Float epsilon proved
    // too small for this; keep the 0.1 factor for output compatibility.
    let upper = max_val + 0.1 * bin_size;

    let mut counts = vec![0u64; bin_count];
    for v in buf.samples_f32() {
        if v.is_nan() || v < min_val || v >= upper {
            continue;
        }
        let mut idx = ((v - min_val) / bin_size) as usize;
        // The widened leftover range belongs to the final bin.
        if idx >= bin_count {
            idx = bin_count - 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram {
        min_val,
        max_val,
        bins,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::Error;

    #[test]
    fn exact_u8_histogram_counts_each_value() {
        let buf = PixelBuffer::from_u8(4, 1, 1, vec![0, 64, 128, 255]).unwrap();
        let counts = hist_int(&buf, 0).unwrap();
        assert_eq!(counts.len(), 256);
        assert_eq!(counts.iter().sum::<u64>(), 4);
        for idx in [0usize, 64, 128, 255] {
            assert_eq!(counts[idx], 1, "expected one sample at {}", idx);
        }
    }

    #[test]
    fn exact_u16_histogram_spans_full_domain() {
        let buf = PixelBuffer::from_u16(3, 1, 1, vec![0, 1000, 65535]).unwrap();
        let counts = hist_int(&buf, 0).unwrap();
        assert_eq!(counts.len(), 65536);
        assert_eq!(counts[1000], 1);
        assert_eq!(counts[65535], 1);
    }

    #[test]
    fn bin_shift_coarsens_by_powers_of_two() {
        let buf = PixelBuffer::from_u8(4, 1, 1, vec![0, 3, 4, 255]).unwrap();
        let counts = hist_int(&buf, 2).unwrap();
        assert_eq!(counts.len(), 64);
        assert_eq!(counts[0], 2); // 0 and 3 share the first slot
        assert_eq!(counts[1], 1); // 4
        assert_eq!(counts[63], 1); // 255
    }

    #[test]
    fn hist_int_rejects_float_buffers_and_hollow_shifts() {
        let float_buf = PixelBuffer::from_f32(1, 1, 1, vec![0.5]).unwrap();
        assert_matches!(
            hist_int(&float_buf, 0),
            Err(Error::UnsupportedEncoding { operation: "hist_int", .. })
        );

        let buf = PixelBuffer::from_u8(1, 1, 1, vec![1]).unwrap();
        // Shift 8 still leaves a single slot covering the whole U8 domain.
        assert_eq!(hist_int(&buf, 8).unwrap(), vec![1]);
        assert_matches!(hist_int(&buf, 9), Err(Error::InvalidArgument { .. }));
    }

    #[test]
    fn float_histogram_counts_every_valid_sample() {
        let buf =
            PixelBuffer::from_f32(6, 1, 1, vec![0.0, 1.0, 2.5, 9.9, 10.0, f32::NAN]).unwrap();
        let hist = hist_float(&buf, 10, Some(0.0), Some(10.0)).unwrap();
        assert_eq!(hist.bins.len(), 10);
        assert_eq!(hist.counts.len(), 10);
        // Five non-NaN samples, including the one exactly at max_val.
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.counts[9], 2); // 9.9 and the widened 10.0
        assert_relative_eq!(hist.bins[0], 0.0);
        assert_relative_eq!(hist.bins[9], 9.0);
    }

    #[test]
    fn float_histogram_defaults_range_to_zero_and_buffer_max() {
        let buf = PixelBuffer::from_f32(3, 1, 1, vec![1.0, 2.0, 4.0]).unwrap();
        let hist = hist_float(&buf, 4, None, None).unwrap();
        assert_relative_eq!(hist.min_val, 0.0);
        assert_relative_eq!(hist.max_val, 4.0);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn all_nan_buffer_yields_empty_histogram() {
        let buf = PixelBuffer::from_f32(4, 1, 1, vec![f32::NAN; 4]).unwrap();
        let hist = hist_float(&buf, 10, None, None).unwrap();
        assert!(hist.is_empty());
        assert!(hist.counts.is_empty());
    }

    #[test]
    fn zero_width_range_yields_single_empty_bin() {
        let buf = PixelBuffer::from_f32(2, 1, 1, vec![5.0, 5.0]).unwrap();
        let hist = hist_float(&buf, 10, Some(5.0), Some(5.0)).unwrap();
        assert_eq!(hist.bins, vec![5.0]);
        assert_eq!(hist.counts, vec![0]);
    }

    #[test]
    fn zero_bin_count_is_rejected() {
        let buf = PixelBuffer::from_f32(1, 1, 1, vec![1.0]).unwrap();
        assert_matches!(
            hist_float(&buf, 0, None, None),
            Err(Error::InvalidArgument { arg: "bin_count", .. })
        );
    }

    #[test]
    fn integer_buffers_can_be_binned_in_the_float_domain() {
        let buf = PixelBuffer::from_u16(4, 1, 1, vec![0, 250, 500, 1000]).unwrap();
        let hist = hist_float(&buf, 4, Some(0.0), Some(1000.0)).unwrap();
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[1], 1);
        assert_eq!(hist.counts[2], 1);
        assert_eq!(hist.counts[3], 1);
    }
}
