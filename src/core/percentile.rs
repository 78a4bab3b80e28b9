//! Percentile lookup over histogram counts, and the encoding-dispatched
//! percentile range used for auto-ranging.
use crate::buffer::PixelBuffer;
use crate::core::histogram::{hist_float, hist_int};
use crate::error::{Error, Result};
use crate::types::PixelEncoding;

/// Index of the first bin at which the cumulative count reaches
/// `percentile/100 * total`. Ties resolve to the earlier bin.
///
/// Operates on bare counts, independent of how the histogram was built.
pub fn find_percentile_index(counts: &[u64], percentile: f32) -> Result<usize> {
    if counts.is_empty() {
        return Err(Error::invalid_argument("counts", "empty"));
    }
    if !(0.0..=100.0).contains(&percentile) {
        return Err(Error::invalid_argument("percentile", percentile));
    }

    let total: u64 = counts.iter().sum();
    let target = percentile as f64 / 100.0 * total as f64;

    let mut running = 0u64;
    for (idx, &count) in counts.iter().enumerate() {
        running += count;
        if running as f64 >= target {
            return Ok(idx);
        }
    }

    // Reachable only when every count is zero and target rounds above zero,
    // which the arithmetic above excludes; keep the final bin as the answer.
    Ok(counts.len() - 1)
}

/// Compute a low/high percentile pair in the buffer's native value domain.
///
/// U8/U16 use the exact histogram, so indices are the values themselves.
/// I32/F32 are binned in the float domain with `bins` uniform bins over the
/// buffer's natural range, and indices map to bin lower edges. A buffer with
/// no valid samples yields `(NaN, NaN)`.
pub fn percentile_range(buf: &PixelBuffer, low_pct: f32, high_pct: f32) -> Result<(f32, f32)> {
    percentile_range_with(buf, low_pct, high_pct, 256)
}

pub(crate) fn percentile_range_with(
    buf: &PixelBuffer,
    low_pct: f32,
    high_pct: f32,
    bins: usize,
) -> Result<(f32, f32)> {
    match buf.encoding() {
        PixelEncoding::U8 | PixelEncoding::U16 => {
            let counts = hist_int(buf, 0)?;
            let low = find_percentile_index(&counts, low_pct)?;
            let high = find_percentile_index(&counts, high_pct)?;
            Ok((low as f32, high as f32))
        }
        PixelEncoding::I32 | PixelEncoding::F32 => {
            let hist = hist_float(buf, bins, None, None)?;
            if hist.is_empty() {
                // No valid samples to rank.
                return Ok((f32::NAN, f32::NAN));
            }
            let low = find_percentile_index(&hist.counts, low_pct)?;
            let high = find_percentile_index(&hist.counts, high_pct)?;
            Ok((hist.bins[low], hist.bins[high]))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn zeroth_percentile_is_the_first_bin() {
        assert_eq!(find_percentile_index(&[0, 5, 5], 0.0).unwrap(), 0);
    }

    #[test]
    fn hundredth_percentile_reaches_the_total() {
        assert_eq!(find_percentile_index(&[5, 5, 0], 100.0).unwrap(), 1);
        assert_eq!(find_percentile_index(&[5, 5, 1], 100.0).unwrap(), 2);
    }

    #[test]
    fn ties_resolve_to_the_earlier_bin() {
        // 50% of 10 = 5, reached exactly at the end of the first bin.
        assert_eq!(find_percentile_index(&[5, 5], 50.0).unwrap(), 0);
    }

    #[test]
    fn empty_counts_are_a_precondition_violation() {
        assert_matches!(
            find_percentile_index(&[], 50.0),
            Err(Error::InvalidArgument { arg: "counts", .. })
        );
    }

    #[test]
    fn out_of_range_percentiles_are_rejected() {
        assert_matches!(
            find_percentile_index(&[1], -0.5),
            Err(Error::InvalidArgument { arg: "percentile", .. })
        );
        assert_matches!(
            find_percentile_index(&[1], 100.5),
            Err(Error::InvalidArgument { arg: "percentile", .. })
        );
    }

    #[test]
    fn u16_percentile_range_stays_inside_the_data() {
        let data: Vec<u16> = (0..=1000).collect();
        let buf = PixelBuffer::from_u16(1001, 1, 1, data).unwrap();
        let (low, high) = percentile_range(&buf, 1.0, 99.0).unwrap();
        assert!(low >= 0.0 && high <= 1000.0);
        assert!(low < high);
    }

    #[test]
    fn percentile_range_is_monotonic() {
        let buf = PixelBuffer::from_u8(5, 1, 1, vec![10, 20, 30, 40, 50]).unwrap();
        let (low, high) = percentile_range(&buf, 10.0, 90.0).unwrap();
        assert!(low <= high);
        assert_eq!(low, 10.0);
        assert_eq!(high, 50.0);
    }

    #[test]
    fn float_percentiles_map_to_bin_lower_edges() {
        let data: Vec<f32> = (0..1000).map(|v| v as f32).collect();
        let buf = PixelBuffer::from_f32(1000, 1, 1, data).unwrap();
        let (low, high) = percentile_range(&buf, 1.0, 99.0).unwrap();
        assert!(low >= 0.0 && high <= 999.0);
        assert!(low < high);
    }

    #[test]
    fn i32_buffers_rank_in_the_float_domain() {
        let buf = PixelBuffer::from_i32(4, 1, 1, vec![0, 100, 200, 400]).unwrap();
        let (low, high) = percentile_range(&buf, 1.0, 99.0).unwrap();
        assert!(low <= high);
        assert!(high <= 400.0);
    }

    #[test]
    fn all_nan_buffer_yields_nan_range() {
        let buf = PixelBuffer::from_f32(3, 1, 1, vec![f32::NAN; 3]).unwrap();
        let (low, high) = percentile_range(&buf, 1.0, 99.0).unwrap();
        assert!(low.is_nan());
        assert!(high.is_nan());
    }
}
