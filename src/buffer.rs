//! Single-plane raster buffer with interleaved channels.
//!
//! Storage is a closed enum over the four supported sample types, so the
//! encoding can never disagree with the backing vector. The buffer exposes
//! typed slice access, a uniform f32 view of the samples, and the bulk min/max
//! reduction that serves as the fast path for [`crate::core::stats`].
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::types::PixelEncoding;

/// Sample storage, row-major with interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(d) => d.len(),
            Samples::U16(d) => d.len(),
            Samples::I32(d) => d.len(),
            Samples::F32(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn encoding(&self) -> PixelEncoding {
        match self {
            Samples::U8(_) => PixelEncoding::U8,
            Samples::U16(_) => PixelEncoding::U16,
            Samples::I32(_) => PixelEncoding::I32,
            Samples::F32(_) => PixelEncoding::F32,
        }
    }
}

/// A width x height raster with 1 to 4 interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    samples: Samples,
}

impl PixelBuffer {
    fn new(width: usize, height: usize, channels: usize, samples: Samples) -> Result<Self> {
        if channels == 0 || channels > 4 {
            return Err(Error::invalid_argument("channels", channels));
        }
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(Error::invalid_argument(
                "samples",
                format!(
                    "{} samples for {}x{}x{} buffer (expected {})",
                    samples.len(),
                    width,
                    height,
                    channels,
                    expected
                ),
            ));
        }
        Ok(PixelBuffer {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn from_u8(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, channels, Samples::U8(data))
    }

    pub fn from_u16(width: usize, height: usize, channels: usize, data: Vec<u16>) -> Result<Self> {
        Self::new(width, height, channels, Samples::U16(data))
    }

    pub fn from_i32(width: usize, height: usize, channels: usize, data: Vec<i32>) -> Result<Self> {
        Self::new(width, height, channels, Samples::I32(data))
    }

    pub fn from_f32(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        Self::new(width, height, channels, Samples::F32(data))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.samples.encoding()
    }

    /// Total sample count (width * height * channels).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::U8(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.samples {
            Samples::U16(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.samples {
            Samples::I32(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.samples {
            Samples::F32(d) => Some(d),
            _ => None,
        }
    }

    /// All samples viewed as f32, in row-major interleaved order.
    pub fn samples_f32(&self) -> Box<dyn Iterator<Item = f32> + '_> {
        match &self.samples {
            Samples::U8(d) => Box::new(d.iter().map(|&v| v as f32)),
            Samples::U16(d) => Box::new(d.iter().map(|&v| v as f32)),
            Samples::I32(d) => Box::new(d.iter().map(|&v| v as f32)),
            Samples::F32(d) => Box::new(d.iter().copied()),
        }
    }

    /// Bulk row-major min/max reduction, the fast path for
    /// [`crate::core::stats::compute_min_max`].
    ///
    /// Integer encodings are exact. The float reduction seeds from the first
    /// sample and uses plain `<`/`>` comparisons, so a leading NaN sticks for
    /// the rest of the scan; `compute_min_max` detects that and repairs it with
    /// an exact NaN-skipping pass. An empty buffer reduces to `(NaN, NaN)`.
    pub fn reduce_min_max(&self) -> (f32, f32) {
        match &self.samples {
            Samples::U8(d) => int_min_max(d.iter().map(|&v| v as f32)),
            Samples::U16(d) => int_min_max(d.iter().map(|&v| v as f32)),
            Samples::I32(d) => int_min_max(d.iter().map(|&v| v as f32)),
            Samples::F32(d) => {
                let Some((&first, rest)) = d.split_first() else {
                    return (f32::NAN, f32::NAN);
                };
                let mut lo = first;
                let mut hi = first;
                for &v in rest {
                    if v < lo {
                        lo = v;
                    }
                    if v > hi {
                        hi = v;
                    }
                }
                (lo, hi)
            }
        }
    }
}

fn int_min_max(values: impl Iterator<Item = f32>) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    let mut any = false;
    for v in values {
        any = true;
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    if any { (lo, hi) } else { (f32::NAN, f32::NAN) }
}

macro_rules! impl_from_array2 {
    ($t:ty, $ctor:ident) => {
        impl From<Array2<$t>> for PixelBuffer {
            fn from(plane: Array2<$t>) -> Self {
                let (rows, cols) = plane.dim();
                let data: Vec<$t> = plane.iter().copied().collect();
                // Length always matches rows * cols for a 2-d array.
                PixelBuffer::$ctor(cols, rows, 1, data).expect("plane dimensions match data")
            }
        }
    };
}

impl_from_array2!(u8, from_u8);
impl_from_array2!(u16, from_u16);
impl_from_array2!(i32, from_i32);
impl_from_array2!(f32, from_f32);

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use ndarray::array;

    use super::*;
    use crate::error::Error;

    #[test]
    fn dimensions_must_match_sample_count() {
        assert_matches!(
            PixelBuffer::from_u8(2, 2, 1, vec![0, 1, 2]),
            Err(Error::InvalidArgument { arg: "samples", .. })
        );
        assert_matches!(
            PixelBuffer::from_u8(1, 1, 0, vec![]),
            Err(Error::InvalidArgument { arg: "channels", .. })
        );
        assert!(PixelBuffer::from_u8(2, 2, 1, vec![0, 1, 2, 3]).is_ok());
        assert!(PixelBuffer::from_u8(0, 0, 1, vec![]).is_ok());
    }

    #[test]
    fn encoding_tracks_storage() {
        let buf = PixelBuffer::from_i32(1, 1, 1, vec![-7]).unwrap();
        assert_eq!(buf.encoding(), PixelEncoding::I32);
        assert_eq!(buf.as_i32(), Some(&[-7][..]));
        assert_eq!(buf.as_u8(), None);
    }

    #[test]
    fn reduce_min_max_is_exact_for_integers() {
        let buf = PixelBuffer::from_u16(3, 1, 1, vec![9, 2, 500]).unwrap();
        assert_eq!(buf.reduce_min_max(), (2.0, 500.0));
    }

    #[test]
    fn leading_nan_poisons_float_fast_path() {
        let buf = PixelBuffer::from_f32(3, 1, 1, vec![f32::NAN, 1.0, 2.0]).unwrap();
        let (lo, hi) = buf.reduce_min_max();
        assert!(lo.is_nan());
        assert!(hi.is_nan());
    }

    #[test]
    fn empty_buffer_reduces_to_nan() {
        let buf = PixelBuffer::from_u8(0, 0, 1, vec![]).unwrap();
        let (lo, hi) = buf.reduce_min_max();
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn from_array2_preserves_row_major_order() {
        let plane = array![[1.0f32, 2.0], [3.0, 4.0]];
        let buf = PixelBuffer::from(plane);
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.channels(), 1);
        assert_eq!(buf.as_f32(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    }
}
