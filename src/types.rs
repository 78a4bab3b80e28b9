//! Shared types and enums used across the crate.
//! Includes the pixel sample encoding (`PixelEncoding`) and the target-format
//! family consumed by the conversion policy (`FormatFamily`).
use serde::{Deserialize, Serialize};

/// Numeric encoding of a single pixel sample.
///
/// The set is closed on purpose: every consuming operation matches on it, so a
/// new encoding forces a compile-time-checked update everywhere.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelEncoding {
    U8,
    U16,
    I32,
    F32,
}

impl PixelEncoding {
    /// Whether samples are integers (exact histograms, exact non-zero counts).
    pub fn is_integer(self) -> bool {
        !matches!(self, PixelEncoding::F32)
    }

    pub fn is_float(self) -> bool {
        matches!(self, PixelEncoding::F32)
    }

    /// Size of the exact-histogram domain, for encodings small enough to count
    /// per value.
    pub fn int_domain(self) -> Option<usize> {
        match self {
            PixelEncoding::U8 => Some(256),
            PixelEncoding::U16 => Some(65536),
            PixelEncoding::I32 | PixelEncoding::F32 => None,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            PixelEncoding::U8 => 1,
            PixelEncoding::U16 => 2,
            PixelEncoding::I32 | PixelEncoding::F32 => 4,
        }
    }
}

impl std::fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PixelEncoding::U8 => "U8",
            PixelEncoding::U16 => "U16",
            PixelEncoding::I32 => "I32",
            PixelEncoding::F32 => "F32",
        };
        write!(f, "{}", s)
    }
}

/// Target-format family for the output conversion policy.
///
/// The surrounding I/O layer supplies opaque extension tokens; the policy only
/// cares which family a token falls into.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum FormatFamily {
    /// Float- and deep-integer-capable formats (tif/tiff). No byte collapse
    /// needed.
    Wide,
    /// Formats that only accept 3-channel bytes (ppm).
    TriChannel,
    /// Formats that require strict single-channel bytes (pbm/pgm).
    MonoStrict,
    /// Common 8-bit raster formats; pass-through for byte buffers.
    Plain,
}

impl FormatFamily {
    /// Map a file extension, with or without the leading period and in any
    /// case, to its format family. Unknown extensions are `Plain`.
    pub fn from_extension(ext: &str) -> FormatFamily {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "tif" | "tiff" => FormatFamily::Wide,
            "ppm" => FormatFamily::TriChannel,
            "pbm" | "pgm" => FormatFamily::MonoStrict,
            _ => FormatFamily::Plain,
        }
    }
}

impl std::fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FormatFamily::Wide => "Wide",
            FormatFamily::TriChannel => "TriChannel",
            FormatFamily::MonoStrict => "MonoStrict",
            FormatFamily::Plain => "Plain",
        };
        write!(f, "{}", s)
    }
}
