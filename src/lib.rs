#![doc = r#"
rasternorm — raster statistics and value normalization.

This crate reasons uniformly over raster buffers in four sample encodings
(`U8`, `U16`, `I32`, `F32`): it computes descriptive statistics, builds exact
integer-domain or uniform float-domain histograms, derives percentile value
ranges from them, and applies a per-format conversion policy that decides how
a buffer must be rescaled or re-laid-out before it can be written to a target
format that cannot represent the source domain natively (for example,
collapsing 16-bit or float data into bytes for common raster formats).

Everything is a pure, synchronous function of its inputs. Degenerate data is
not an error: empty buffers and all-NaN buffers produce well-defined sentinel
outputs (NaN min/max pairs, empty histograms), while genuine misuse (empty
count sequences, impossible conversions) surfaces as [`Error`].

Quick start: stats and histograms
---------------------------------
```rust
use rasternorm::{PixelBuffer, compute_stats, hist_int};

fn main() -> rasternorm::Result<()> {
    let buf = PixelBuffer::from_u16(4, 1, 1, vec![0, 250, 500, 1000])?;

    let stats = compute_stats(&buf)?;
    assert_eq!(stats.nonzero_count, 3);
    assert_eq!((stats.min_val, stats.max_val), (0.0, 1000.0));

    // Exact per-value histogram; each index is the sample value itself.
    let counts = hist_int(&buf, 0)?;
    assert_eq!(counts[500], 1);
    Ok(())
}
```

Preparing a buffer for output
-----------------------------
```rust
use rasternorm::{FormatFamily, PixelBuffer, PixelEncoding, prepare_for_output};

fn main() -> rasternorm::Result<()> {
    let deep = PixelBuffer::from_u16(3, 1, 1, vec![0, 800, 4000])?;

    // PNG cannot hold this 16-bit range here; the pipeline auto-ranges it to
    // bytes using a 1st/99th percentile window.
    let family = FormatFamily::from_extension("png");
    let (out, changed) = prepare_for_output(&deep, family)?;
    assert!(changed);
    assert_eq!(out.encoding(), PixelEncoding::U8);

    // Byte buffers pass through untouched.
    let (same, changed) = prepare_for_output(&out, family)?;
    assert!(!changed);
    assert_eq!(&*same, &*out);
    Ok(())
}
```

`ndarray` planes convert directly into buffers via `From<Array2<_>>` for all
four sample types.

Useful modules
--------------
- [`buffer`] — the `PixelBuffer` collaborator type.
- [`core`] — stats, histograms, percentiles, and the conversion pipeline.
- [`types`] — `PixelEncoding` and `FormatFamily`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod buffer;
pub mod core;
pub mod error;
pub mod types;

// Curated public API surface
pub use buffer::{PixelBuffer, Samples};
pub use core::convert::{
    prepare_after_load, prepare_for_output, prepare_for_output_with, rescale_to_byte_range,
};
pub use core::histogram::{Histogram, hist_float, hist_int};
pub use core::params::ConversionOptions;
pub use core::percentile::{find_percentile_index, percentile_range};
pub use core::stats::{BufferStats, compute_min_max, compute_stats};
pub use error::{Error, Result};
pub use types::{FormatFamily, PixelEncoding};
