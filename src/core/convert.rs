//! The normalization pipeline: linear rescale into the byte range and the
//! per-format conversion policy applied before a buffer can be written out.
use std::borrow::Cow;

use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::core::params::ConversionOptions;
use crate::core::percentile::percentile_range_with;
use crate::core::stats::compute_min_max;
use crate::error::{Error, Result};
use crate::types::{FormatFamily, PixelEncoding};

/// Linearly rescale any buffer into byte range, pinning `low_val` to 0 and
/// `high_val` to 255.
///
/// `high_val <= low_val` means the range is unset and the buffer's own
/// min/max is used instead. Each sample maps through
/// `clamp(round(scale*v + offset), 0, 255)`; NaN samples and degenerate
/// ranges come out as 0. Channel layout is preserved.
pub fn rescale_to_byte_range(buf: &PixelBuffer, low_val: f32, high_val: f32) -> Result<PixelBuffer> {
    let (mut low, mut high) = (low_val, high_val);

    if !(high > low) {
        // Range not specified, use min/max.
        (low, high) = compute_min_max(buf)?;
    }

    let scale = if high > low { 255.0 / (high - low) } else { 0.0 };
    let offset = -scale * low;
    debug!(
        "rescale to bytes: [{:.3}, {:.3}] scale={:.5} offset={:.3}",
        low, high, scale, offset
    );

    let out: Vec<u8> = buf
        .samples_f32()
        .map(|v| (scale * v + offset).round().clamp(0.0, 255.0) as u8)
        .collect();
    PixelBuffer::from_u8(buf.width(), buf.height(), buf.channels(), out)
}

/// Convert a buffer so it can be written in the given target-format family,
/// using the default 1st/99th percentile window for auto-ranging.
///
/// The boolean is true when a conversion was performed; no-op paths borrow
/// the input.
pub fn prepare_for_output<'a>(
    buf: &'a PixelBuffer,
    format: FormatFamily,
) -> Result<(Cow<'a, PixelBuffer>, bool)> {
    prepare_for_output_with(buf, format, &ConversionOptions::default())
}

/// [`prepare_for_output`] with explicit auto-ranging options.
///
/// The decision table is ordered: deep single-channel buffers headed to any
/// non-wide format are collapsed to bytes first, before channel-layout rules
/// apply.
pub fn prepare_for_output_with<'a>(
    buf: &'a PixelBuffer,
    format: FormatFamily,
    options: &ConversionOptions,
) -> Result<(Cow<'a, PixelBuffer>, bool)> {
    let encoding = buf.encoding();
    let channels = buf.channels();
    let deep = matches!(
        encoding,
        PixelEncoding::U16 | PixelEncoding::I32 | PixelEncoding::F32
    );

    // Deep single-channel data into a byte-only format: auto-range to bytes.
    if channels == 1 && deep && format != FormatFamily::Wide {
        let (low, high) =
            percentile_range_with(buf, options.low_pct, options.high_pct, options.hist_bins)?;
        info!(
            "auto-ranging {} buffer to bytes for {} output: [{:.1}, {:.1}]",
            encoding, format, low, high
        );
        let rescaled = rescale_to_byte_range(buf, low, high)?;
        return Ok((Cow::Owned(rescaled), true));
    }

    // Wide formats take I32 as F32, everything else as-is.
    if encoding == PixelEncoding::I32 && format == FormatFamily::Wide {
        return Ok((Cow::Owned(cast_to_f32(buf)?), true));
    }

    match format {
        FormatFamily::TriChannel => match (encoding, channels) {
            (PixelEncoding::U8, 1) => Ok((Cow::Owned(replicate_to_three_channels(buf)?), true)),
            (PixelEncoding::U8, 3) => Ok((Cow::Borrowed(buf), false)),
            (PixelEncoding::U8, 4) => Ok((Cow::Owned(drop_alpha(buf)?), true)),
            _ => Err(Error::UnsupportedConversion {
                encoding,
                channels,
                format,
            }),
        },
        FormatFamily::MonoStrict => match (encoding, channels) {
            (PixelEncoding::U8, 1) => Ok((Cow::Borrowed(buf), false)),
            (PixelEncoding::U8, 3) | (PixelEncoding::U8, 4) => {
                Ok((Cow::Owned(to_luma(buf)?), true))
            }
            _ => Err(Error::UnsupportedConversion {
                encoding,
                channels,
                format,
            }),
        },
        FormatFamily::Wide | FormatFamily::Plain => Ok((Cow::Borrowed(buf), false)),
    }
}

/// Fix up a freshly decoded buffer. Wide-format decoders hand back 3-channel
/// bytes in swapped R/B order and sometimes an extra alpha channel; undo
/// both. Everything else passes through.
pub fn prepare_after_load<'a>(
    buf: &'a PixelBuffer,
    format: FormatFamily,
) -> Result<(Cow<'a, PixelBuffer>, bool)> {
    if format == FormatFamily::Wide && buf.encoding() == PixelEncoding::U8 {
        match buf.channels() {
            3 => return Ok((Cow::Owned(swap_red_blue(buf)?), true)),
            4 => return Ok((Cow::Owned(drop_alpha(buf)?), true)),
            _ => {}
        }
    }
    Ok((Cow::Borrowed(buf), false))
}

fn cast_to_f32(buf: &PixelBuffer) -> Result<PixelBuffer> {
    let data: Vec<f32> = buf.samples_f32().collect();
    PixelBuffer::from_f32(buf.width(), buf.height(), buf.channels(), data)
}

fn byte_samples<'a>(buf: &'a PixelBuffer, operation: &'static str) -> Result<&'a [u8]> {
    buf.as_u8().ok_or(Error::UnsupportedEncoding {
        operation,
        encoding: buf.encoding(),
    })
}

fn replicate_to_three_channels(buf: &PixelBuffer) -> Result<PixelBuffer> {
    let src = byte_samples(buf, "replicate_to_three_channels")?;
    let mut out = Vec::with_capacity(src.len() * 3);
    for &v in src {
        out.extend_from_slice(&[v, v, v]);
    }
    PixelBuffer::from_u8(buf.width(), buf.height(), 3, out)
}

fn drop_alpha(buf: &PixelBuffer) -> Result<PixelBuffer> {
    let src = byte_samples(buf, "drop_alpha")?;
    let mut out = Vec::with_capacity(buf.width() * buf.height() * 3);
    for px in src.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    PixelBuffer::from_u8(buf.width(), buf.height(), 3, out)
}

fn swap_red_blue(buf: &PixelBuffer) -> Result<PixelBuffer> {
    let src = byte_samples(buf, "swap_red_blue")?;
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(3) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    PixelBuffer::from_u8(buf.width(), buf.height(), 3, out)
}

/// BT.601 luma reduction to a single byte channel. Alpha, if present, is
/// ignored.
fn to_luma(buf: &PixelBuffer) -> Result<PixelBuffer> {
    let src = byte_samples(buf, "to_luma")?;
    let channels = buf.channels();
    let mut out = Vec::with_capacity(buf.width() * buf.height());
    for px in src.chunks_exact(channels) {
        let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        out.push(y.round().clamp(0.0, 255.0) as u8);
    }
    PixelBuffer::from_u8(buf.width(), buf.height(), 1, out)
}
