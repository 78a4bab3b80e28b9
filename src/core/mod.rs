//! Core computation building blocks: buffer statistics, histograms,
//! percentile lookup, and the output-format conversion pipeline. These are
//! the primitives re-exported at the crate root.
pub mod convert;
pub mod histogram;
pub mod params;
pub mod percentile;
pub mod stats;
