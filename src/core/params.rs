use serde::{Deserialize, Serialize};

/// Auto-ranging parameters for the output conversion pipeline, suitable for
/// config files and presets.
///
/// Passed explicitly by the caller; the crate keeps no process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Percentile pinned to 0 when collapsing deep buffers to bytes.
    pub low_pct: f32,
    /// Percentile pinned to 255 when collapsing deep buffers to bytes.
    pub high_pct: f32,
    /// Bin count for float-domain percentile histograms.
    pub hist_bins: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            low_pct: 1.0,
            high_pct: 99.0,
            hist_bins: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_1_99_window() {
        let opts = ConversionOptions::default();
        assert_eq!(opts.low_pct, 1.0);
        assert_eq!(opts.high_pct, 99.0);
        assert_eq!(opts.hist_bins, 256);
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts = ConversionOptions {
            low_pct: 2.0,
            high_pct: 98.0,
            hist_bins: 512,
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: ConversionOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }
}
