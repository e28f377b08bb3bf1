// =============================================================================
// Volume Ratio
// =============================================================================
//
//   ratio = latest volume / SMA(volume, 20)
//
// A ratio above 2.0 marks a volume spike.

use super::ma::{latest_or_zero, sma};

pub const VOLUME_PERIOD: usize = 20;

/// Volume SMA and the ratio of the latest volume to it.
///
/// A zero (or empty) volume average yields a ratio of 0.0 so that no spike
/// is ever reported on dead volume.
pub fn calculate_volume_ratio(volumes: &[f64]) -> (f64, f64) {
    let avg = sma(volumes, VOLUME_PERIOD);
    let ratio = if avg == 0.0 {
        0.0
    } else {
        latest_or_zero(volumes) / avg
    };
    (avg, ratio)
}
