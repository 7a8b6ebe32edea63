//! Temporal Feature Builder
//!
//! Turns each item's publish date into a bounded, decaying feature relative
//! to the batch: dates are min-max normalized over the batch's ordinal day
//! range, then sharpened with `exp(-k * (1 - normalized))`. The newest date
//! maps to 1.0 and the oldest to `exp(-k)`.

use chrono::{Datelike, NaiveDate};

/// Temporal features for a batch, in batch order
///
/// Every value lies in `(0, 1]`. A batch whose dates are all identical has no
/// range to normalize over, so every feature is 1.0.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trendscope_engine::temporal::temporal_features;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let features = temporal_features(&[d(1), d(11)], 0.3);
/// assert!((features[0] - (-0.3f64).exp()).abs() < 1e-12);
/// assert_eq!(features[1], 1.0);
/// ```
pub fn temporal_features(dates: &[NaiveDate], steepness: f64) -> Vec<f64> {
    let ordinals: Vec<i64> = dates
        .iter()
        .map(|d| i64::from(d.num_days_from_ce()))
        .collect();

    let (Some(&min), Some(&max)) = (ordinals.iter().min(), ordinals.iter().max()) else {
        return Vec::new();
    };

    if max == min {
        return vec![1.0; ordinals.len()];
    }

    let range = (max - min) as f64;
    ordinals
        .iter()
        .map(|&ordinal| {
            let normalized = (ordinal - min) as f64 / range;
            (-steepness * (1.0 - normalized)).exp()
        })
        .collect()
}
