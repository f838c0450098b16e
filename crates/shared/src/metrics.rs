//! Derived display metrics.
//!
//! Pure functions from raw numbers to percentages and labels. All of them are
//! total over their inputs and deterministic, so the views built on top can
//! be tested without a UI.

use crate::results::{Compatibility, Severity};

pub const MIB: u64 = 1024 * 1024;

const EXCELLENT_BELOW: u64 = 10 * MIB;
const GOOD_BELOW: u64 = 50 * MIB;
const LARGE_FILE_ABOVE: u64 = 20 * MIB;

const MIN_SCORE: f64 = 20.0;
const MAX_SCORE: f64 = 100.0;

/// `raised / target * 100`, unclamped. A non-positive target yields 0.
pub fn funding_percentage(raised: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() {
        return 0.0;
    }
    raised / target * 100.0
}

/// Value fed to a progress bar: the percentage capped at 100.
pub fn bar_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.min(100.0)
}

/// Percentage as a 0.0..=1.0 fraction for progress widgets.
pub fn progress_fraction(percentage: f64) -> f32 {
    (bar_percentage(percentage).max(0.0) / 100.0) as f32
}

pub fn size_in_mib(size_bytes: u64) -> f64 {
    size_bytes as f64 / MIB as f64
}

/// "12.34 MB"
pub fn format_mib(size_bytes: u64) -> String {
    format!("{:.2} MB", size_in_mib(size_bytes))
}

/// Never returns [`Compatibility::Poor`]; no size maps to it.
pub fn compatibility_tier(size_bytes: u64) -> Compatibility {
    if size_bytes < EXCELLENT_BELOW {
        Compatibility::Excellent
    } else if size_bytes < GOOD_BELOW {
        Compatibility::Good
    } else {
        Compatibility::Fair
    }
}

/// `100 - MiB * 2`, clamped to `[20, 100]`.
pub fn compatibility_score(size_bytes: u64) -> f64 {
    (MAX_SCORE - size_in_mib(size_bytes) * 2.0).clamp(MIN_SCORE, MAX_SCORE)
}

pub fn memory_estimate_label(size_bytes: u64) -> &'static str {
    if size_bytes < EXCELLENT_BELOW {
        "Low (< 100MB)"
    } else if size_bytes < GOOD_BELOW {
        "Medium (100-200MB)"
    } else {
        "High (> 200MB)"
    }
}

pub fn rendering_estimate_label(size_bytes: u64) -> &'static str {
    if size_bytes < LARGE_FILE_ABOVE {
        "Excellent"
    } else {
        "Good"
    }
}

pub fn animation_estimate_label() -> &'static str {
    "Good (depends on bone count and blend shapes)"
}

pub fn issue_severity(size_bytes: u64) -> Severity {
    if size_bytes > LARGE_FILE_ABOVE {
        Severity::Warning
    } else {
        Severity::Info
    }
}

pub fn size_suggestion(size_bytes: u64) -> &'static str {
    if size_bytes > LARGE_FILE_ABOVE {
        "Consider optimizing textures to reduce memory usage"
    } else {
        "File size is optimal for desktop applications"
    }
}

/// Trend changes above 20 points get the strong badge.
pub fn trend_is_emphasized(change: u8) -> bool {
    change > 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_percentage_unclamped() {
        let pct = funding_percentage(239.34, 100.0);
        assert!((pct - 239.34).abs() < 1e-9);
        assert_eq!(bar_percentage(pct), 100.0);
        assert_eq!(progress_fraction(pct), 1.0);
    }

    #[test]
    fn test_funding_percentage_zero_target() {
        assert_eq!(funding_percentage(10.0, 0.0), 0.0);
        assert_eq!(bar_percentage(f64::NAN), 0.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(compatibility_tier(0), Compatibility::Excellent);
        assert_eq!(compatibility_tier(10 * MIB - 1), Compatibility::Excellent);
        assert_eq!(compatibility_tier(10 * MIB), Compatibility::Good);
        assert_eq!(compatibility_tier(50 * MIB - 1), Compatibility::Good);
        assert_eq!(compatibility_tier(50 * MIB), Compatibility::Fair);
        assert_eq!(compatibility_tier(u64::MAX), Compatibility::Fair);
    }

    #[test]
    fn test_score_bounded_and_non_increasing() {
        let mut previous = f64::INFINITY;
        for mib in 0..200u64 {
            for extra in [0, MIB / 3, MIB / 2] {
                let score = compatibility_score(mib * MIB + extra);
                assert!((20.0..=100.0).contains(&score), "score {score} at {mib} MiB");
                assert!(score <= previous);
                previous = score;
            }
        }
        assert_eq!(compatibility_score(0), 100.0);
        assert_eq!(compatibility_score(5 * MIB), 90.0);
        assert_eq!(compatibility_score(40 * MIB), 20.0);
        assert_eq!(compatibility_score(u64::MAX), 20.0);
    }

    #[test]
    fn test_memory_labels_follow_tiers() {
        assert_eq!(memory_estimate_label(MIB), "Low (< 100MB)");
        assert_eq!(memory_estimate_label(10 * MIB), "Medium (100-200MB)");
        assert_eq!(memory_estimate_label(50 * MIB), "High (> 200MB)");
    }

    #[test]
    fn test_issue_severity_threshold() {
        assert_eq!(issue_severity(20 * MIB), Severity::Info);
        assert_eq!(issue_severity(20 * MIB + 1), Severity::Warning);
        assert_eq!(rendering_estimate_label(19 * MIB), "Excellent");
        assert_eq!(rendering_estimate_label(20 * MIB), "Good");
    }

    #[test]
    fn test_format_mib() {
        assert_eq!(format_mib(0), "0.00 MB");
        assert_eq!(format_mib(MIB + MIB / 4), "1.25 MB");
    }
}
