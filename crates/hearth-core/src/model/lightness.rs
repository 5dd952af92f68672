// ── Ambient light readings ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw ambient light sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lightness(pub i64);

impl Lightness {
    /// Bucket the raw value into a human-readable level.
    pub fn level(self) -> LightnessLevel {
        LightnessLevel::from_raw(self.0)
    }
}

impl fmt::Display for Lightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level().label())
    }
}

/// The five dashboard buckets for ambient light.
///
/// Thresholds match the hub dashboard: below 40 is total darkness, then
/// 800 / 2000 / 3200 mark the remaining transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LightnessLevel {
    TotalDarkness,
    Dark,
    Moderate,
    Bright,
    VeryBright,
}

impl LightnessLevel {
    /// Total over all integers -- every reading lands in a bucket.
    pub fn from_raw(raw: i64) -> Self {
        if raw < 40 {
            Self::TotalDarkness
        } else if raw < 800 {
            Self::Dark
        } else if raw < 2000 {
            Self::Moderate
        } else if raw < 3200 {
            Self::Bright
        } else {
            Self::VeryBright
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TotalDarkness => "total darkness",
            Self::Dark => "dark",
            Self::Moderate => "moderate light",
            Self::Bright => "bright",
            Self::VeryBright => "very bright",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_exact() {
        let cases = [
            (39, LightnessLevel::TotalDarkness),
            (40, LightnessLevel::Dark),
            (799, LightnessLevel::Dark),
            (800, LightnessLevel::Moderate),
            (1999, LightnessLevel::Moderate),
            (2000, LightnessLevel::Bright),
            (3199, LightnessLevel::Bright),
            (3200, LightnessLevel::VeryBright),
        ];
        for (raw, expected) in cases {
            assert_eq!(LightnessLevel::from_raw(raw), expected, "at {raw}");
        }
    }

    #[test]
    fn function_is_total_at_the_extremes() {
        assert_eq!(
            LightnessLevel::from_raw(i64::MIN),
            LightnessLevel::TotalDarkness
        );
        assert_eq!(LightnessLevel::from_raw(i64::MAX), LightnessLevel::VeryBright);
    }
}
