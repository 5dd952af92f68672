// ── LED brightness ──
//
// The hub stores LED levels on 0-255; people see and type 0-100.
// This type owns both scales and the rounding between them, so the
// conversion factor (2.55) lives in exactly one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// LED output level on the hub's 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(255);

    /// Wrap a raw 0-255 level.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Build from a wire-level integer, clamping out-of-range values.
    pub fn from_wire(raw: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(raw.clamp(0, 255) as u8)
    }

    /// Build from a user-facing percentage.
    ///
    /// Values above 100 are rejected with a validation error rather than
    /// silently clamped or sent through as garbage -- user input reaches
    /// this point unchecked.
    pub fn from_percent(percent: u8) -> Result<Self, CoreError> {
        if percent > 100 {
            return Err(CoreError::ValidationFailed {
                message: format!("brightness must be between 0 and 100, got {percent}"),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self((f64::from(percent) * 2.55).round() as u8))
    }

    /// The raw 0-255 level, as transmitted to the hub.
    pub fn raw(self) -> u8 {
        self.0
    }

    /// The user-facing percentage.
    pub fn percent(self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (f64::from(self.0) / 2.55).round() as u8;
        pct
    }

    /// Step the level by a signed percentage delta, saturating at 0/100.
    pub fn step_percent(self, delta: i8) -> Self {
        let next = i16::from(self.percent()) + i16::from(delta);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let next = next.clamp(0, 100) as u8;
        // Safe: next is within 0..=100.
        Self::from_percent(next).unwrap_or(self)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn percent_to_raw_anchors() {
        assert_eq!(Brightness::from_percent(0).unwrap().raw(), 0);
        assert_eq!(Brightness::from_percent(50).unwrap().raw(), 128);
        assert_eq!(Brightness::from_percent(100).unwrap().raw(), 255);
    }

    #[test]
    fn raw_to_percent_anchors() {
        assert_eq!(Brightness::from_raw(0).percent(), 0);
        assert_eq!(Brightness::from_raw(128).percent(), 50);
        assert_eq!(Brightness::from_raw(255).percent(), 100);
    }

    #[test]
    fn percent_round_trips_for_every_value() {
        for pct in 0..=100u8 {
            let b = Brightness::from_percent(pct).unwrap();
            assert_eq!(b.percent(), pct, "round trip failed at {pct}");
        }
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        assert!(matches!(
            Brightness::from_percent(101),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn wire_values_are_clamped() {
        assert_eq!(Brightness::from_wire(-5).raw(), 0);
        assert_eq!(Brightness::from_wire(300).raw(), 255);
        assert_eq!(Brightness::from_wire(128).raw(), 128);
    }

    #[test]
    fn stepping_saturates() {
        assert_eq!(Brightness::OFF.step_percent(-5).percent(), 0);
        assert_eq!(Brightness::FULL.step_percent(5).percent(), 100);
        assert_eq!(Brightness::from_percent(50).unwrap().step_percent(5).percent(), 55);
    }
}
