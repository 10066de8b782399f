#![forbid(unsafe_code)]

//! Scalar visual channels and their linear interpolation.
//!
//! A [`ChannelConfig`] couples a [`PhaseWindow`] with a `(from, to)` value
//! pair. Resolution is a three-branch piecewise function of progress:
//! `from` before the window, `to` after it, a linear blend inside.
//!
//! The blended value is clamped to the closed interval spanned by `from`
//! and `to`, so rounding can never push it past either endpoint and the
//! output stays monotonic in progress. When `to - from` is not
//! representable the blend is weighted per endpoint instead; the result is
//! still finite and exact at both window edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ensure_finite};
use crate::window::{PhaseWindow, RawWindow, WindowPosition};

/// Named visual channels produced by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Vertical offset of the image column, in percent of its own height.
    ImageTranslateY,
    /// Mask/clip size of the reveal container, in percent.
    MaskSize,
    /// Uniform scale of the masked image.
    ImageScale,
    /// Vertical offset of the secondary overlay, in viewport-height units.
    OverlayTranslateY,
}

impl Channel {
    pub const SCALAR: [Self; 3] = [Self::ImageTranslateY, Self::MaskSize, Self::ImageScale];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImageTranslateY => "image_translate_y",
            Self::MaskSize => "mask_size",
            Self::ImageScale => "image_scale",
            Self::OverlayTranslateY => "overlay_translate_y",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpolation curve applied inside a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
}

impl Interpolation {
    /// Map window-local progress `t` in `[0, 1]` onto the curve.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
        }
    }
}

/// One channel's window and value range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChannel", into = "RawChannel")]
pub struct ChannelConfig {
    window: PhaseWindow,
    from: f64,
    to: f64,
    interpolation: Interpolation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RawChannel {
    window: RawWindow,
    from: f64,
    to: f64,
    #[serde(default)]
    interpolation: Interpolation,
}

impl TryFrom<RawChannel> for ChannelConfig {
    type Error = ConfigError;

    fn try_from(raw: RawChannel) -> Result<Self> {
        let window = PhaseWindow::try_from(raw.window)?;
        Ok(Self::new(window, raw.from, raw.to)?.interpolation(raw.interpolation))
    }
}

impl From<ChannelConfig> for RawChannel {
    fn from(config: ChannelConfig) -> Self {
        Self {
            window: config.window.into(),
            from: config.from,
            to: config.to,
            interpolation: config.interpolation,
        }
    }
}

impl ChannelConfig {
    /// Linear channel from `from` to `to` over `window`.
    pub fn new(window: PhaseWindow, from: f64, to: f64) -> Result<Self> {
        Ok(Self {
            window,
            from: ensure_finite("from", from)?,
            to: ensure_finite("to", to)?,
            interpolation: Interpolation::Linear,
        })
    }

    /// Set the interpolation curve (builder pattern).
    #[must_use]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> PhaseWindow {
        self.window
    }

    #[inline]
    #[must_use]
    pub fn from_value(&self) -> f64 {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn to_value(&self) -> f64 {
        self.to
    }

    /// `to - from`, or `None` when it overflows `f64`.
    #[must_use]
    pub fn range(&self) -> Option<f64> {
        let range = self.to - self.from;
        range.is_finite().then_some(range)
    }

    /// Resolve the channel value for a progress sample. Total over `f64`.
    #[must_use]
    pub fn resolve(&self, progress: f64) -> f64 {
        match self.window.position(progress) {
            WindowPosition::Before => self.from,
            WindowPosition::After => self.to,
            WindowPosition::Inside => {
                let t = self.interpolation.apply(self.window.normalize(progress));
                if t <= 0.0 {
                    return self.from;
                }
                if t >= 1.0 {
                    return self.to;
                }
                let value = match self.range() {
                    Some(range) => self.from + t * range,
                    None => self.from * (1.0 - t) + self.to * t,
                };
                let (lo, hi) = if self.from <= self.to {
                    (self.from, self.to)
                } else {
                    (self.to, self.from)
                };
                value.clamp(lo, hi)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(start: f64, end: f64, from: f64, to: f64) -> ChannelConfig {
        ChannelConfig::new(PhaseWindow::new(start, end).unwrap(), from, to).unwrap()
    }

    #[test]
    fn before_window_yields_from() {
        let c = channel(0.35, 0.95, 0.0, 450.0);
        assert_eq!(c.resolve(0.1), 0.0);
        assert_eq!(c.resolve(-3.0), 0.0);
    }

    #[test]
    fn after_window_yields_to() {
        let c = channel(0.35, 0.95, 0.0, 450.0);
        assert_eq!(c.resolve(0.99), 450.0);
        assert_eq!(c.resolve(7.0), 450.0);
    }

    #[test]
    fn endpoints_are_exact() {
        let c = channel(0.35, 0.95, 1.5, 1.0);
        assert_eq!(c.resolve(0.35), 1.5);
        assert_eq!(c.resolve(0.95), 1.0);
    }

    #[test]
    fn midpoint_mask_size() {
        let c = channel(0.35, 0.95, 0.0, 450.0);
        assert!((c.resolve(0.65) - 225.0).abs() < 1e-9);
    }

    #[test]
    fn decreasing_channel_midpoint() {
        let c = channel(0.35, 0.95, 1.5, 1.0);
        assert!((c.resolve(0.65) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn nan_progress_resolves_to_from() {
        let c = channel(0.0, 0.5, 5.0, -150.0);
        assert_eq!(c.resolve(f64::NAN), 5.0);
    }

    #[test]
    fn extreme_range_stays_finite() {
        let c = channel(0.2, 0.8, -1.7e308, 1.7e308);
        assert_eq!(c.range(), None);
        assert_eq!(c.resolve(0.2), -1.7e308);
        assert_eq!(c.resolve(0.8), 1.7e308);
        let mid = c.resolve(0.5);
        assert!(mid.is_finite());
        assert!(mid.abs() < 1e300, "{mid}");
    }

    #[test]
    fn representable_range_is_reported() {
        assert_eq!(channel(0.0, 1.0, 1.5, 1.0).range(), Some(-0.5));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let w = PhaseWindow::FULL;
        assert!(ChannelConfig::new(w, f64::INFINITY, 0.0).is_err());
        assert!(ChannelConfig::new(w, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn channel_names_are_stable() {
        assert_eq!(Channel::MaskSize.to_string(), "mask_size");
        assert_eq!(
            serde_json::to_string(&Channel::ImageTranslateY).unwrap(),
            "\"image_translate_y\""
        );
    }

    #[test]
    fn serde_defaults_to_linear() {
        let c: ChannelConfig =
            serde_json::from_str(r#"{"window":{"start":0.0,"end":1.0},"from":0.0,"to":2.0}"#)
                .unwrap();
        assert_eq!(c.interpolation, Interpolation::Linear);
        assert_eq!(c.resolve(0.5), 1.0);
    }
}
