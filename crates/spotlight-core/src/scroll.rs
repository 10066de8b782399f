#![forbid(unsafe_code)]

//! Scroll position to progress, and scrub smoothing.
//!
//! # Design
//!
//! - [`ScrollRegion`] is the pinned stretch of page scroll over which the
//!   spotlight animation runs. It converts a raw `scroll_y` into progress
//!   clamped to `[0, 1]`.
//! - [`RegionPolicy`] describes how a preset sizes that region from layout
//!   measurements (a fixed number of viewports, or the section's own span).
//! - [`Scrub`] lags the applied progress behind the scroll position with an
//!   exponential catch-up, so a fling settles over `lag` seconds instead of
//!   jumping.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigError, Result, ensure_finite, ensure_positive};

/// Distance below which the scrub snaps onto its target.
pub const SCRUB_SNAP_EPSILON: f64 = 1e-4;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A scroll range in page pixels: `[start_px, start_px + length_px]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    start_px: f64,
    length_px: f64,
}

impl ScrollRegion {
    pub fn new(start_px: f64, length_px: f64) -> Result<Self> {
        let start_px = ensure_finite("region start", start_px)?;
        if !length_px.is_finite() || length_px <= 0.0 {
            return Err(ConfigError::InvalidRegion {
                message: format!("length must be positive, got {length_px}"),
            });
        }
        Ok(Self {
            start_px,
            length_px,
        })
    }

    #[inline]
    #[must_use]
    pub fn start_px(&self) -> f64 {
        self.start_px
    }

    #[inline]
    #[must_use]
    pub fn length_px(&self) -> f64 {
        self.length_px
    }

    /// Fraction of the region traversed at `scroll_y`, clamped to `[0, 1]`.
    ///
    /// NaN scroll positions map to 0.
    #[must_use]
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let raw = self.raw_progress(scroll_y);
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// Unclamped fraction; negative before the region, above 1 past it.
    #[inline]
    #[must_use]
    pub fn raw_progress(&self, scroll_y: f64) -> f64 {
        (scroll_y - self.start_px) / self.length_px
    }
}

/// How a preset sizes its scroll region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionPolicy {
    /// Pinned for a fixed multiple of the viewport height.
    PinnedViewports(f64),
    /// From the section's top reaching the viewport top until its bottom
    /// reaches the viewport bottom.
    SectionSpan,
}

impl RegionPolicy {
    pub fn resolve(
        self,
        section_top: f64,
        section_height: f64,
        viewport_height: f64,
    ) -> Result<ScrollRegion> {
        let viewport_height = ensure_positive("viewport_height", viewport_height)?;
        match self {
            Self::PinnedViewports(count) => {
                ScrollRegion::new(section_top, viewport_height * count)
            }
            Self::SectionSpan => {
                let section_height = ensure_positive("section_height", section_height)?;
                let length = section_height - viewport_height;
                if length <= 0.0 {
                    return Err(ConfigError::InvalidRegion {
                        message: format!(
                            "section height {section_height} does not exceed viewport {viewport_height}"
                        ),
                    });
                }
                ScrollRegion::new(section_top, length)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scrub
// ---------------------------------------------------------------------------

/// Exponential catch-up from the applied progress toward the scroll target.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrub {
    lag_seconds: f64,
    value: f64,
    target: f64,
}

impl Scrub {
    /// `lag_seconds <= 0` (or non-finite) follows the target immediately.
    #[must_use]
    pub fn new(lag_seconds: f64) -> Self {
        Self {
            lag_seconds: if lag_seconds.is_finite() {
                lag_seconds.max(0.0)
            } else {
                0.0
            },
            value: 0.0,
            target: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn lag_seconds(&self) -> f64 {
        self.lag_seconds
    }

    /// Set the progress to approach. Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.value.to_bits() == self.target.to_bits()
    }

    /// Snap both value and target to `progress`.
    pub fn jump_to(&mut self, progress: f64) {
        if progress.is_finite() {
            self.value = progress;
            self.target = progress;
        }
    }

    /// Advance by `dt_seconds` and return the new value.
    pub fn tick(&mut self, dt_seconds: f64) -> f64 {
        if self.is_settled() {
            return self.value;
        }
        if self.lag_seconds <= 0.0 {
            self.value = self.target;
            return self.value;
        }
        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let alpha = 1.0 - (-dt / self.lag_seconds).exp();
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).abs() < SCRUB_SNAP_EPSILON {
            self.value = self.target;
        }
        trace!(value = self.value, target = self.target, "scrub tick");
        self.value
    }
}
