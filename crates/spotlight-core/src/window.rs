#![forbid(unsafe_code)]

//! Phase windows: the progress sub-range over which one channel animates.
//!
//! A [`PhaseWindow`] is a validated `[start, end]` interval inside `[0, 1]`.
//! It converts a global progress sample into window-local progress.
//!
//! # Invariants
//!
//! 1. `0.0 <= start < end <= 1.0`, both finite (checked at construction and
//!    on deserialization).
//! 2. [`PhaseWindow::normalize`] always returns a value in `[0.0, 1.0]`,
//!    exactly `0.0` at or below `start` and exactly `1.0` at or above `end`.
//!
//! # Failure Modes
//!
//! - NaN progress: treated as "before the window".
//! - Infinite progress: resolves to the nearest endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Where a progress sample sits relative to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Strictly before `start` (or NaN).
    Before,
    /// Within `[start, end]`, inclusive on both ends.
    Inside,
    /// Strictly after `end`.
    After,
}

/// A validated `[start, end]` progress interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct PhaseWindow {
    start: f64,
    end: f64,
}

/// Unvalidated window as it appears in serialized tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RawWindow {
    pub(crate) start: f64,
    pub(crate) end: f64,
}

impl TryFrom<RawWindow> for PhaseWindow {
    type Error = ConfigError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl From<PhaseWindow> for RawWindow {
    fn from(window: PhaseWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

impl PhaseWindow {
    /// The whole progress range.
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    /// Build a window, rejecting inverted, empty, non-finite, or
    /// out-of-range bounds.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "window",
                value: if start.is_finite() { end } else { start },
            });
        }
        if start >= end {
            return Err(ConfigError::InvertedWindow { start, end });
        }
        if start < 0.0 || end > 1.0 {
            return Err(ConfigError::WindowOutOfRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Width of the window; always positive.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn position(&self, progress: f64) -> WindowPosition {
        if progress > self.end {
            WindowPosition::After
        } else if progress >= self.start {
            WindowPosition::Inside
        } else {
            WindowPosition::Before
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, progress: f64) -> bool {
        self.position(progress) == WindowPosition::Inside
    }

    /// Window-local progress in `[0, 1]`.
    #[must_use]
    pub fn normalize(&self, progress: f64) -> f64 {
        match self.position(progress) {
            WindowPosition::Before => 0.0,
            WindowPosition::After => 1.0,
            WindowPosition::Inside if progress >= self.end => 1.0,
            WindowPosition::Inside => ((progress - self.start) / self.span()).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64) -> PhaseWindow {
        PhaseWindow::new(start, end).unwrap()
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert_eq!(
            PhaseWindow::new(0.9, 0.6),
            Err(ConfigError::InvertedWindow {
                start: 0.9,
                end: 0.6
            })
        );
    }

    #[test]
    fn empty_window_is_rejected() {
        assert!(matches!(
            PhaseWindow::new(0.5, 0.5),
            Err(ConfigError::InvertedWindow { .. })
        ));
    }

    #[test]
    fn out_of_range_window_is_rejected() {
        assert!(matches!(
            PhaseWindow::new(-0.1, 0.5),
            Err(ConfigError::WindowOutOfRange { .. })
        ));
        assert!(matches!(
            PhaseWindow::new(0.5, 1.2),
            Err(ConfigError::WindowOutOfRange { .. })
        ));
    }

    #[test]
    fn nan_bound_is_rejected() {
        assert!(matches!(
            PhaseWindow::new(f64::NAN, 0.5),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn normalize_hits_endpoints_exactly() {
        let w = window(0.35, 0.95);
        assert_eq!(w.normalize(0.35), 0.0);
        assert_eq!(w.normalize(0.95), 1.0);
        assert_eq!(w.normalize(0.0), 0.0);
        assert_eq!(w.normalize(1.0), 1.0);
    }

    #[test]
    fn normalize_midpoint() {
        let w = window(0.6, 0.9);
        assert!((w.normalize(0.75) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn normalize_handles_non_finite_progress() {
        let w = window(0.2, 0.4);
        assert_eq!(w.normalize(f64::NAN), 0.0);
        assert_eq!(w.normalize(f64::NEG_INFINITY), 0.0);
        assert_eq!(w.normalize(f64::INFINITY), 1.0);
    }

    #[test]
    fn position_is_inclusive_on_both_ends() {
        let w = window(0.25, 0.75);
        assert_eq!(w.position(0.2499), WindowPosition::Before);
        assert_eq!(w.position(0.25), WindowPosition::Inside);
        assert_eq!(w.position(0.75), WindowPosition::Inside);
        assert_eq!(w.position(0.7501), WindowPosition::After);
        assert!(w.contains(0.5));
    }

    #[test]
    fn deserialization_validates() {
        let ok: PhaseWindow = serde_json::from_str(r#"{"start":0.1,"end":0.2}"#).unwrap();
        assert_eq!(ok, window(0.1, 0.2));
        assert!(serde_json::from_str::<PhaseWindow>(r#"{"start":0.3,"end":0.2}"#).is_err());
    }
}
