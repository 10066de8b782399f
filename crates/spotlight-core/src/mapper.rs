#![forbid(unsafe_code)]

//! ProgressMapper: one scalar progress in, one [`VisualSnapshot`] out.
//!
//! The mapper owns an immutable, validated [`ChannelTable`]. Every call to
//! [`ProgressMapper::evaluate`] is an independent pure function of the
//! progress sample and the table; no history is kept between calls.
//!
//! # Usage
//!
//! ```ignore
//! use spotlight_core::{ProgressMapper, Page, DeviceClass, LayoutMetrics, preset};
//!
//! let metrics = LayoutMetrics::new(2400.0, 900.0)?;
//! let table = preset(Page::Index, DeviceClass::Desktop, metrics)?.table;
//! let mapper = ProgressMapper::new(table)?;
//! let snap = mapper.evaluate(0.65);
//! assert!((snap.mask_size_percent - 225.0).abs() < 1e-9);
//! ```
//!
//! # Invariants
//!
//! 1. A constructed mapper always holds a table that passed
//!    [`ChannelTable::validate`].
//! 2. `evaluate` never panics, for any `f64` including NaN and infinities.
//! 3. Progress outside `[0, 1]` yields the same snapshot as the nearest
//!    endpoint.
//! 4. Work per call is O(channels + words).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::channel::{Channel, ChannelConfig, RawChannel};
use crate::error::{ConfigError, Result};
use crate::snapshot::VisualSnapshot;
use crate::window::{RawWindow, WindowPosition};
use crate::words::WordRevealConfig;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Secondary overlay channel, sampled from its own trigger region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub translate_y: ChannelConfig,
}

/// Resolved state of the overlay channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayTransform {
    /// Progress fell back below the overlay window; clear the transform.
    Reset,
    /// Offset in viewport-height units.
    TranslateY { viewport_percent: f64 },
}

/// Every channel the mapper resolves, for one page and device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct ChannelTable {
    pub image_translate_y: ChannelConfig,
    pub mask_size: ChannelConfig,
    pub image_scale: ChannelConfig,
    pub words: WordRevealConfig,
    pub overlay: Option<OverlayConfig>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    image_translate_y: RawChannel,
    mask_size: RawChannel,
    image_scale: RawChannel,
    words: RawWords,
    #[serde(default)]
    overlay: Option<RawOverlay>,
}

#[derive(Debug, Deserialize)]
struct RawWords {
    window: RawWindow,
    #[serde(default)]
    word_count: usize,
}

#[derive(Debug, Deserialize)]
struct RawOverlay {
    translate_y: RawChannel,
}

impl TryFrom<RawTable> for ChannelTable {
    type Error = ConfigError;

    fn try_from(raw: RawTable) -> Result<Self> {
        let overlay = match raw.overlay {
            Some(o) => Some(OverlayConfig {
                translate_y: o.translate_y.try_into()?,
            }),
            None => None,
        };
        let table = Self {
            image_translate_y: raw.image_translate_y.try_into()?,
            mask_size: raw.mask_size.try_into()?,
            image_scale: raw.image_scale.try_into()?,
            words: WordRevealConfig::new(raw.words.window.try_into()?, raw.words.word_count),
            overlay,
        };
        table.validate()?;
        Ok(table)
    }
}

impl ChannelTable {
    /// Check what the channel types cannot enforce on their own: every
    /// `to - from` must be representable.
    ///
    /// Windows and endpoint values are validated by their constructors.
    pub fn validate(&self) -> Result<()> {
        for (channel, config) in self.scalar_channels() {
            if config.range().is_none() {
                return Err(ConfigError::RangeOverflow {
                    field: channel.as_str(),
                    from: config.from_value(),
                    to: config.to_value(),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON table.
    ///
    /// Malformed JSON yields [`ConfigError::Parse`]; well-formed JSON with a
    /// bad window or value yields the structural variant.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn scalar_channels(&self) -> impl Iterator<Item = (Channel, &ChannelConfig)> {
        [
            (Channel::ImageTranslateY, &self.image_translate_y),
            (Channel::MaskSize, &self.mask_size),
            (Channel::ImageScale, &self.image_scale),
        ]
        .into_iter()
        .chain(
            self.overlay
                .as_ref()
                .map(|o| (Channel::OverlayTranslateY, &o.translate_y)),
        )
    }
}

// ---------------------------------------------------------------------------
// Mapper
// ---------------------------------------------------------------------------

/// Pure progress-to-snapshot evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressMapper {
    table: ChannelTable,
}

impl ProgressMapper {
    /// Validate `table` and build a mapper. On error no mapper exists.
    pub fn new(table: ChannelTable) -> Result<Self> {
        table.validate()?;
        debug!(
            words = table.words.word_count,
            overlay = table.overlay.is_some(),
            mask_start = table.mask_size.window().start(),
            mask_end = table.mask_size.window().end(),
            "progress mapper configured"
        );
        Ok(Self { table })
    }

    /// Same table with a different header word count (builder pattern).
    #[must_use]
    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.table.words.word_count = word_count;
        self
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &ChannelTable {
        &self.table
    }

    /// Resolve every channel at `progress`.
    #[must_use]
    pub fn evaluate(&self, progress: f64) -> VisualSnapshot {
        if !progress.is_finite() {
            warn!(progress, "non-finite progress sample");
        } else if !(0.0..=1.0).contains(&progress) {
            trace!(progress, "progress outside [0, 1], clamping to endpoints");
        }

        let t = &self.table;
        let snapshot = VisualSnapshot {
            image_translate_y_percent: t.image_translate_y.resolve(progress),
            mask_size_percent: t.mask_size.resolve(progress),
            image_scale: t.image_scale.resolve(progress),
            words: t.words.reveal(progress),
        };
        trace!(
            progress,
            y = snapshot.image_translate_y_percent,
            mask = snapshot.mask_size_percent,
            scale = snapshot.image_scale,
            "evaluated"
        );
        snapshot
    }

    /// Resolve the overlay channel from its own progress sample.
    ///
    /// Returns `None` when the table has no overlay.
    #[must_use]
    pub fn evaluate_overlay(&self, progress: f64) -> Option<OverlayTransform> {
        let overlay = self.table.overlay.as_ref()?;
        let channel = &overlay.translate_y;
        Some(match channel.window().position(progress) {
            WindowPosition::Before => OverlayTransform::Reset,
            WindowPosition::Inside | WindowPosition::After => OverlayTransform::TranslateY {
                viewport_percent: channel.resolve(progress),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
