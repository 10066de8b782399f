#![forbid(unsafe_code)]

//! Literal channel tables for each page and device class.
//!
//! The numbers are tuned by eye for the site and are kept verbatim; none of
//! them is derived from a general rule. The one measured input is the
//! desktop index image travel, which depends on the spotlight container
//! and viewport heights.
//!
//! # Available Presets
//!
//! | Page | Device | Mask | Words | Region | Overlay |
//! |------|--------|------|-------|--------|---------|
//! | [`Page::Index`] | desktop | 0.35–0.95, 0→450% | 0.75–0.95 | 4 viewports | – |
//! | [`Page::Index`] | mobile | 0.25–0.75, 0→200% | 0.75–0.95 | 5 viewports | – |
//! | [`Page::Home`] | both | 0.4–0.9, 0→500% | 0.6–0.9 | section span | mobile only |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::ChannelConfig;
use crate::device::DeviceClass;
use crate::error::{Result, ensure_positive};
use crate::mapper::{ChannelTable, OverlayConfig};
use crate::scroll::RegionPolicy;
use crate::window::PhaseWindow;
use crate::words::WordRevealConfig;

/// Initial downward offset of the image column, as a share of its height.
pub const INITIAL_OFFSET_RATIO: f64 = 0.05;

/// Which page layout the animation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Four-column landing page with a pinned spotlight section.
    Index,
    /// Three-column home page; the section scrolls unpinned.
    Home,
}

/// Layout measurements taken once at initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    container_height: f64,
    viewport_height: f64,
}

impl LayoutMetrics {
    /// Both heights must be finite and positive.
    pub fn new(container_height: f64, viewport_height: f64) -> Result<Self> {
        Ok(Self {
            container_height: ensure_positive("container_height", container_height)?,
            viewport_height: ensure_positive("viewport_height", viewport_height)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    #[inline]
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Pixels the image column travels: container, initial offset, viewport.
    #[must_use]
    pub fn total_movement(&self) -> f64 {
        self.container_height + self.container_height * INITIAL_OFFSET_RATIO + self.viewport_height
    }
}

/// A channel table plus the driver settings that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightPreset {
    pub table: ChannelTable,
    pub region: RegionPolicy,
    /// Catch-up lag of the main animation, in seconds.
    pub scrub_seconds: f64,
    /// Catch-up lag of the overlay, when the table has one.
    pub overlay_scrub_seconds: Option<f64>,
}

fn linear(start: f64, end: f64, from: f64, to: f64) -> Result<ChannelConfig> {
    ChannelConfig::new(PhaseWindow::new(start, end)?, from, to)
}

fn words(start: f64, end: f64) -> Result<WordRevealConfig> {
    Ok(WordRevealConfig::new(PhaseWindow::new(start, end)?, 0))
}

/// Build the preset for `page` on `device`.
///
/// The word count starts at zero; set it with
/// [`ProgressMapper::with_word_count`](crate::ProgressMapper::with_word_count)
/// once the header has been split.
pub fn preset(page: Page, device: DeviceClass, metrics: LayoutMetrics) -> Result<SpotlightPreset> {
    let preset = match (page, device) {
        (Page::Index, DeviceClass::Desktop) => {
            let end_y = -(metrics.total_movement() / metrics.container_height()) * 100.0;
            SpotlightPreset {
                table: ChannelTable {
                    image_translate_y: linear(0.0, 0.5, 5.0, end_y)?,
                    mask_size: linear(0.35, 0.95, 0.0, 450.0)?,
                    image_scale: linear(0.35, 0.95, 1.5, 1.0)?,
                    words: words(0.75, 0.95)?,
                    overlay: None,
                },
                region: RegionPolicy::PinnedViewports(4.0),
                scrub_seconds: 0.2,
                overlay_scrub_seconds: None,
            }
        }
        (Page::Index, DeviceClass::Mobile) => SpotlightPreset {
            table: ChannelTable {
                image_translate_y: linear(0.0, 0.5, 0.0, -50.0)?,
                mask_size: linear(0.25, 0.75, 0.0, 200.0)?,
                image_scale: linear(0.25, 0.75, 1.2, 1.0)?,
                words: words(0.75, 0.95)?,
                overlay: None,
            },
            region: RegionPolicy::PinnedViewports(5.0),
            scrub_seconds: 0.3,
            overlay_scrub_seconds: None,
        },
        (Page::Home, device) => {
            let overlay = if device.is_mobile() {
                Some(OverlayConfig {
                    translate_y: linear(0.0, 1.0, 0.0, -100.0)?,
                })
            } else {
                None
            };
            SpotlightPreset {
                overlay_scrub_seconds: overlay.map(|_| 0.5),
                table: ChannelTable {
                    image_translate_y: linear(0.0, 0.8, 0.0, -200.0)?,
                    mask_size: linear(0.4, 0.9, 0.0, 500.0)?,
                    image_scale: linear(0.4, 0.9, 1.5, 1.0)?,
                    words: words(0.6, 0.9)?,
                    overlay,
                },
                region: RegionPolicy::SectionSpan,
                scrub_seconds: 1.0,
            }
        }
    };
    debug!(?page, %device, scrub = preset.scrub_seconds, "spotlight preset selected");
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProgressMapper;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics::new(2000.0, 1000.0).unwrap()
    }

    #[test]
    fn zero_container_height_fails() {
        assert!(LayoutMetrics::new(0.0, 900.0).is_err());
        assert!(LayoutMetrics::new(1200.0, f64::NAN).is_err());
    }

    #[test]
    fn desktop_index_travel_uses_layout() {
        let p = preset(Page::Index, DeviceClass::Desktop, metrics()).unwrap();
        // (2000 + 100 + 1000) / 2000 * 100
        assert!((p.table.image_translate_y.to_value() + 155.0).abs() < 1e-9);
        assert_eq!(p.table.image_translate_y.from_value(), 5.0);
        assert_eq!(p.region, RegionPolicy::PinnedViewports(4.0));
    }

    #[test]
    fn mobile_index_is_gentler() {
        let p = preset(Page::Index, DeviceClass::Mobile, metrics()).unwrap();
        assert_eq!(p.table.mask_size.to_value(), 200.0);
        assert_eq!(p.table.image_scale.from_value(), 1.2);
        assert_eq!(p.scrub_seconds, 0.3);
    }

    #[test]
    fn home_overlay_only_on_mobile() {
        let desktop = preset(Page::Home, DeviceClass::Desktop, metrics()).unwrap();
        let mobile = preset(Page::Home, DeviceClass::Mobile, metrics()).unwrap();
        assert!(desktop.table.overlay.is_none());
        assert_eq!(desktop.overlay_scrub_seconds, None);
        assert!(mobile.table.overlay.is_some());
        assert_eq!(mobile.overlay_scrub_seconds, Some(0.5));
        assert_eq!(mobile.table.image_translate_y, desktop.table.image_translate_y);
    }

    #[test]
    fn every_preset_builds_a_mapper() {
        for page in [Page::Index, Page::Home] {
            for device in [DeviceClass::Desktop, DeviceClass::Mobile] {
                let p = preset(page, device, metrics()).unwrap();
                assert!(ProgressMapper::new(p.table).is_ok(), "{page:?}/{device}");
            }
        }
    }
}
