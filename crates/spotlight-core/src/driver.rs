#![forbid(unsafe_code)]

//! Explicit single-threaded sampling loop.
//!
//! The host pushes scroll positions with [`SpotlightDriver::on_scroll`] and
//! asks for one frame per animation tick with [`SpotlightDriver::frame`].
//! Each frame advances the scrub, evaluates the mapper, and diffs the new
//! snapshot against the last one handed to the renderer. Only changed
//! channels come back, so an idle page produces empty frames.
//!
//! Each frame:
//! 1. Feed scroll positions via [`SpotlightDriver::on_scroll`] (any number
//!    between frames; the last one wins).
//! 2. Call [`SpotlightDriver::frame`] with the elapsed time.
//! 3. Apply the returned [`FrameOutput`].

use tracing::{debug, trace};

use crate::mapper::{OverlayTransform, ProgressMapper};
use crate::presets::SpotlightPreset;
use crate::scroll::{ScrollRegion, Scrub};
use crate::snapshot::{SnapshotDelta, VisualSnapshot};

/// What changed this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Scrubbed progress the snapshot was evaluated at.
    pub progress: f64,
    pub delta: SnapshotDelta,
    /// New overlay state, only when it changed since the last frame.
    pub overlay: Option<OverlayTransform>,
}

impl FrameOutput {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty() && self.overlay.is_none()
    }
}

#[derive(Debug, Clone)]
struct OverlayTrack {
    region: ScrollRegion,
    scrub: Scrub,
    /// Unclamped progress of the last scroll sample.
    raw: f64,
    last: Option<OverlayTransform>,
}

/// Owns the mapper, scroll regions, scrubs and the last applied snapshot.
#[derive(Debug, Clone)]
pub struct SpotlightDriver {
    mapper: ProgressMapper,
    region: ScrollRegion,
    scrub: Scrub,
    overlay: Option<OverlayTrack>,
    last_applied: Option<VisualSnapshot>,
}

impl SpotlightDriver {
    #[must_use]
    pub fn new(mapper: ProgressMapper, region: ScrollRegion, scrub_seconds: f64) -> Self {
        debug!(
            start_px = region.start_px(),
            length_px = region.length_px(),
            scrub_seconds,
            "spotlight driver created"
        );
        Self {
            mapper,
            region,
            scrub: Scrub::new(scrub_seconds),
            overlay: None,
            last_applied: None,
        }
    }

    /// Driver for a preset whose region has already been resolved.
    #[must_use]
    pub fn from_preset(
        mapper: ProgressMapper,
        preset: &SpotlightPreset,
        region: ScrollRegion,
    ) -> Self {
        Self::new(mapper, region, preset.scrub_seconds)
    }

    /// Attach the overlay trigger region (builder pattern).
    ///
    /// Has no visible effect when the mapper's table carries no overlay.
    #[must_use]
    pub fn with_overlay(mut self, region: ScrollRegion, scrub_seconds: f64) -> Self {
        self.overlay = Some(OverlayTrack {
            region,
            scrub: Scrub::new(scrub_seconds),
            raw: 0.0,
            last: None,
        });
        self
    }

    #[inline]
    #[must_use]
    pub fn mapper(&self) -> &ProgressMapper {
        &self.mapper
    }

    #[inline]
    #[must_use]
    pub fn last_applied(&self) -> Option<&VisualSnapshot> {
        self.last_applied.as_ref()
    }

    /// Record a scroll position for the next frame.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrub.set_target(self.region.progress(scroll_y));
        if let Some(track) = self.overlay.as_mut() {
            let raw = track.region.raw_progress(scroll_y);
            if raw.is_finite() {
                track.raw = raw;
                track.scrub.set_target(raw.clamp(0.0, 1.0));
                if raw < 0.0 {
                    track.scrub.jump_to(0.0);
                }
            }
        }
    }

    /// Replace the header word count and force a full redraw.
    pub fn set_word_count(&mut self, word_count: usize) {
        self.mapper = self.mapper.clone().with_word_count(word_count);
        self.invalidate();
    }

    /// Forget what was applied; the next frame reports every channel.
    pub fn invalidate(&mut self) {
        self.last_applied = None;
        if let Some(track) = self.overlay.as_mut() {
            track.last = None;
        }
    }

    /// True when scrubs have settled and the current state is applied.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.last_applied.is_some()
            && self.scrub.is_settled()
            && self
                .overlay
                .as_ref()
                .is_none_or(|t| t.scrub.is_settled() && t.last.is_some())
    }

    /// Advance by `dt_seconds` and return what changed.
    pub fn frame(&mut self, dt_seconds: f64) -> FrameOutput {
        let progress = self.scrub.tick(dt_seconds);
        let snapshot = self.mapper.evaluate(progress);
        let delta = snapshot.diff(self.last_applied.as_ref());
        self.last_applied = Some(snapshot);

        let overlay = match self.overlay.as_mut() {
            Some(track) => {
                let sample = if track.raw < 0.0 {
                    track.raw
                } else {
                    track.scrub.tick(dt_seconds)
                };
                let next = self.mapper.evaluate_overlay(sample);
                if next.is_some() && next != track.last {
                    track.last = next;
                    next
                } else {
                    None
                }
            }
            None => None,
        };

        trace!(
            progress,
            changed = delta.scalars.len(),
            words = delta.words.len(),
            "frame"
        );
        FrameOutput {
            progress,
            delta,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::device::DeviceClass;
    use crate::presets::{LayoutMetrics, Page, preset};

    fn index_driver(scrub: f64) -> SpotlightDriver {
        let metrics = LayoutMetrics::new(2000.0, 1000.0).unwrap();
        let p = preset(Page::Index, DeviceClass::Desktop, metrics).unwrap();
        let mapper = ProgressMapper::new(p.table).unwrap().with_word_count(4);
        let region = ScrollRegion::new(0.0, 4000.0).unwrap();
        SpotlightDriver::new(mapper, region, scrub)
    }

    fn home_mobile_driver() -> SpotlightDriver {
        let metrics = LayoutMetrics::new(2000.0, 1000.0).unwrap();
        let p = preset(Page::Home, DeviceClass::Mobile, metrics).unwrap();
        let mapper = ProgressMapper::new(p.table).unwrap();
        SpotlightDriver::new(mapper, ScrollRegion::new(0.0, 2000.0).unwrap(), 0.0)
            .with_overlay(ScrollRegion::new(5000.0, 1000.0).unwrap(), 0.0)
    }

    #[test]
    fn first_frame_reports_everything() {
        let mut d = index_driver(0.0);
        let out = d.frame(1.0 / 60.0);
        assert_eq!(out.delta.scalars.len(), 3);
        assert_eq!(out.delta.words.len(), 4);
        assert!(d.is_idle());
    }

    #[test]
    fn unchanged_frame_is_empty() {
        let mut d = index_driver(0.0);
        d.frame(0.016);
        assert!(d.frame(0.016).is_empty());
    }

    #[test]
    fn scroll_moves_only_affected_channels() {
        let mut d = index_driver(0.0);
        d.on_scroll(1000.0); // progress 0.25: only the image column moves
        d.frame(0.016);
        d.on_scroll(1200.0); // 0.3
        let out = d.frame(0.016);
        assert!(out.delta.scalar(Channel::ImageTranslateY).is_some());
        assert!(out.delta.scalar(Channel::MaskSize).is_none());
        assert!(out.delta.words.is_empty());
    }

    #[test]
    fn scrub_lags_behind_scroll() {
        let mut d = index_driver(0.2);
        d.on_scroll(4000.0);
        let out = d.frame(0.016);
        assert!(out.progress > 0.0 && out.progress < 1.0);
        assert!(!d.is_idle());
    }

    #[test]
    fn invalidate_forces_full_delta() {
        let mut d = index_driver(0.0);
        d.frame(0.016);
        d.invalidate();
        assert_eq!(d.frame(0.016).delta.scalars.len(), 3);
    }

    #[test]
    fn set_word_count_redraws_words() {
        let mut d = index_driver(0.0);
        d.frame(0.016);
        d.set_word_count(6);
        assert_eq!(d.frame(0.016).delta.words.len(), 6);
    }

    #[test]
    fn overlay_translates_then_resets_on_leave_back() {
        let mut d = home_mobile_driver();
        d.on_scroll(5500.0);
        let out = d.frame(0.016);
        assert_eq!(
            out.overlay,
            Some(OverlayTransform::TranslateY {
                viewport_percent: -50.0
            })
        );
        d.on_scroll(4000.0);
        assert_eq!(d.frame(0.016).overlay, Some(OverlayTransform::Reset));
        assert_eq!(d.frame(0.016).overlay, None);
    }
}
