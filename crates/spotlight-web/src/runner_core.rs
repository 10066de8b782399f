#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`SpotlightDriver`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here.
//!
//! The host calls [`RunnerCore::scroll`] from its scroll listener and
//! [`RunnerCore::frame`] from its animation-frame callback; both return the
//! style writes to perform, already diffed against what was last written.

use spotlight_core::{
    Channel, ConfigError, DeviceClass, FrameOutput, LayoutMetrics, NavAppearance, NavTracker,
    Page, ProgressMapper, ScrollRegion, SpotlightDriver, preset, split_words,
};
use tracing::{debug, warn};

use crate::css;

/// Element a style command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// The scrolling image columns (`.spotlight-images`).
    SpotlightImages,
    /// The masked reveal container (`.mask-container`).
    MaskContainer,
    /// The image inside the mask (`.mask-img`).
    MaskImage,
    /// One word span of the header, by index.
    Word(usize),
    /// The navigation bar.
    Nav,
}

impl StyleTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpotlightImages => "spotlight_images",
            Self::MaskContainer => "mask_container",
            Self::MaskImage => "mask_image",
            Self::Word(_) => "word",
            Self::Nav => "nav",
        }
    }

    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Word(i) => Some(i),
            _ => None,
        }
    }
}

/// One CSS property write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCommand {
    pub target: StyleTarget,
    pub property: &'static str,
    pub value: String,
}

impl StyleCommand {
    fn new(target: StyleTarget, property: &'static str, value: String) -> Self {
        Self {
            target,
            property,
            value,
        }
    }
}

/// Layout and page inputs measured once by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub page: Page,
    pub device: DeviceClass,
    /// Height of the image columns container.
    pub container_height: f64,
    pub viewport_height: f64,
    /// Page offset of the spotlight section's top edge.
    pub section_top: f64,
    pub section_height: f64,
    /// Text of the masked header, split into word spans by the host.
    pub header_text: String,
    pub nav_height: f64,
    /// Page offset of the footer's top edge; drives the overlay when set.
    pub footer_top: Option<f64>,
}

/// Platform-independent spotlight runner.
#[derive(Debug)]
pub struct RunnerCore {
    driver: SpotlightDriver,
    nav: NavTracker,
    last_nav: Option<NavAppearance>,
    words: Vec<String>,
}

impl RunnerCore {
    /// Measure, pick the preset, and build the driver.
    ///
    /// Any degenerate measurement fails here; the host then skips the
    /// animation and leaves the rest of the page alone.
    pub fn new(config: &RunnerConfig) -> Result<Self, ConfigError> {
        let metrics = LayoutMetrics::new(config.container_height, config.viewport_height)?;
        let preset = preset(config.page, config.device, metrics)?;
        let region = preset.region.resolve(
            config.section_top,
            config.section_height,
            config.viewport_height,
        )?;

        let words: Vec<String> = split_words(&config.header_text)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let mapper = ProgressMapper::new(preset.table.clone())?.with_word_count(words.len());
        let mut driver = SpotlightDriver::from_preset(mapper, &preset, region);

        if let (Some(lag), Some(footer_top)) = (preset.overlay_scrub_seconds, config.footer_top) {
            // Footer top entering the viewport bottom until it reaches the top.
            match ScrollRegion::new(footer_top - config.viewport_height, config.viewport_height) {
                Ok(overlay) => driver = driver.with_overlay(overlay, lag),
                Err(err) => warn!(%err, footer_top, "footer overlay skipped"),
            }
        }

        debug!(
            page = ?config.page,
            device = %config.device,
            words = words.len(),
            "spotlight runner ready"
        );

        Ok(Self {
            driver,
            nav: NavTracker::new(!config.device.is_mobile(), config.nav_height),
            last_nav: None,
            words,
        })
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.driver.is_idle()
    }

    /// Forget what was written; the next frame rewrites everything.
    pub fn invalidate(&mut self) {
        self.driver.invalidate();
        self.last_nav = None;
    }

    /// Observe a scroll position. Returns nav writes; spotlight writes
    /// follow on the next [`RunnerCore::frame`].
    pub fn scroll(&mut self, scroll_y: f64) -> Vec<StyleCommand> {
        self.driver.on_scroll(scroll_y);
        let appearance = self.nav.update(scroll_y);
        let commands = nav_commands(appearance, self.last_nav);
        self.last_nav = Some(appearance);
        commands
    }

    /// Advance one animation frame of `dt_ms` milliseconds.
    pub fn frame(&mut self, dt_ms: f64) -> Vec<StyleCommand> {
        frame_commands(&self.driver.frame(dt_ms / 1000.0))
    }
}

fn frame_commands(out: &FrameOutput) -> Vec<StyleCommand> {
    let mut commands = Vec::with_capacity(out.delta.scalars.len() + out.delta.words.len() + 2);
    for &(channel, value) in &out.delta.scalars {
        match channel {
            Channel::ImageTranslateY => commands.push(StyleCommand::new(
                StyleTarget::SpotlightImages,
                "transform",
                css::translate_y_percent(value),
            )),
            Channel::MaskSize => {
                let size = css::percent(value);
                commands.push(StyleCommand::new(
                    StyleTarget::MaskContainer,
                    "-webkit-mask-size",
                    size.clone(),
                ));
                commands.push(StyleCommand::new(
                    StyleTarget::MaskContainer,
                    "mask-size",
                    size,
                ));
            }
            Channel::ImageScale => commands.push(StyleCommand::new(
                StyleTarget::MaskImage,
                "transform",
                css::scale(value),
            )),
            Channel::OverlayTranslateY => {}
        }
    }
    for &(index, shown) in &out.delta.words {
        commands.push(StyleCommand::new(
            StyleTarget::Word(index),
            "opacity",
            css::opacity(shown),
        ));
    }
    if let Some(overlay) = out.overlay {
        commands.push(StyleCommand::new(
            StyleTarget::MaskContainer,
            "transform",
            css::overlay_transform(overlay),
        ));
    }
    commands
}

fn nav_commands(now: NavAppearance, before: Option<NavAppearance>) -> Vec<StyleCommand> {
    let mut commands = Vec::new();
    if before.is_none_or(|b| b.offset_px.to_bits() != now.offset_px.to_bits()) {
        commands.push(StyleCommand::new(
            StyleTarget::Nav,
            "transform",
            css::translate_y_px(now.offset_px),
        ));
    }
    if before.is_none_or(|b| b.backdrop != now.backdrop) {
        let (background, filter, shadow) = css::backdrop(now.backdrop);
        for (property, value) in [
            ("background", background),
            ("backdrop-filter", filter),
            ("-webkit-backdrop-filter", filter),
            ("box-shadow", shadow),
        ] {
            commands.push(StyleCommand::new(StyleTarget::Nav, property, value.to_string()));
        }
    }
    commands
}
