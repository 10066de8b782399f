#![forbid(unsafe_code)]

//! Navigation bar visibility driven by scroll direction.
//!
//! [`NavTracker`] owns the last observed scroll position and the last
//! backdrop it asked for, so the behaviour is a small explicit state
//! machine rather than a closure over page globals.
//!
//! | scroll | desktop | mobile |
//! |--------|---------|--------|
//! | at or above top | shown, transparent | shown, transparent |
//! | moving up | shown, frosted | shown, frosted |
//! | moving down | hidden, backdrop kept | shown, frosted |

use serde::{Deserialize, Serialize};

/// Background treatment of the navigation bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backdrop {
    /// No background, no blur, no shadow.
    #[default]
    Transparent,
    /// Translucent dark background with blur and a soft shadow.
    Frosted,
}

/// Resolved navigation appearance for one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavAppearance {
    /// Vertical offset in pixels; negative hides the bar above the viewport.
    pub offset_px: f64,
    pub backdrop: Backdrop,
}

impl NavAppearance {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.offset_px >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavTracker {
    hide_on_scroll_down: bool,
    nav_height_px: f64,
    last_scroll: f64,
    current: NavAppearance,
}

impl NavTracker {
    /// `hide_on_scroll_down` is the desktop behaviour; mobile keeps the bar.
    #[must_use]
    pub fn new(hide_on_scroll_down: bool, nav_height_px: f64) -> Self {
        Self {
            hide_on_scroll_down,
            nav_height_px: if nav_height_px.is_finite() {
                nav_height_px.max(0.0)
            } else {
                0.0
            },
            last_scroll: 0.0,
            current: NavAppearance {
                offset_px: 0.0,
                backdrop: Backdrop::Transparent,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> NavAppearance {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    /// Observe a scroll position and return the appearance to apply.
    ///
    /// Non-finite positions leave the state untouched.
    pub fn update(&mut self, scroll_y: f64) -> NavAppearance {
        if !scroll_y.is_finite() {
            return self.current;
        }
        let scrolling_up = scroll_y < self.last_scroll;

        self.current = if scroll_y <= 0.0 {
            NavAppearance {
                offset_px: 0.0,
                backdrop: Backdrop::Transparent,
            }
        } else if scrolling_up || !self.hide_on_scroll_down {
            NavAppearance {
                offset_px: 0.0,
                backdrop: Backdrop::Frosted,
            }
        } else {
            NavAppearance {
                offset_px: -self.nav_height_px,
                backdrop: self.current.backdrop,
            }
        };

        self.last_scroll = scroll_y;
        self.current
    }
}
