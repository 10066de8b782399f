#![forbid(unsafe_code)]

//! Device class selection.
//!
//! The page scripts pick a channel table by device class: narrow viewports
//! and known handheld user agents get the mobile table. Both classes share
//! the same evaluation path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewports at or below this width are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Lower-cased user agent fragments that force the mobile class.
const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Classify from viewport width and user agent string.
    #[must_use]
    pub fn detect(viewport_width: f64, user_agent: &str) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT_PX || is_mobile_agent(user_agent) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|fragment| ua.contains(fragment))
}
