#![forbid(unsafe_code)]

//! Core: scroll progress to visual state for the spotlight/mask reveal.
//!
//! # Role in the site
//! `spotlight-core` is the pure engine behind the pinned spotlight section.
//! A scroll driver samples "how far through the section are we" as a
//! progress value; [`ProgressMapper`] turns that one scalar into target
//! values for every animated channel; a renderer applies them.
//!
//! # Primary responsibilities
//! - **PhaseWindow / ChannelConfig**: validated windows and linear channels.
//! - **WordRevealConfig**: per-word header reveal.
//! - **ProgressMapper**: pure, total, idempotent evaluation.
//! - **Presets**: literal tables per page and device class.
//! - **SpotlightDriver**: explicit sampling loop with scrub smoothing and
//!   snapshot diffing.
//! - **NavTracker**: navigation bar visibility as explicit state.
//!
//! # How it fits in the system
//! `spotlight-web` wraps the driver and nav tracker and turns their output
//! into CSS property writes for a JS host. Nothing here touches the DOM.

pub mod channel;
pub mod device;
pub mod driver;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod nav;
pub mod presets;
pub mod scroll;
pub mod snapshot;
pub mod window;
pub mod words;

pub use channel::{Channel, ChannelConfig, Interpolation};
pub use device::{DeviceClass, MOBILE_BREAKPOINT_PX};
pub use driver::{FrameOutput, SpotlightDriver};
pub use error::{ConfigError, Result};
pub use mapper::{ChannelTable, OverlayConfig, OverlayTransform, ProgressMapper};
pub use nav::{Backdrop, NavAppearance, NavTracker};
pub use presets::{LayoutMetrics, Page, SpotlightPreset, preset};
pub use scroll::{RegionPolicy, ScrollRegion, Scrub};
pub use snapshot::{SnapshotDelta, VisualSnapshot};
pub use window::{PhaseWindow, WindowPosition};
pub use words::{WordRevealConfig, split_words};
