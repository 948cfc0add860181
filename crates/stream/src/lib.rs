#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Post stream rendering core.
//!
//! Turns an ordered sequence of posts (some not yet loaded) into the ordered
//! list of items a host framework materializes, while tracking which posts are
//! cloaked off-screen.
//!
//! # Main Types
//!
//! - [`PostStream`] - Per-view context: config, cloak state, and transform callbacks
//! - [`CloakManager`] - Cloaked set, cached heights, and the debounced rerender
//! - [`TransformPipeline`] - Registered post transforms, applied in order
//! - [`FilterOverlay`] - Banner appended to filtered streams
//! - [`RenderHost`] - What the core needs from the framework
//!
//! # Architecture
//!
//! ```text
//! PostStream
//! ├── config: StreamConfig          // Fixed at mount
//! ├── cloaks: CloakManager          // Mutated by viewport events
//! │   └── rerender: DebounceTimer   // Polled by the host loop
//! └── pipeline: TransformPipeline   // Append-only
//! ```
//!
//! [`PostStream::render`] only reads this state; every mutation goes through
//! `&mut PostStream`, so the host serializes viewport events and renders.

pub mod cloak;
pub mod config;
pub mod error;
/// Gap and time-gap markers.
pub mod gaps;
pub mod host;
pub mod overlay;
pub mod pipeline;
pub mod render;
/// Deadline-based debounce.
pub mod timer;
/// Core per-post transform.
pub mod transform;

#[cfg(test)]
mod test_support;

pub use cloak::CloakManager;
pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_SHOW_TIME_GAP_DAYS, StreamConfig};
pub use error::{CallbackError, ConfigError, Result, StreamError};
pub use gaps::{DAY_MS, GapMarker, TimeGapMarker, TimeGapTracker, elapsed_days};
pub use host::{DirtyKey, RenderHost};
pub use overlay::{FilterOverlay, OverlayAction, OverlayMessage, StreamActions};
pub use pipeline::{TransformCallback, TransformPipeline};
pub use render::{PostItem, PostStream, RenderItem, RenderOutput, RenderStats, SmallActionItem};
pub use timer::DebounceTimer;
pub use transform::{PostKind, SelectionQuery, TransformedPost, ViewContext, transform};
