//! Seam between the stream core and the framework that materializes it.
//!
//! The core never rerenders anything itself. It marks the smallest stale
//! subtree through [`RenderHost::mark_dirty`] and asks for a rerender; the
//! host decides how and when to diff.

use std::fmt;

use serde::Serialize;
use threadview_primitives::{GapPosition, PostId, PostRecord};

/// Handle for exactly one renderable subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirtyKey {
	/// A post or small action item.
	Post { id: PostId },
	/// A gap marker bordering a post.
	Gap { position: GapPosition, id: PostId },
	/// A time-gap marker placed before a post.
	TimeGap { id: PostId },
	/// The filtered-replies overlay.
	FilteredReplies,
}

impl DirtyKey {
	pub const fn post(id: PostId) -> Self {
		Self::Post { id }
	}
}

impl fmt::Display for DirtyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Post { id } => write!(f, "post-{id}"),
			Self::Gap { position, id } => write!(f, "post-gap-{}-{id}", position.as_str()),
			Self::TimeGap { id } => write!(f, "time-gap-{id}"),
			Self::FilteredReplies => f.write_str("post-filtered-replies"),
		}
	}
}

/// Operations the stream needs from the render framework.
pub trait RenderHost {
	/// Marks one subtree stale for the next rerender.
	fn mark_dirty(&mut self, key: &DirtyKey);

	/// Requests a rerender as soon as the host can schedule one.
	fn queue_rerender(&mut self);

	/// Returns the current rendered height of `post` in pixels, if it is on screen.
	fn measure_height(&self, post: &PostRecord) -> Option<u32>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_render_as_subtree_handles() {
		assert_eq!(DirtyKey::post(PostId(42)).to_string(), "post-42");
		assert_eq!(
			DirtyKey::Gap {
				position: GapPosition::Before,
				id: PostId(3)
			}
			.to_string(),
			"post-gap-before-3"
		);
		assert_eq!(DirtyKey::TimeGap { id: PostId(9) }.to_string(), "time-gap-9");
		assert_eq!(DirtyKey::FilteredReplies.to_string(), "post-filtered-replies");
	}
}
