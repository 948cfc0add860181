//! Render host for headless runs.

use threadview_primitives::PostRecord;
use threadview_stream::{DirtyKey, RenderHost};
use tracing::debug;

/// Pixels per line of cooked content.
const LINE_HEIGHT: u32 = 20;
/// Header and footer chrome around every post.
const POST_CHROME: u32 = 60;

/// Host without a layout engine.
///
/// Heights are estimated from the cooked body; dirty keys and rerender
/// requests are only recorded.
#[derive(Debug, Default)]
pub struct HeadlessHost {
	pub dirty: Vec<DirtyKey>,
	pub rerenders: usize,
}

impl RenderHost for HeadlessHost {
	fn mark_dirty(&mut self, key: &DirtyKey) {
		debug!(%key, "subtree marked dirty");
		self.dirty.push(*key);
	}

	fn queue_rerender(&mut self) {
		self.rerenders += 1;
		debug!(rerenders = self.rerenders, "rerender queued");
	}

	fn measure_height(&self, post: &PostRecord) -> Option<u32> {
		let lines = u32::try_from(post.cooked.lines().count()).unwrap_or(u32::MAX);
		Some(POST_CHROME.saturating_add(lines.saturating_mul(LINE_HEIGHT)))
	}
}
