//! Cloaking: swapping off-screen posts for lightweight placeholders.
//!
//! A cloaked post is rendered as an empty box sized to its last measured
//! height, so the scroll offset does not move when content disappears. The
//! manager owns all per-post cloak state for one stream view and is reset
//! wholesale when that view is torn down.
//!
//! # Rerender scheduling
//!
//! Cloaking happens while the user scrolls past many posts at once, so the
//! rerender it needs is debounced: every cloak pushes a single deadline out and
//! [`CloakManager::poll_rerender`] fires one rerender per quiet period.
//! Uncloaking brings content back into view and requests a rerender right away.

use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use threadview_primitives::{PostId, PostRecord};
use tracing::trace;

use crate::config::StreamConfig;
use crate::host::{DirtyKey, RenderHost};
use crate::timer::DebounceTimer;

/// Cloak state for one stream view.
#[derive(Debug)]
pub struct CloakManager {
	/// Fixed at construction; cloak/uncloak are no-ops when false.
	enabled: bool,
	cloaked: FxHashSet<PostId>,
	/// Last measured height per post. Survives uncloak.
	heights: FxHashMap<PostId, u32>,
	/// Posts that must never be cloaked (e.g. the post being edited).
	do_not_cloak: FxHashSet<PostId>,
	rerender: DebounceTimer,
}

impl CloakManager {
	pub fn new(config: &StreamConfig) -> Self {
		Self {
			enabled: config.cloaking_active(),
			cloaked: FxHashSet::default(),
			heights: FxHashMap::default(),
			do_not_cloak: FxHashSet::default(),
			rerender: DebounceTimer::new(config.debounce()),
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Cloaks `post`, caching its current height.
	///
	/// No-op when cloaking is disabled, the post is already cloaked, or it is
	/// exempt. Returns whether state changed.
	///
	/// Only state changes push the rerender deadline: cloaking the same post
	/// again keeps the deadline set by its first call, while cloaking a
	/// different post moves it to `now + debounce`.
	pub fn cloak(&mut self, post: &PostRecord, host: &mut impl RenderHost, now: Instant) -> bool {
		if !self.enabled || self.cloaked.contains(&post.id) || self.do_not_cloak.contains(&post.id) {
			return false;
		}

		self.cloaked.insert(post.id);
		let height = host.measure_height(post);
		if let Some(height) = height {
			self.heights.insert(post.id, height);
		}

		host.mark_dirty(&DirtyKey::post(post.id));
		let deadline = self.rerender.schedule(now);
		trace!(post_id = %post.id, ?height, ?deadline, "post cloaked");
		true
	}

	/// Uncloaks `post` and requests an immediate rerender.
	///
	/// No-op when cloaking is disabled or the post is not cloaked. The cached
	/// height is kept until a newer measurement replaces it.
	pub fn uncloak(&mut self, post: &PostRecord, host: &mut impl RenderHost) -> bool {
		if !self.enabled || !self.cloaked.remove(&post.id) {
			return false;
		}

		host.mark_dirty(&DirtyKey::post(post.id));
		host.queue_rerender();
		trace!(post_id = %post.id, "post uncloaked");
		true
	}

	/// Exempts `id` from cloaking for the lifetime of this manager.
	///
	/// Does not uncloak a post that is already cloaked.
	pub fn prevent_cloak(&mut self, id: PostId) {
		if self.do_not_cloak.insert(id) {
			trace!(post_id = %id, "cloaking prevented");
		}
	}

	/// Fires the debounced rerender if its quiet period has elapsed.
	pub fn poll_rerender(&mut self, now: Instant, host: &mut impl RenderHost) -> bool {
		if !self.rerender.fire_if_due(now) {
			return false;
		}
		trace!(cloaked = self.cloaked.len(), "debounced cloak rerender");
		host.queue_rerender();
		true
	}

	/// Stores a fresh height measurement for `id`.
	pub fn record_height(&mut self, id: PostId, height: u32) {
		self.heights.insert(id, height);
	}

	/// Clears cloak flags and heights when the view is disposed.
	///
	/// Exemptions survive; they are never revoked.
	pub fn reset_on_teardown(&mut self) {
		trace!(cloaked = self.cloaked.len(), heights = self.heights.len(), "cloak state reset");
		self.cloaked.clear();
		self.heights.clear();
		self.rerender.cancel();
	}

	pub fn is_cloaked(&self, id: PostId) -> bool {
		self.cloaked.contains(&id)
	}

	pub fn height(&self, id: PostId) -> Option<u32> {
		self.heights.get(&id).copied()
	}

	pub fn is_exempt(&self, id: PostId) -> bool {
		self.do_not_cloak.contains(&id)
	}

	pub fn cloaked_count(&self) -> usize {
		self.cloaked.len()
	}

	/// Deadline of the pending debounced rerender, if any.
	pub fn pending_rerender(&self) -> Option<Instant> {
		self.rerender.deadline()
	}
}
