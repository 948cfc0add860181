//! Post stream renderer.
//!
//! [`PostStream::render`] walks the stream once, left to right, and produces
//! the ordered list of render items the host materializes. With a before-gap
//! on P2 and P3 written five days after P2:
//!
//! ```text
//! entries: P1  P2              <placeholder>  P3
//! items:   P1  Gap(before) P2  Placeholder    TimeGap(5) P3  [FilteredReplies]
//! ```
//!
//! Placeholders are copied through untouched and never update the
//! neighbor/timestamp state used by gaps, time gaps, and reply flags.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use threadview_primitives::{Author, FilterDescriptor, GapMap, GapPosition, PostId, PostNumber, PostRecord, StreamEntry};
use tracing::{debug, warn};

use crate::cloak::CloakManager;
use crate::config::StreamConfig;
use crate::error::{CallbackError, Result, StreamError};
use crate::gaps::{GapMarker, TimeGapMarker, TimeGapTracker};
use crate::host::{DirtyKey, RenderHost};
use crate::overlay::FilterOverlay;
use crate::pipeline::TransformPipeline;
use crate::transform::{PostKind, TransformedPost, ViewContext, transform};

/// One element of the rendered stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderItem {
	/// Slot for a post that is not materialized yet.
	Placeholder,
	Gap(GapMarker),
	TimeGap(TimeGapMarker),
	Post(Box<PostItem>),
	SmallAction(SmallActionItem),
	FilteredReplies(FilterOverlay),
}

/// Full post with user content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostItem {
	pub post: TransformedPost,
	pub show_read_indicator: bool,
}

/// Compact moderation/system entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmallActionItem {
	pub id: PostId,
	pub post_number: PostNumber,
	pub created_at: DateTime<Utc>,
	pub action_code: Option<String>,
	pub author: Author,
	pub cloaked: bool,
	pub height: Option<u32>,
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl RenderItem {
	/// Key the host uses to reuse or invalidate this item's subtree.
	pub fn key(&self) -> Option<DirtyKey> {
		match self {
			Self::Placeholder => None,
			Self::Gap(gap) => Some(DirtyKey::Gap {
				position: gap.position,
				id: gap.post_id,
			}),
			Self::TimeGap(marker) => Some(DirtyKey::TimeGap { id: marker.before }),
			Self::Post(item) => Some(DirtyKey::post(item.post.id)),
			Self::SmallAction(item) => Some(DirtyKey::post(item.id)),
			Self::FilteredReplies(_) => Some(DirtyKey::FilteredReplies),
		}
	}

	/// Id of the post this item renders, for post and small action items.
	pub fn post_id(&self) -> Option<PostId> {
		match self {
			Self::Post(item) => Some(item.post.id),
			Self::SmallAction(item) => Some(item.id),
			_ => None,
		}
	}

	/// Splits a transformed post into the item variant matching its kind.
	fn classify(post: TransformedPost, view: &ViewContext<'_>) -> Self {
		match post.kind {
			PostKind::SmallAction { action_code } => Self::SmallAction(SmallActionItem {
				id: post.id,
				post_number: post.post_number,
				created_at: post.created_at,
				action_code,
				author: post.author,
				cloaked: post.cloaked,
				height: post.height,
				extra: post.extra,
			}),
			PostKind::Regular => Self::Post(Box::new(PostItem {
				post,
				show_read_indicator: view.show_read_indicator,
			})),
		}
	}
}

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
	pub posts: usize,
	pub small_actions: usize,
	pub placeholders: usize,
	pub gaps: usize,
	pub time_gaps: usize,
	pub cloaked: usize,
	pub failed: usize,
}

/// Result of a render pass.
#[derive(Debug)]
pub struct RenderOutput {
	pub items: Vec<RenderItem>,
	/// Posts rendered as placeholders because a transform callback failed.
	pub failures: Vec<StreamError>,
	pub stats: RenderStats,
}

/// Stream view context: configuration, cloak state, and transform callbacks.
///
/// One instance per mounted stream view. Create it when the view mounts, call
/// [`teardown`](Self::teardown) when it is disposed.
#[derive(Debug)]
pub struct PostStream {
	config: StreamConfig,
	cloaks: CloakManager,
	pipeline: TransformPipeline,
}

impl PostStream {
	pub fn new(config: StreamConfig) -> Self {
		Self {
			cloaks: CloakManager::new(&config),
			pipeline: TransformPipeline::new(),
			config,
		}
	}

	pub fn config(&self) -> &StreamConfig {
		&self.config
	}

	pub fn cloaks(&self) -> &CloakManager {
		&self.cloaks
	}

	pub fn pipeline(&self) -> &TransformPipeline {
		&self.pipeline
	}

	/// Registers a transform applied to every post after the core transform.
	pub fn add_transform_callback<F>(&mut self, name: impl Into<String>, callback: F)
	where
		F: Fn(TransformedPost) -> std::result::Result<TransformedPost, CallbackError> + 'static,
	{
		self.pipeline.add(name, callback);
	}

	/// See [`CloakManager::cloak`].
	pub fn cloak(&mut self, post: &PostRecord, host: &mut impl RenderHost, now: Instant) -> bool {
		self.cloaks.cloak(post, host, now)
	}

	/// See [`CloakManager::uncloak`].
	pub fn uncloak(&mut self, post: &PostRecord, host: &mut impl RenderHost) -> bool {
		self.cloaks.uncloak(post, host)
	}

	/// See [`CloakManager::prevent_cloak`].
	pub fn prevent_cloak(&mut self, id: PostId) {
		self.cloaks.prevent_cloak(id);
	}

	/// Drives the debounced cloak rerender; call from the host's event loop.
	pub fn poll_rerender(&mut self, now: Instant, host: &mut impl RenderHost) -> bool {
		self.cloaks.poll_rerender(now, host)
	}

	/// Releases per-view cloak state.
	pub fn teardown(&mut self) {
		self.cloaks.reset_on_teardown();
	}

	/// Renders `entries` into an ordered item list.
	///
	/// Fails only when the filter overlay cannot be built. A post whose
	/// transform callback fails keeps its slot as a placeholder, with its gap
	/// and time-gap markers intact, and is reported in
	/// [`RenderOutput::failures`].
	pub fn render(&self, entries: &[StreamEntry], gaps: &GapMap, view: &ViewContext<'_>, filter: &FilterDescriptor) -> Result<RenderOutput> {
		let mut items = Vec::with_capacity(entries.len() + 1);
		let mut failures = Vec::new();
		let mut stats = RenderStats::default();
		let mut time_gaps = TimeGapTracker::new(self.config.show_time_gap_days);
		let mut prev: Option<&PostRecord> = None;

		for (idx, entry) in entries.iter().enumerate() {
			let StreamEntry::Post(post) = entry else {
				items.push(RenderItem::Placeholder);
				stats.placeholders += 1;
				continue;
			};

			let next = entries.get(idx + 1).and_then(StreamEntry::as_post);
			let mut transformed = transform(view, post, prev, next);
			transformed.height = self.cloaks.height(post.id);
			transformed.cloaked = self.cloaks.is_cloaked(post.id);

			let days_since = time_gaps.observe(post.created_at);
			prev = Some(post);

			if let Some(days_since) = days_since {
				items.push(RenderItem::TimeGap(TimeGapMarker { days_since, before: post.id }));
				stats.time_gaps += 1;
			}
			if let Some(gap) = GapMarker::lookup(gaps, GapPosition::Before, post.id) {
				items.push(RenderItem::Gap(gap));
				stats.gaps += 1;
			}

			match self.pipeline.apply(transformed) {
				Ok(transformed) => {
					if transformed.cloaked {
						stats.cloaked += 1;
					}
					let item = RenderItem::classify(transformed, view);
					match item {
						RenderItem::SmallAction(_) => stats.small_actions += 1,
						_ => stats.posts += 1,
					}
					items.push(item);
				}
				Err(err) => {
					warn!(post_id = %post.id, error = %err, "post transform failed; rendering placeholder");
					stats.failed += 1;
					failures.push(err);
					items.push(RenderItem::Placeholder);
				}
			}

			if let Some(gap) = GapMarker::lookup(gaps, GapPosition::After, post.id) {
				items.push(RenderItem::Gap(gap));
				stats.gaps += 1;
			}
		}

		if !filter.is_empty()
			&& let Some(overlay) = FilterOverlay::decide(filter, entries)?
		{
			items.push(RenderItem::FilteredReplies(overlay));
		}

		debug!(
			entries = entries.len(),
			items = items.len(),
			posts = stats.posts,
			small_actions = stats.small_actions,
			placeholders = stats.placeholders,
			gaps = stats.gaps,
			time_gaps = stats.time_gaps,
			cloaked = stats.cloaked,
			failed = stats.failed,
			"post stream rendered"
		);

		Ok(RenderOutput { items, failures, stats })
	}
}
