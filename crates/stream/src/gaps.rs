//! Gap and time-gap markers interleaved with posts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use threadview_primitives::{GapMap, GapPosition, PostId};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 1000 * 60 * 60 * 24;

/// "Load more" marker for posts known to exist next to a loaded post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapMarker {
	pub position: GapPosition,
	pub post_id: PostId,
	pub missing: Vec<PostId>,
}

impl GapMarker {
	/// Builds the marker for `position` of `post_id`, if a gap is recorded there.
	pub fn lookup(gaps: &GapMap, position: GapPosition, post_id: PostId) -> Option<Self> {
		gaps.get(position, post_id).map(|missing| Self {
			position,
			post_id,
			missing: missing.to_vec(),
		})
	}
}

/// Marker placed before a post that follows a long silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeGapMarker {
	pub days_since: i64,
	/// Post the marker precedes.
	pub before: PostId,
}

/// Whole days from `prev` to `cur`, floored.
///
/// Computed on UTC milliseconds, so day boundaries do not follow any local
/// calendar.
pub fn elapsed_days(prev: DateTime<Utc>, cur: DateTime<Utc>) -> i64 {
	(cur - prev).num_milliseconds().div_euclid(DAY_MS)
}

/// Tracks the previous post's timestamp across a single stream walk.
#[derive(Debug, Clone)]
pub struct TimeGapTracker {
	threshold_days: i64,
	prev: Option<DateTime<Utc>>,
}

impl TimeGapTracker {
	pub fn new(threshold_days: u32) -> Self {
		Self {
			threshold_days: i64::from(threshold_days),
			prev: None,
		}
	}

	/// Advances to `created_at` and returns the elapsed days when they exceed
	/// the threshold.
	///
	/// The reference timestamp advances on every call, marker or not.
	pub fn observe(&mut self, created_at: DateTime<Utc>) -> Option<i64> {
		let prev = self.prev.replace(created_at)?;
		let days_since = elapsed_days(prev, created_at);
		(days_since > self.threshold_days).then_some(days_since)
	}
}
