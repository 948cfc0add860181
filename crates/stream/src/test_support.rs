//! Shared fixtures for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rustc_hash::FxHashMap;
use threadview_primitives::{PostId, PostNumber, PostRecord, PostType, StreamEntry};

use crate::host::{DirtyKey, RenderHost};

/// Host that records every request made by the core.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
	pub dirty: Vec<DirtyKey>,
	pub rerenders: usize,
	pub heights: FxHashMap<PostId, u32>,
}

impl TestHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_height(mut self, id: PostId, height: u32) -> Self {
		self.heights.insert(id, height);
		self
	}
}

impl RenderHost for TestHost {
	fn mark_dirty(&mut self, key: &DirtyKey) {
		self.dirty.push(*key);
	}

	fn queue_rerender(&mut self) {
		self.rerenders += 1;
	}

	fn measure_height(&self, post: &PostRecord) -> Option<u32> {
		self.heights.get(&post.id).copied()
	}
}

pub(crate) fn epoch() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Regular post `n` with id `n`, created `day` days after [`epoch`].
pub(crate) fn post(n: u32, day: i64) -> PostRecord {
	PostRecord::new(PostId(u64::from(n)), PostNumber(n), epoch() + Duration::days(day), format!("user{n}"))
}

pub(crate) fn small_action(n: u32, day: i64, code: &str) -> PostRecord {
	let mut record = post(n, day);
	record.post_type = PostType::SmallAction;
	record.action_code = Some(code.to_string());
	record
}

pub(crate) fn entries(posts: impl IntoIterator<Item = PostRecord>) -> Vec<StreamEntry> {
	posts.into_iter().map(StreamEntry::Post).collect()
}
