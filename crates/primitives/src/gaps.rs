use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::PostId;

/// Side of a post on which a gap sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPosition {
	Before,
	After,
}

impl GapPosition {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Before => "before",
			Self::After => "after",
		}
	}
}

/// Posts known to exist but not loaded, keyed by the loaded post they border.
///
/// Only used to decide whether a "load more" marker is shown; the ids are
/// never fetched here. A missing key and an empty list both mean "no gap".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapMap {
	#[serde(default)]
	pub before: HashMap<PostId, Vec<PostId>>,
	#[serde(default)]
	pub after: HashMap<PostId, Vec<PostId>>,
}

impl GapMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a gap, replacing any previous gap on the same side of `post`.
	pub fn insert(&mut self, position: GapPosition, post: PostId, missing: Vec<PostId>) {
		self.side_mut(position).insert(post, missing);
	}

	/// Returns the missing ids on `position` of `post`, if there are any.
	pub fn get(&self, position: GapPosition, post: PostId) -> Option<&[PostId]> {
		self.side(position).get(&post).map(Vec::as_slice).filter(|ids| !ids.is_empty())
	}

	pub fn is_empty(&self) -> bool {
		self.before.values().all(Vec::is_empty) && self.after.values().all(Vec::is_empty)
	}

	fn side(&self, position: GapPosition) -> &HashMap<PostId, Vec<PostId>> {
		match position {
			GapPosition::Before => &self.before,
			GapPosition::After => &self.after,
		}
	}

	fn side_mut(&mut self, position: GapPosition) -> &mut HashMap<PostId, Vec<PostId>> {
		match position {
			GapPosition::Before => &mut self.before,
			GapPosition::After => &mut self.after,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_and_empty_entries_mean_no_gap() {
		let mut gaps = GapMap::new();
		gaps.insert(GapPosition::Before, PostId(5), Vec::new());
		assert_eq!(gaps.get(GapPosition::Before, PostId(5)), None);
		assert_eq!(gaps.get(GapPosition::After, PostId(5)), None);
		assert!(gaps.is_empty());
	}

	#[test]
	fn sides_are_independent() {
		let mut gaps = GapMap::new();
		gaps.insert(GapPosition::After, PostId(5), vec![PostId(6), PostId(7)]);
		assert_eq!(gaps.get(GapPosition::After, PostId(5)), Some(&[PostId(6), PostId(7)][..]));
		assert_eq!(gaps.get(GapPosition::Before, PostId(5)), None);
	}

	#[test]
	fn deserializes_string_keys_as_post_ids() {
		let gaps: GapMap = serde_json::from_str(r#"{"before": {"12": [10, 11]}}"#).expect("parse gaps");
		assert_eq!(gaps.get(GapPosition::Before, PostId(12)), Some(&[PostId(10), PostId(11)][..]));
		assert!(gaps.after.is_empty());
	}
}
