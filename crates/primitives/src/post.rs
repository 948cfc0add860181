use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PostId, PostNumber, UserId};

/// Kind of post as classified by the forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
	/// User-authored content.
	#[default]
	Regular,
	/// Staff post rendered with moderator styling.
	ModeratorAction,
	/// System or moderation log entry (closed, pinned, split, ...).
	SmallAction,
	/// Staff-only reply.
	Whisper,
}

/// An already-fetched post.
///
/// Owned by the caller and only ever borrowed by the stream renderer. Fields
/// the renderer does not interpret are kept in [`PostRecord::fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
	pub id: PostId,
	pub post_number: PostNumber,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub user_id: Option<UserId>,
	pub username: String,
	#[serde(default)]
	pub avatar_template: Option<String>,
	#[serde(default)]
	pub post_type: PostType,
	/// Machine-readable action for small action posts (e.g. `closed.enabled`).
	#[serde(default)]
	pub action_code: Option<String>,
	#[serde(default)]
	pub reply_count: u32,
	#[serde(default)]
	pub reply_to_post_number: Option<PostNumber>,
	/// Rendered HTML body.
	#[serde(default)]
	pub cooked: String,
	/// Any other fields carried by the record.
	#[serde(default, flatten)]
	pub fields: BTreeMap<String, serde_json::Value>,
}

impl PostRecord {
	/// Creates a regular post with the minimum identity fields set.
	pub fn new(id: PostId, post_number: PostNumber, created_at: DateTime<Utc>, username: impl Into<String>) -> Self {
		Self {
			id,
			post_number,
			created_at,
			user_id: None,
			username: username.into(),
			avatar_template: None,
			post_type: PostType::Regular,
			action_code: None,
			reply_count: 0,
			reply_to_post_number: None,
			cooked: String::new(),
			fields: BTreeMap::new(),
		}
	}

	pub fn is_small_action(&self) -> bool {
		self.post_type == PostType::SmallAction
	}

	/// Identity of the post's author, as shown next to the post.
	pub fn author(&self) -> Author {
		Author {
			user_id: self.user_id,
			username: self.username.clone(),
			avatar_template: self.avatar_template.clone(),
		}
	}
}

/// Author identity attached to posts and overlays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
	pub user_id: Option<UserId>,
	pub username: String,
	pub avatar_template: Option<String>,
}

/// One slot of a post stream.
///
/// Placeholders hold the position of posts that have not been materialized
/// yet (e.g. during optimistic insertion). They serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamEntry {
	Post(PostRecord),
	Placeholder,
}

impl StreamEntry {
	pub fn as_post(&self) -> Option<&PostRecord> {
		match self {
			Self::Post(post) => Some(post),
			Self::Placeholder => None,
		}
	}

	pub fn is_placeholder(&self) -> bool {
		matches!(self, Self::Placeholder)
	}
}

impl From<PostRecord> for StreamEntry {
	fn from(post: PostRecord) -> Self {
		Self::Post(post)
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	#[test]
	fn deserializes_posts_and_placeholders() {
		let json = r#"[
			{"id": 10, "post_number": 1, "created_at": "2024-03-01T12:00:00Z", "username": "alice", "like_count": 3},
			null,
			{"id": 11, "post_number": 2, "created_at": "2024-03-02T12:00:00Z", "username": "bob", "post_type": "small_action", "action_code": "closed.enabled"}
		]"#;

		let entries: Vec<StreamEntry> = serde_json::from_str(json).expect("parse stream");
		assert_eq!(entries.len(), 3);
		assert!(entries[1].is_placeholder());

		let first = entries[0].as_post().expect("first is a post");
		assert_eq!(first.id, PostId(10));
		assert_eq!(first.post_type, PostType::Regular);
		assert_eq!(first.fields.get("like_count"), Some(&serde_json::json!(3)));

		let third = entries[2].as_post().expect("third is a post");
		assert!(third.is_small_action());
		assert_eq!(third.action_code.as_deref(), Some("closed.enabled"));
	}

	#[test]
	fn author_carries_identity() {
		let mut post = PostRecord::new(PostId(1), PostNumber(1), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), "Alice");
		post.user_id = Some(UserId(7));
		let author = post.author();
		assert_eq!(author.user_id, Some(UserId(7)));
		assert_eq!(author.username, "Alice");
	}
}
