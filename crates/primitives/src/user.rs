use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The signed-in user viewing the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
	pub id: UserId,
	pub username: String,
	/// May close, pin, and delete posts in the topic.
	#[serde(default)]
	pub can_manage_topic: bool,
	/// May move posts between topics.
	#[serde(default)]
	pub can_split_merge_topic: bool,
}

impl CurrentUser {
	pub fn new(id: UserId, username: impl Into<String>) -> Self {
		Self {
			id,
			username: username.into(),
			can_manage_topic: false,
			can_split_merge_topic: false,
		}
	}

	pub fn staff(id: UserId, username: impl Into<String>) -> Self {
		Self {
			can_manage_topic: true,
			can_split_merge_topic: true,
			..Self::new(id, username)
		}
	}
}
