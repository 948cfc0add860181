//! Banner shown at the end of a filtered stream.
//!
//! The overlay never performs navigation or filter changes itself; its actions
//! are handed to a [`StreamActions`] implementation owned by the caller.

use serde::Serialize;
use smallvec::{SmallVec, smallvec};
use threadview_primitives::{Author, FilterDescriptor, PostNumber, PostRecord, StreamEntry};

use crate::error::{Result, StreamError};

/// Which filtered view is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FilterOverlay {
	/// Showing replies to one post.
	Replies {
		reply_count: u32,
		author: Author,
		post_number: PostNumber,
	},
	/// Showing the topic summary.
	Summary,
	/// Showing posts by selected users.
	PostsBy { post_count: usize, author: Option<Author> },
}

/// Message key plus interpolation parameters, for the host's i18n layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayMessage {
	pub key: &'static str,
	pub params: Vec<(&'static str, String)>,
}

impl OverlayMessage {
	fn new(key: &'static str) -> Self {
		Self { key, params: Vec::new() }
	}

	fn param(mut self, name: &'static str, value: impl ToString) -> Self {
		self.params.push((name, value.to_string()));
		self
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
	}
}

/// User-triggerable action attached to the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OverlayAction {
	JumpToPost { post_number: PostNumber, username: String },
	ShowAll,
}

/// Receiver for overlay actions.
pub trait StreamActions {
	/// Navigates to `post_number` in the current topic.
	fn jump_to_post(&mut self, post_number: PostNumber);

	/// Cancels the active filter.
	fn cancel_filter(&mut self);
}

impl FilterOverlay {
	/// Picks the overlay for `filter`, if any.
	///
	/// Fails when a replies filter names a post that is not in `entries`.
	pub fn decide(filter: &FilterDescriptor, entries: &[StreamEntry]) -> Result<Option<Self>> {
		let mut posts = entries.iter().filter_map(StreamEntry::as_post);

		if let Some(post_number) = filter.replies_to_post_number {
			let source = posts
				.find(|post| post.post_number == post_number)
				.ok_or(StreamError::MissingSourcePost { post_number })?;
			return Ok(Some(Self::Replies {
				reply_count: source.reply_count,
				author: source.author(),
				post_number,
			}));
		}

		if filter.is_summary() {
			return Ok(Some(Self::Summary));
		}

		if filter.username_filters.is_some() {
			return Ok(Some(Self::PostsBy {
				post_count: entries.len(),
				author: posts.next().map(PostRecord::author),
			}));
		}

		Ok(None)
	}

	/// Headline text, as a message key and parameters.
	pub fn message(&self) -> OverlayMessage {
		match self {
			Self::Replies { reply_count, .. } => OverlayMessage::new("post.filtered_replies.viewing").param("reply_count", reply_count),
			Self::Summary => OverlayMessage::new("post.filtered_replies.viewing_summary"),
			Self::PostsBy { post_count, .. } => OverlayMessage::new("post.filtered_replies.viewing_posts_by").param("post_count", post_count),
		}
	}

	/// Author shown next to the headline.
	pub fn author(&self) -> Option<&Author> {
		match self {
			Self::Replies { author, .. } => Some(author),
			Self::Summary => None,
			Self::PostsBy { author, .. } => author.as_ref(),
		}
	}

	pub fn actions(&self) -> SmallVec<[OverlayAction; 2]> {
		match self {
			Self::Replies { author, post_number, .. } => smallvec![
				OverlayAction::JumpToPost {
					post_number: *post_number,
					username: author.username.clone(),
				},
				OverlayAction::ShowAll,
			],
			Self::Summary | Self::PostsBy { .. } => smallvec![OverlayAction::ShowAll],
		}
	}
}

impl OverlayAction {
	pub fn label(&self) -> OverlayMessage {
		match self {
			Self::JumpToPost { post_number, username } => OverlayMessage::new("post.filtered_replies.post_number")
				.param("username", username)
				.param("post_number", post_number),
			Self::ShowAll => OverlayMessage::new("post.filtered_replies.show_all"),
		}
	}

	/// Hands the action to the caller.
	pub fn dispatch(&self, actions: &mut impl StreamActions) {
		match self {
			Self::JumpToPost { post_number, .. } => actions.jump_to_post(*post_number),
			Self::ShowAll => actions.cancel_filter(),
		}
	}
}
