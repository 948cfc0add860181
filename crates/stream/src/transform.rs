//! Per-post transformation into render-ready records.
//!
//! [`transform`] is pure: it borrows the record and its neighbors and builds
//! a fresh [`TransformedPost`] every render. Registered callbacks run after it
//! through the [`TransformPipeline`].
//!
//! [`TransformPipeline`]: crate::pipeline::TransformPipeline

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use threadview_primitives::{Author, CurrentUser, PostId, PostNumber, PostRecord, PostType};

/// Predicate deciding whether a post is part of the current multi-selection.
pub type SelectionQuery<'a> = &'a dyn Fn(&PostRecord) -> bool;

/// View-level state shared by every post in one render pass.
#[derive(Clone, Copy, Default)]
pub struct ViewContext<'a> {
	pub current_user: Option<&'a CurrentUser>,
	pub mobile_view: bool,
	pub can_create_post: bool,
	/// Active multi-select mode with its membership predicate.
	pub multi_select: Option<SelectionQuery<'a>>,
	/// Search term to highlight when a search context is active.
	pub highlight_term: Option<&'a str>,
	pub show_read_indicator: bool,
}

impl<'a> ViewContext<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user(mut self, user: &'a CurrentUser) -> Self {
		self.current_user = Some(user);
		self
	}

	pub fn with_multi_select(mut self, query: SelectionQuery<'a>) -> Self {
		self.multi_select = Some(query);
		self
	}

	pub fn with_highlight(mut self, term: &'a str) -> Self {
		self.highlight_term = Some(term);
		self
	}
}

impl fmt::Debug for ViewContext<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewContext")
			.field("current_user", &self.current_user.map(|user| &user.username))
			.field("mobile_view", &self.mobile_view)
			.field("can_create_post", &self.can_create_post)
			.field("multi_select", &self.multi_select.is_some())
			.field("highlight_term", &self.highlight_term)
			.field("show_read_indicator", &self.show_read_indicator)
			.finish()
	}
}

/// Render classification of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostKind {
	Regular,
	/// Moderation or system log entry rendered compactly.
	SmallAction { action_code: Option<String> },
}

/// Render-ready view of one post. Rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedPost {
	pub id: PostId,
	pub post_number: PostNumber,
	pub created_at: DateTime<Utc>,
	pub author: Author,
	pub kind: PostKind,
	pub cooked: String,
	pub reply_count: u32,
	pub reply_to_post_number: Option<PostNumber>,
	pub first_post: bool,
	/// Authored by the viewing user.
	pub is_own: bool,
	/// Replies to a post other than the one directly above.
	pub show_reply_to: bool,
	/// The next post replies to this one.
	pub reply_directly_below: bool,
	pub can_manage: bool,
	pub can_split_merge_topic: bool,
	pub can_create_post: bool,
	pub mobile_view: bool,
	/// Set only for viewers who can manage posts.
	pub multi_select: Option<bool>,
	/// Set only while multi-select mode is active.
	pub selected: Option<bool>,
	pub highlight_term: Option<String>,
	pub cloaked: bool,
	/// Last measured height, used to size the cloaked placeholder.
	pub height: Option<u32>,
	/// Record fields plus anything added by callbacks.
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl TransformedPost {
	/// Adds or overwrites an extra field.
	pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
		self.extra.insert(key.into(), value.into());
	}

	pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
		self.extra.get(key)
	}

	pub fn is_small_action(&self) -> bool {
		matches!(self.kind, PostKind::SmallAction { .. })
	}
}

/// Builds the render record for `post` from its neighbors and the view.
///
/// `prev` is the nearest materialized post above, `next` the entry directly
/// below when it is materialized.
pub fn transform(view: &ViewContext<'_>, post: &PostRecord, prev: Option<&PostRecord>, next: Option<&PostRecord>) -> TransformedPost {
	let user = view.current_user;
	let can_manage = user.is_some_and(|user| user.can_manage_topic);
	let can_split_merge_topic = user.is_some_and(|user| user.can_split_merge_topic);

	let kind = match post.post_type {
		PostType::SmallAction => PostKind::SmallAction {
			action_code: post.action_code.clone(),
		},
		PostType::Regular | PostType::ModeratorAction | PostType::Whisper => PostKind::Regular,
	};

	let show_reply_to = post
		.reply_to_post_number
		.is_some_and(|target| prev.is_none_or(|prev| prev.post_number != target));
	let reply_directly_below = next.is_some_and(|next| next.reply_to_post_number == Some(post.post_number));

	let (multi_select, selected) = if can_manage || can_split_merge_topic {
		match view.multi_select {
			Some(query) => (Some(true), Some(query(post))),
			None => (Some(false), None),
		}
	} else {
		(None, None)
	};

	TransformedPost {
		id: post.id,
		post_number: post.post_number,
		created_at: post.created_at,
		author: post.author(),
		kind,
		cooked: post.cooked.clone(),
		reply_count: post.reply_count,
		reply_to_post_number: post.reply_to_post_number,
		first_post: post.post_number.is_first(),
		is_own: user.is_some_and(|user| post.user_id == Some(user.id)),
		show_reply_to,
		reply_directly_below,
		can_manage,
		can_split_merge_topic,
		can_create_post: view.can_create_post,
		mobile_view: view.mobile_view,
		multi_select,
		selected,
		highlight_term: view.highlight_term.map(str::to_owned),
		cloaked: false,
		height: None,
		extra: post.fields.clone(),
	}
}
