use serde::{Deserialize, Serialize};

use crate::ids::PostNumber;

/// Name of the summary filter.
pub const SUMMARY_FILTER: &str = "summary";

/// Active stream filter, as supplied by the search/filter collaborator.
///
/// All fields unset means no filter is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
	/// Only replies to this post are shown.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub replies_to_post_number: Option<PostNumber>,
	/// Named filter, e.g. [`SUMMARY_FILTER`].
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filter: Option<String>,
	/// Only posts by these users are shown.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username_filters: Option<Vec<String>>,
}

impl FilterDescriptor {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn replies_to(post_number: PostNumber) -> Self {
		Self {
			replies_to_post_number: Some(post_number),
			..Self::default()
		}
	}

	pub fn summary() -> Self {
		Self {
			filter: Some(SUMMARY_FILTER.to_string()),
			..Self::default()
		}
	}

	pub fn usernames<I, S>(usernames: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			username_filters: Some(usernames.into_iter().map(Into::into).collect()),
			..Self::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.replies_to_post_number.is_none() && self.filter.is_none() && self.username_filters.is_none()
	}

	pub fn is_summary(&self) -> bool {
		self.filter.as_deref() == Some(SUMMARY_FILTER)
	}
}
