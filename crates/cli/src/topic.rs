//! Topic files: a serialized stream plus the state needed to render it.
//!
//! ```json
//! {
//!   "posts": [{ "id": 1, "post_number": 1, "created_at": "...", "username": "alice" }, null],
//!   "gaps": { "before": { "2": [7, 8] } },
//!   "filter": { "replies_to_post_number": 1 },
//!   "current_user": { "id": 5, "username": "mod", "can_manage_topic": true }
//! }
//! ```
//!
//! `null` entries are posts that are not loaded yet.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use threadview_primitives::{CurrentUser, FilterDescriptor, GapMap, PostId, PostRecord, StreamEntry};

/// Errors that can occur when loading a topic file.
#[derive(Debug, Error)]
pub enum TopicError {
	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	#[error("malformed topic file {path}: {error}")]
	Parse { path: PathBuf, error: serde_json::Error },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicFile {
	pub posts: Vec<StreamEntry>,
	pub gaps: GapMap,
	pub filter: FilterDescriptor,
	pub current_user: Option<CurrentUser>,
	pub can_create_post: bool,
}

impl TopicFile {
	pub fn load(path: &Path) -> Result<Self, TopicError> {
		let input = std::fs::read_to_string(path).map_err(|error| TopicError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		serde_json::from_str(&input).map_err(|error| TopicError::Parse {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Loaded post with `id`, if present.
	pub fn post(&self, id: PostId) -> Option<&PostRecord> {
		self.posts.iter().filter_map(StreamEntry::as_post).find(|post| post.id == id)
	}
}
