//! Error types for stream rendering and configuration.

use std::path::PathBuf;

use thiserror::Error;
use threadview_primitives::{PostId, PostNumber};

/// Errors surfaced by a render pass.
#[derive(Debug, Error)]
pub enum StreamError {
	/// A replies filter points at a post that is not in the stream.
	#[error("source post #{post_number} for the replies filter is not in the stream")]
	MissingSourcePost {
		/// Post number named by the filter.
		post_number: PostNumber,
	},

	/// A registered transform callback rejected a post.
	///
	/// Only the affected post is dropped from the render pass.
	#[error("transform callback `{callback}` failed for post {post_id}: {source}")]
	CallbackFailure {
		/// Post whose transformation was aborted.
		post_id: PostId,
		/// Name the callback was registered under.
		callback: String,
		/// Error returned by the callback.
		source: CallbackError,
	},
}

/// Error returned by a transform callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CallbackError(pub String);

impl CallbackError {
	pub fn new(reason: impl Into<String>) -> Self {
		Self(reason.into())
	}
}

/// Errors that can occur when loading stream configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value is syntactically valid but unusable.
	#[error("invalid value for `{key}`: {reason}")]
	Invalid {
		/// Config key.
		key: &'static str,
		/// What is wrong with it.
		reason: String,
	},
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, StreamError>;
