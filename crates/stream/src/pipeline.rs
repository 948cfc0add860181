//! Externally registered post transforms.
//!
//! Other subsystems decorate posts by registering named callbacks. Each one
//! takes the record produced by the previous step and returns a new one, so
//! the whole chain is a fold in registration order: later callbacks win on
//! shared keys. Registration is append-only.

use std::fmt;

use threadview_primitives::PostId;
use tracing::trace;

use crate::error::{CallbackError, StreamError};
use crate::transform::TransformedPost;

/// A single transform step.
pub type TransformCallback = Box<dyn Fn(TransformedPost) -> Result<TransformedPost, CallbackError>>;

struct NamedCallback {
	name: String,
	apply: TransformCallback,
}

/// Ordered list of registered transform callbacks.
#[derive(Default)]
pub struct TransformPipeline {
	callbacks: Vec<NamedCallback>,
}

impl TransformPipeline {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a callback to the end of the chain.
	pub fn add<F>(&mut self, name: impl Into<String>, callback: F)
	where
		F: Fn(TransformedPost) -> Result<TransformedPost, CallbackError> + 'static,
	{
		let name = name.into();
		trace!(callback = %name, position = self.callbacks.len(), "transform callback registered");
		self.callbacks.push(NamedCallback {
			name,
			apply: Box::new(callback),
		});
	}

	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	/// Registered callback names, in application order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.callbacks.iter().map(|cb| cb.name.as_str())
	}

	/// Folds `post` through every callback.
	///
	/// Stops at the first failing callback and reports it against `post`.
	pub fn apply(&self, post: TransformedPost) -> Result<TransformedPost, StreamError> {
		let post_id: PostId = post.id;
		self.callbacks.iter().try_fold(post, |post, cb| {
			(cb.apply)(post).map_err(|source| StreamError::CallbackFailure {
				post_id,
				callback: cb.name.clone(),
				source,
			})
		})
	}
}

impl fmt::Debug for TransformPipeline {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}
