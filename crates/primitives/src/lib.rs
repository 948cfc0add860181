//! Core types for post streams: identifiers, post records, gaps, and filters.
//!
//! Everything here is read-only input to the stream renderer. Records are
//! fetched and owned elsewhere; the renderer only ever borrows them.

/// Stream filter descriptors.
pub mod filter;
/// Known-missing post runs adjacent to loaded posts.
pub mod gaps;
/// Identifier types for posts and users.
pub mod ids;
/// Post records and stream entries.
pub mod post;
/// The viewing user.
pub mod user;

pub use filter::FilterDescriptor;
pub use gaps::{GapMap, GapPosition};
pub use ids::{PostId, PostNumber, UserId};
pub use post::{Author, PostRecord, PostType, StreamEntry};
pub use user::CurrentUser;
