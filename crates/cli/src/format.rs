//! Output writers for rendered streams.

use std::fmt::{self, Write};

use serde_json::json;
use threadview_stream::{FilterOverlay, GapMarker, OverlayMessage, PostItem, RenderItem, RenderOutput, SmallActionItem};

/// Writes one line per item, followed by a stats footer.
pub fn text(output: &RenderOutput) -> Result<String, fmt::Error> {
	let mut out = String::new();
	for item in &output.items {
		match item {
			RenderItem::Placeholder => writeln!(out, "  ...")?,
			RenderItem::Gap(gap) => write_gap(&mut out, gap)?,
			RenderItem::TimeGap(marker) => writeln!(out, "  --- {} days later ---", marker.days_since)?,
			RenderItem::Post(item) => write_post(&mut out, item)?,
			RenderItem::SmallAction(item) => write_small_action(&mut out, item)?,
			RenderItem::FilteredReplies(overlay) => write_overlay(&mut out, overlay)?,
		}
	}

	let stats = &output.stats;
	writeln!(
		out,
		"\n{} posts, {} small actions, {} placeholders, {} gaps, {} time gaps, {} cloaked, {} failed",
		stats.posts, stats.small_actions, stats.placeholders, stats.gaps, stats.time_gaps, stats.cloaked, stats.failed
	)?;
	Ok(out)
}

/// Items, stats, and failure messages as one JSON document.
pub fn json(output: &RenderOutput) -> serde_json::Result<String> {
	let failures: Vec<String> = output.failures.iter().map(ToString::to_string).collect();
	serde_json::to_string_pretty(&json!({
		"items": output.items,
		"stats": output.stats,
		"failures": failures,
	}))
}

fn write_gap(out: &mut String, gap: &GapMarker) -> fmt::Result {
	writeln!(out, "  [{} hidden posts {} post {}]", gap.missing.len(), gap.position.as_str(), gap.post_id)
}

fn write_post(out: &mut String, item: &PostItem) -> fmt::Result {
	let post = &item.post;
	write!(out, "#{} @{} {}", post.post_number, post.author.username, post.created_at.format("%Y-%m-%d %H:%M"))?;
	if post.show_reply_to
		&& let Some(target) = post.reply_to_post_number
	{
		write!(out, " (reply to #{target})")?;
	}
	if item.show_read_indicator {
		out.push_str(" [read-indicator]");
	}
	if post.cloaked {
		match post.height {
			Some(height) => writeln!(out, " [cloaked {height}px]")?,
			None => writeln!(out, " [cloaked]")?,
		}
		return Ok(());
	}
	out.push('\n');
	for line in post.cooked.lines().filter(|line| !line.trim().is_empty()) {
		writeln!(out, "    {}", line.trim())?;
	}
	Ok(())
}

fn write_small_action(out: &mut String, item: &SmallActionItem) -> fmt::Result {
	let action = item.action_code.as_deref().unwrap_or("action");
	write!(out, "  * {action} by @{} {}", item.author.username, item.created_at.format("%Y-%m-%d"))?;
	if item.cloaked {
		out.push_str(" [cloaked]");
	}
	out.push('\n');
	Ok(())
}

fn write_overlay(out: &mut String, overlay: &FilterOverlay) -> fmt::Result {
	write!(out, "== {}", english(&overlay.message()))?;
	if let Some(author) = overlay.author() {
		write!(out, " @{}", author.username)?;
	}
	out.push_str(" ==\n");
	for action in overlay.actions() {
		writeln!(out, "   > {}", english(&action.label()))?;
	}
	Ok(())
}

/// English rendering of overlay message keys.
fn english(message: &OverlayMessage) -> String {
	let param = |name: &str| message.get(name).unwrap_or("?");
	match message.key {
		"post.filtered_replies.viewing" => format!("viewing {} replies to", param("reply_count")),
		"post.filtered_replies.viewing_summary" => "viewing summary".to_string(),
		"post.filtered_replies.viewing_posts_by" => format!("viewing {} posts by", param("post_count")),
		"post.filtered_replies.post_number" => format!("@{} #{}", param("username"), param("post_number")),
		"post.filtered_replies.show_all" => "show all".to_string(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use threadview_primitives::{PostId, PostNumber, PostRecord};
	use threadview_stream::{RenderStats, ViewContext, transform};

	use super::*;

	#[test]
	fn read_indicator_flag_is_labelled_as_such() {
		let record = PostRecord::new(PostId(1), PostNumber(1), Default::default(), "alice");
		let output = RenderOutput {
			items: vec![RenderItem::Post(Box::new(PostItem {
				post: transform(&ViewContext::new(), &record, None, None),
				show_read_indicator: true,
			}))],
			failures: Vec::new(),
			stats: RenderStats::default(),
		};

		let rendered = text(&output).expect("format");
		assert!(rendered.starts_with("#1 @alice 1970-01-01 00:00 [read-indicator]\n"), "{rendered}");
		assert!(!rendered.contains("unread"));
	}

	#[test]
	fn unknown_message_key_is_echoed() {
		let message = OverlayMessage {
			key: "post.something_else",
			params: Vec::new(),
		};
		assert_eq!(english(&message), "post.something_else");
	}

	#[test]
	fn reply_message_interpolates_count() {
		let message = OverlayMessage {
			key: "post.filtered_replies.viewing",
			params: vec![("reply_count", "3".into())],
		};
		assert_eq!(english(&message), "viewing 3 replies to");
	}
}
