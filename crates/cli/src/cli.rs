//! CLI schema for the threadview binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "threadview")]
#[command(about = "Render a topic's post stream without a browser")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Render a topic file to stdout
	Render(RenderArgs),
}

/// Arguments for `threadview render`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
	/// Topic JSON file (posts, gaps, filter, current user)
	#[arg(long, value_name = "PATH")]
	pub topic: PathBuf,

	/// Stream options as TOML
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Force testing mode (disables cloaking)
	#[arg(long)]
	pub testing: bool,

	/// Cloak the post with this id before rendering (repeatable)
	#[arg(long = "cloak", value_name = "ID")]
	pub cloak: Vec<u64>,

	/// Highlight this search term in posts
	#[arg(long, value_name = "TERM")]
	pub highlight: Option<String>,

	/// Render for a mobile viewport
	#[arg(long)]
	pub mobile: bool,

	/// Output format
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

/// How rendered items are written.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
	/// One line per item
	#[default]
	Text,
	/// Items, stats, and failures as a JSON document
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_accepts_repeated_cloak_flags() {
		let cli = Cli::try_parse_from(["threadview", "-v", "render", "--topic", "t.json", "--cloak", "3", "--cloak", "7", "--format", "json"])
			.expect("parse");
		assert!(cli.verbose);
		let Command::Render(args) = cli.command;
		assert_eq!(args.topic, PathBuf::from("t.json"));
		assert_eq!(args.cloak, vec![3, 7]);
		assert_eq!(args.format, OutputFormat::Json);
		assert!(!args.mobile);
	}

	#[test]
	fn topic_is_required() {
		assert!(Cli::try_parse_from(["threadview", "render"]).is_err());
	}
}
