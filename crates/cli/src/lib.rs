#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Headless post stream rendering.
//!
//! Loads a topic file and stream options, replays cloak requests against a
//! [`HeadlessHost`], and writes the rendered item list as text or JSON.

pub mod cli;
pub mod format;
pub mod host;
pub mod topic;

use std::time::Instant;

use anyhow::Context;
use threadview_primitives::PostId;
use threadview_stream::{PostStream, RenderOutput, StreamConfig, ViewContext};
use tracing::{info, warn};

pub use cli::{Cli, Command, OutputFormat, RenderArgs};
pub use host::HeadlessHost;
pub use topic::{TopicError, TopicFile};

/// Resolves stream options from `--config` and command-line overrides.
pub fn load_config(args: &RenderArgs) -> anyhow::Result<StreamConfig> {
	let mut config = match &args.config {
		Some(path) => StreamConfig::load(path).with_context(|| format!("loading stream config from {}", path.display()))?,
		None => StreamConfig::default(),
	};
	if args.testing {
		config.testing = true;
	}
	Ok(config)
}

/// Renders the topic named by `args`, returning the stream output and host.
pub fn render_topic(args: &RenderArgs) -> anyhow::Result<(RenderOutput, HeadlessHost)> {
	let config = load_config(args)?;
	let topic = TopicFile::load(&args.topic)?;
	info!(
		topic = %args.topic.display(),
		entries = topic.posts.len(),
		cloaking = config.cloaking_active(),
		"rendering topic"
	);

	let mut stream = PostStream::new(config);
	let mut host = HeadlessHost::default();

	let now = Instant::now();
	for &id in &args.cloak {
		match topic.post(PostId(id)) {
			Some(post) => {
				stream.cloak(post, &mut host, now);
			}
			None => warn!(post_id = id, "cannot cloak a post that is not loaded"),
		}
	}
	stream.poll_rerender(now + config.debounce(), &mut host);

	let view = ViewContext {
		current_user: topic.current_user.as_ref(),
		mobile_view: args.mobile,
		can_create_post: topic.can_create_post,
		highlight_term: args.highlight.as_deref(),
		..ViewContext::new()
	};
	let output = stream.render(&topic.posts, &topic.gaps, &view, &topic.filter)?;
	for failure in &output.failures {
		warn!(error = %failure, "post dropped from render");
	}

	stream.teardown();
	Ok((output, host))
}

/// Runs `threadview render` and returns what it prints.
pub fn run_render(args: &RenderArgs) -> anyhow::Result<String> {
	let (output, _host) = render_topic(args)?;
	let rendered = match args.format {
		OutputFormat::Text => format::text(&output)?,
		OutputFormat::Json => format::json(&output)?,
	};
	Ok(rendered)
}

/// Installs the stderr subscriber.
///
/// `THREADVIEW_LOG` takes precedence over `RUST_LOG`; without either, `verbose`
/// picks between trace output for the stream core and warnings only.
pub fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("THREADVIEW_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("threadview_stream=trace,threadview_cli=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}
