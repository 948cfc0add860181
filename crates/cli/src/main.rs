//! Threadview binary.

use clap::Parser;
use threadview_cli::{Cli, Command, run_render, setup_tracing};
// Library dependencies are linked through threadview_cli.
#[allow(unused_imports, reason = "silences unused_crate_dependencies for the binary target")]
use {serde as _, serde_json as _, thiserror as _, threadview_primitives as _, threadview_stream as _, tracing as _, tracing_subscriber as _};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Render(args) => {
			let rendered = run_render(&args)?;
			print!("{rendered}");
		}
	}
	Ok(())
}
