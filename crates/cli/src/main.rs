//! Hostscope command-line front end.
//!
//! Loads a catalogue (and optionally a feature table), builds the registry for one
//! runtime identity, and answers exposure and constant queries against it.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing::debug;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);
	debug!(command = ?cli.command, "starting hostscope");

	let stdout = std::io::stdout();
	commands::run(&cli.command, &mut stdout.lock())
}

fn setup_tracing(verbose: u8) {
	use tracing_subscriber::EnvFilter;

	// HOSTSCOPE_LOG takes precedence over RUST_LOG and the -v flags.
	let filter = std::env::var("HOSTSCOPE_LOG")
		.ok()
		.and_then(|directives| EnvFilter::try_new(directives).ok())
		.or_else(|| EnvFilter::try_from_default_env().ok())
		.unwrap_or_else(|| match verbose {
			0 => EnvFilter::new("warn"),
			1 => EnvFilter::new("hostscope_registry=debug,info"),
			_ => EnvFilter::new("hostscope_registry=trace,hostscope_cli=trace,debug"),
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
