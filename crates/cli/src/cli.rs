use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use hostscope_registry::Identity;

#[derive(Parser, Debug)]
#[command(name = "hostscope")]
#[command(about = "Query host class exposure and inherited constants per runtime identity")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging (repeat for trace output)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Catalogue and feature table inputs.
#[derive(Args, Debug)]
pub struct Source {
	/// Catalogue file (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub catalogue: PathBuf,

	/// Feature table file (TOML); every flag is disabled when omitted
	#[arg(long, short = 'f', value_name = "PATH")]
	pub features: Option<PathBuf>,
}

/// Inputs for a query against one identity.
#[derive(Args, Debug)]
pub struct Query {
	#[command(flatten)]
	pub source: Source,

	/// Runtime identity, e.g. chrome-120, chrome-120.0.6099.109 or ff-esr-115
	#[arg(long, short = 'i', value_name = "IDENTITY")]
	pub identity: Identity,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the constants a class exposes, one NAME:value per line
	Resolve {
		#[command(flatten)]
		query: Query,
		/// Class name
		class: String,
		/// Emit JSON including the declaring class of each constant
		#[arg(long)]
		json: bool,
	},
	/// Print whether a class is exposed
	Exposed {
		#[command(flatten)]
		query: Query,
		/// Class name
		class: String,
	},
	/// List exposed host object classes
	Classes {
		#[command(flatten)]
		query: Query,
		/// Include metadata-only classes
		#[arg(long)]
		all: bool,
	},
	/// Print a class's inheritance walk
	Chain {
		#[command(flatten)]
		query: Query,
		/// Class name
		class: String,
	},
	/// Validate a catalogue (and feature table) without querying
	Check {
		#[command(flatten)]
		source: Source,
	},
}
