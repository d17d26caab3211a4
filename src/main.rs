mod batch;
mod cli;
mod config;
mod dev_drop;
mod error;

// crates.io
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
	color_eyre::install().map_err(|e| anyhow::anyhow!("{e}"))?;
	tracing_subscriber::fmt::init();
	cli::Cli::parse().run()?;

	Ok(())
}
