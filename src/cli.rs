// std
use std::path::PathBuf;
// crates.io
use anyhow::Result;
use clap::Parser;
// devdrop
use crate::{config, config::Config, dev_drop};

/// Build a Safe transactions batch for the dev drop from a CSV list of wallets and amounts.
#[derive(Debug, Parser)]
#[command(
	version = concat!(
		env!("CARGO_PKG_VERSION"),
		"-",
		env!("VERGEN_GIT_SHA"),
		"-",
		env!("VERGEN_CARGO_TARGET_TRIPLE"),
	),
	about,
	rename_all = "kebab",
)]
pub struct Cli {
	/// Path to the CSV file, `wallet,photons,orbs` per row after a header row.
	#[arg(value_name = "INPUT")]
	pub input: PathBuf,
	/// Path of the JSON batch to write.
	#[arg(value_name = "OUTPUT")]
	pub output: PathBuf,
}
impl Cli {
	pub fn run(&self) -> Result<()> {
		config::load_env_file();

		let batch = dev_drop::generate(&self.input, &self.output, &Config::from_env())?;

		tracing::info!(
			"wrote {} transactions to {}",
			batch.transactions.len(),
			self.output.display()
		);

		Ok(())
	}
}
