// crates.io
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to read CSV file {path}: {source}")]
	Csv {
		path: String,
		#[source]
		source: csv::Error,
	},
	#[error(
		"invalid file content, line {line} has wrong number of columns {found}, expected {expected} columns"
	)]
	ColumnCount { line: u64, found: usize, expected: usize },
	#[error("bad input value {value} for {name} (expected an integer value): {source}")]
	InvalidAmount {
		name: String,
		value: String,
		#[source]
		source: std::num::ParseIntError,
	},
	#[error("failed to write transactions batch to {path}: {source}")]
	Write {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[cfg(test)]
	#[error("failed to read transactions batch from {path}: {source}")]
	Read {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	// crates.io
	use rstest::rstest;
	// devdrop
	use super::*;

	#[rstest]
	#[case::column_count(
		Error::ColumnCount { line: 3, found: 2, expected: 3 },
		"invalid file content, line 3 has wrong number of columns 2, expected 3 columns"
	)]
	#[case::invalid_amount(
		Error::InvalidAmount {
			name: "photon count".into(),
			value: "abc".into(),
			source: "abc".parse::<i64>().unwrap_err(),
		},
		"bad input value abc for photon count (expected an integer value): invalid digit found in string"
	)]
	fn display(#[case] error: Error, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}
}
