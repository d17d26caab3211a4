// std
use std::{fs, path::Path};
// crates.io
use csv::{ReaderBuilder, Trim};
// devdrop
use crate::{
	batch::{ContractInputs, Transaction, TransactionsBatch},
	config::Config,
	error::{Error, Result},
};

const COLUMN_COUNT: usize = 3;
// Extra data passed along with every `safeTransferFrom`.
const TRANSFER_DATA: &str = "0x00";

/// Load the data rows of a CSV file.
///
/// The header row is skipped and every remaining row must have exactly `column_count` fields.
/// Fields are trimmed.
pub fn load_csv<P>(path: P, column_count: usize) -> Result<Vec<Vec<String>>>
where
	P: AsRef<Path>,
{
	let path = path.as_ref();
	let csv_err = |source| Error::Csv { path: path.display().to_string(), source };
	let bytes = fs::read(path).map_err(|e| csv_err(e.into()))?;
	let mut rdr =
		ReaderBuilder::new().has_headers(true).flexible(true).trim(Trim::All).from_reader(&*bytes);
	let mut rows = Vec::new();

	for result in rdr.records() {
		let record = result.map_err(csv_err)?;

		if record.len() != column_count {
			return Err(Error::ColumnCount {
				line: record.position().map(|p| line_at(&bytes, p.byte())).unwrap_or_default(),
				found: record.len(),
				expected: column_count,
			});
		}

		rows.push(record.iter().map(ToOwned::to_owned).collect());
	}

	Ok(rows)
}

// 1-based line of the first content byte at or after `offset`, whatever the line endings.
fn line_at(bytes: &[u8], offset: u64) -> u64 {
	let start = (offset as usize).min(bytes.len());
	let content = bytes[start..]
		.iter()
		.position(|b| !matches!(b, b'\r' | b'\n'))
		.map_or(bytes.len(), |i| start + i);

	bytes[..content].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

/// Make sure `value` is a base-10 `i64`.
pub fn validate_amount(value: &str, name: &str) -> Result<i64> {
	value.parse().map_err(|source| Error::InvalidAmount {
		name: name.into(),
		value: value.into(),
		source,
	})
}

/// Turn the `wallet,photons,orbs` list at `input` into a Safe transactions batch at `output`.
///
/// Every row yields a photon transfer and an orb transfer, each only if its amount is non-zero.
/// Nothing is written unless every row is valid.
pub fn generate<P, Q>(input: P, output: Q, config: &Config) -> Result<TransactionsBatch>
where
	P: AsRef<Path>,
	Q: AsRef<Path>,
{
	let input = input.as_ref();
	let rows = load_csv(input, COLUMN_COUNT)?;

	tracing::info!("loaded {} rows from {}", rows.len(), input.display());
	tracing::debug!("{rows:?}");

	let mut batch = TransactionsBatch::new("", "", &config.safe_address);

	for row in &rows {
		let [wallet, photon_count, orb_count] = &row[..] else {
			unreachable!("column count is checked by `load_csv`; qed");
		};
		let photons = validate_amount(photon_count, "photon count")?;
		let orbs = validate_amount(orb_count, "orb count")?;

		for (amount, count, id) in
			[(photons, photon_count, &config.photon_id), (orbs, orb_count, &config.orb_id)]
		{
			if amount == 0 {
				continue;
			}

			batch.push(Transaction::safe_transfer_from(
				&config.dev_drop_factory,
				ContractInputs {
					from: config.safe_address.clone(),
					to: wallet.clone(),
					id: id.clone(),
					amount: count.clone(),
					data: TRANSFER_DATA.into(),
				},
			));
		}
	}

	batch.save(output)?;

	Ok(batch)
}
