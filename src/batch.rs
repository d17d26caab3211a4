//! Safe transaction builder batch format.

// std
use std::{fs, path::Path, sync::LazyLock};
// crates.io
use chrono::Utc;
use serde::{Deserialize, Serialize};
// devdrop
use crate::error::{Error, Result};

const DEFAULT_VERSION: &str = "1.0";
// Mode mainnet.
const DEFAULT_CHAIN_ID: &str = "34443";
const TX_BUILDER_VERSION: &str = "1.16.5";
const CHECKSUM: &str = "0x91049de6874cc7eb4591c73bcb84442deb9933cd487c0b75006b496fbfa492c7";

/// `safeTransferFrom(address,address,uint256,uint256,bytes)`.
static SAFE_TRANSFER_FROM: LazyLock<ContractMethod> = LazyLock::new(|| ContractMethod {
	inputs: [
		("address", "from"),
		("address", "to"),
		("uint256", "id"),
		("uint256", "amount"),
		("bytes", "data"),
	]
	.into_iter()
	.map(|(ty, name)| Input { internal_type: ty.into(), name: name.into(), r#type: ty.into() })
	.collect(),
	name: "safeTransferFrom".into(),
	payable: false,
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsBatch {
	pub version: String,
	pub chain_id: String,
	pub created_at: i64,
	pub meta: Meta,
	pub transactions: Vec<Transaction>,
}
impl TransactionsBatch {
	/// Empty `version` and `chain_id` fall back to the defaults.
	pub fn new(version: &str, chain_id: &str, safe_address: &str) -> Self {
		Self {
			version: or_default(version, DEFAULT_VERSION),
			chain_id: or_default(chain_id, DEFAULT_CHAIN_ID),
			created_at: Utc::now().timestamp(),
			meta: Meta {
				name: "Transactions Batch".into(),
				description: String::new(),
				tx_builder_version: TX_BUILDER_VERSION.into(),
				created_from_safe_address: safe_address.into(),
				created_from_owner_address: String::new(),
				checksum: CHECKSUM.into(),
			},
			transactions: Vec::new(),
		}
	}

	pub fn push(&mut self, tx: Transaction) {
		self.transactions.push(tx);
	}

	#[cfg(test)]
	pub fn load<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let bytes =
			fs::read(path).map_err(|source| Error::Read { path: path.display().to_string(), source })?;

		Ok(serde_json::from_slice(&bytes)?)
	}

	pub fn save<P>(&self, path: P) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let json = serde_json::to_vec_pretty(self)?;

		fs::write(path, json).map_err(|source| Error::Write { path: path.display().to_string(), source })
	}
}

fn or_default(value: &str, default: &str) -> String {
	let v = if value.is_empty() { default } else { value };

	v.to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
	pub name: String,
	pub description: String,
	pub tx_builder_version: String,
	pub created_from_safe_address: String,
	pub created_from_owner_address: String,
	pub checksum: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	pub to: String,
	pub value: String,
	#[serde(with = "hex_bytes")]
	pub data: Option<Vec<u8>>,
	pub contract_method: ContractMethod,
	pub contract_inputs_values: ContractInputs,
}
impl Transaction {
	/// A zero-value `safeTransferFrom` call on `to`, encoded by the builder from `inputs`.
	pub fn safe_transfer_from(to: &str, inputs: ContractInputs) -> Self {
		Self {
			to: to.into(),
			value: "0".into(),
			data: None,
			contract_method: SAFE_TRANSFER_FROM.clone(),
			contract_inputs_values: inputs,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
	pub inputs: Vec<Input>,
	pub name: String,
	pub payable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
	pub internal_type: String,
	pub name: String,
	pub r#type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInputs {
	pub from: String,
	pub to: String,
	pub id: String,
	pub amount: String,
	pub data: String,
}

// Raw call data as `0x` hex, `null` if absent.
mod hex_bytes {
	// crates.io
	use serde::{de::Error, Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match data {
			Some(d) => serializer.serialize_str(&array_bytes::bytes2hex("0x", d)),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
	where
		D: Deserializer<'de>,
	{
		<Option<String>>::deserialize(deserializer)?
			.map(|h| {
				array_bytes::hex2bytes(&h).map_err(|e| D::Error::custom(format!("{e:?}: {h}")))
			})
			.transpose()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use rstest::rstest;
	use serde_json::json;
	// devdrop
	use super::*;

	fn inputs() -> ContractInputs {
		ContractInputs {
			from: "0xSafe".into(),
			to: "0xABC".into(),
			id: "1".into(),
			amount: "5".into(),
			data: "0x00".into(),
		}
	}

	#[rstest]
	#[case::defaults("", "", "1.0", "34443")]
	#[case::explicit_version("2.0", "", "2.0", "34443")]
	#[case::explicit_chain_id("", "1", "1.0", "1")]
	#[case::explicit_both("3.1", "919", "3.1", "919")]
	fn new_batch_should_default_empty_fields(
		#[case] version: &str,
		#[case] chain_id: &str,
		#[case] expected_version: &str,
		#[case] expected_chain_id: &str,
	) {
		let batch = TransactionsBatch::new(version, chain_id, "0xSafe");

		assert_eq!(batch.version, expected_version);
		assert_eq!(batch.chain_id, expected_chain_id);
		assert_eq!(batch.meta.created_from_safe_address, "0xSafe");
		assert_eq!(batch.meta.checksum, CHECKSUM);
		assert!(batch.transactions.is_empty());
	}

	#[test]
	fn created_at_should_be_now() {
		let before = Utc::now().timestamp();
		let batch = TransactionsBatch::new("", "", "");
		let after = Utc::now().timestamp();

		assert!((before..=after).contains(&batch.created_at));
	}

	#[test]
	fn safe_transfer_from_should_use_fixed_descriptor() {
		let tx = Transaction::safe_transfer_from("0xFactory", inputs());

		assert_eq!(tx.to, "0xFactory");
		assert_eq!(tx.value, "0");
		assert_eq!(tx.data, None);
		assert_eq!(tx.contract_method.name, "safeTransferFrom");
		assert!(!tx.contract_method.payable);
		assert_eq!(
			tx.contract_method.inputs.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
			["from", "to", "id", "amount", "data"]
		);
		assert_eq!(tx.contract_inputs_values, inputs());
	}

	#[test]
	fn transaction_json_should_match_tx_builder_format() {
		let tx = Transaction::safe_transfer_from("0xFactory", inputs());

		assert_eq!(
			serde_json::to_value(&tx).unwrap(),
			json!({
				"to": "0xFactory",
				"value": "0",
				"data": null,
				"contractMethod": {
					"inputs": [
						{ "internalType": "address", "name": "from", "type": "address" },
						{ "internalType": "address", "name": "to", "type": "address" },
						{ "internalType": "uint256", "name": "id", "type": "uint256" },
						{ "internalType": "uint256", "name": "amount", "type": "uint256" },
						{ "internalType": "bytes", "name": "data", "type": "bytes" }
					],
					"name": "safeTransferFrom",
					"payable": false
				},
				"contractInputsValues": {
					"from": "0xSafe",
					"to": "0xABC",
					"id": "1",
					"amount": "5",
					"data": "0x00"
				}
			})
		);
	}

	#[test]
	fn empty_batch_should_serialize_transactions_as_array() {
		let value = serde_json::to_value(TransactionsBatch::new("", "", "0xSafe")).unwrap();

		assert_eq!(value["transactions"], json!([]));
		assert_eq!(value["chainId"], "34443");
		assert_eq!(value["meta"]["txBuilderVersion"], "1.16.5");
		assert_eq!(value["meta"]["createdFromOwnerAddress"], "");
	}

	#[test]
	fn data_should_be_hex_when_present() {
		let mut tx = Transaction::safe_transfer_from("0xFactory", inputs());

		tx.data = Some(vec![0xf2, 0x42]);

		let value = serde_json::to_value(&tx).unwrap();

		assert_eq!(value["data"], "0xf242");
		assert_eq!(serde_json::from_value::<Transaction>(value).unwrap(), tx);
	}

	#[test]
	fn save_then_load_should_be_identical() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("batch.json");
		let mut batch = TransactionsBatch::new("", "", "0xSafe");

		batch.push(Transaction::safe_transfer_from("0xFactory", inputs()));
		batch.save(&path).unwrap();

		let json = std::fs::read_to_string(&path).unwrap();

		assert!(json.starts_with("{\n  \"version\": \"1.0\""));
		assert_eq!(TransactionsBatch::load(&path).unwrap(), batch);
	}

	#[test]
	fn load_missing_file_should_fail() {
		let dir = tempfile::tempdir().unwrap();

		assert!(matches!(
			TransactionsBatch::load(dir.path().join("missing.json")),
			Err(Error::Read { .. })
		));
	}
}
