// std
use std::env;

/// Values the batch is built from, taken from the process environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
	pub safe_address: String,
	pub dev_drop_factory: String,
	pub photon_id: String,
	pub orb_id: String,
}
impl Config {
	pub fn from_env() -> Self {
		Self::from_lookup(|k| env::var(k).ok())
	}

	/// Missing keys become empty strings.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |k: &str| lookup(k).unwrap_or_default();

		Self {
			safe_address: get("SafeAddress"),
			dev_drop_factory: get("DevDropFactory"),
			photon_id: get("PhotonId"),
			orb_id: get("OrbId"),
		}
	}
}

/// Seed the environment from a local `.env` file, if there is one.
pub fn load_env_file() {
	if let Err(e) = dotenvy::dotenv() {
		tracing::warn!("error loading .env file: {e}");
	}
}
