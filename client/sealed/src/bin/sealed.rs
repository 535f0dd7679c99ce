/*
 * Copyright 2025 by Ideal Labs, LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! `sealed`: commitments, round arithmetic and timelocks from the command line.
//!
//! Logging is configured through `RUST_LOG`.

use clap::{Parser, Subcommand};
use sc_sealed_client::Error;
use sp_sealed_primitives::{
	encoding::{decode_hex, encode_hex, parse_round},
	BeaconConfig, KeyCommitment, RevealSecrets, RoundNumber, TimelockBeaconCodec, UnixSeconds,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_TARGET: &str = "sealed";

#[derive(Parser, Debug)]
#[command(author, version, about = "Key commitments and drand timelocks for sealed listings")]
struct Cli {
	/// A drand chain info JSON file (as served at `/info`). Defaults to quicknet.
	#[arg(long, global = true)]
	beacon_info: Option<PathBuf>,
	#[command(subcommand)]
	cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
	/// Generate a fresh key and salt and print their commitment.
	Generate,
	/// Commit to a 32 byte key and salt.
	Commit {
		#[arg(long)]
		key: String,
		#[arg(long)]
		salt: String,
	},
	/// Check a revealed key and salt against a commitment.
	Verify {
		#[arg(long)]
		key: String,
		#[arg(long)]
		salt: String,
		#[arg(long)]
		commitment: String,
	},
	/// The beacon round in effect at a unix timestamp.
	Round {
		#[arg(long, value_parser = decimal_arg)]
		timestamp: UnixSeconds,
	},
	/// The unix timestamp at which a round is published.
	Timestamp {
		#[arg(long, value_parser = decimal_arg)]
		round: RoundNumber,
	},
	/// XOR a secret with the round keystream. Offers no timelock security.
	Lock {
		#[arg(long)]
		secret: String,
		#[arg(long, value_parser = decimal_arg)]
		round: RoundNumber,
	},
	/// Inverse of `lock`.
	Unlock {
		#[arg(long)]
		ciphertext: String,
		#[arg(long, value_parser = decimal_arg)]
		round: RoundNumber,
	},
	/// Encrypt a secret so it opens only with the beacon signature for a round.
	Seal {
		#[arg(long)]
		secret: String,
		#[arg(long, value_parser = decimal_arg)]
		round: RoundNumber,
	},
	/// Open a sealed secret with the round's published signature.
	Open {
		#[arg(long)]
		ciphertext: String,
		#[arg(long, value_parser = decimal_arg)]
		round: RoundNumber,
		#[arg(long)]
		signature: String,
	},
}

/// Plain decimal digits only, for rounds and timestamps alike
fn decimal_arg(value: &str) -> Result<u64, String> {
	parse_round(value).map_err(|e| e.to_string())
}

fn load_codec(beacon_info: Option<&PathBuf>) -> Result<TimelockBeaconCodec, Error> {
	let Some(path) = beacon_info else {
		return Ok(TimelockBeaconCodec::quicknet());
	};
	let json = std::fs::read_to_string(path)
		.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
	let config: BeaconConfig =
		serde_json::from_str(&json).map_err(|e| Error::Config(e.to_string()))?;
	log::debug!(target: LOG_TARGET, "Loaded beacon {:?}", config.metadata.beacon_id);
	Ok(TimelockBeaconCodec::new(config)?)
}

fn run(cli: Cli) -> Result<String, Error> {
	let codec = load_codec(cli.beacon_info.as_ref())?;

	let out = match cli.cmd {
		Cmd::Generate => {
			let secrets = RevealSecrets::generate(&mut rand::rngs::OsRng);
			format!(
				"key: {}\nsalt: {}\ncommitment: {}",
				secrets.key.to_hex(),
				secrets.salt.to_hex(),
				secrets.commitment()
			)
		},
		Cmd::Commit { key, salt } =>
			encode_hex(&KeyCommitment::commit(&decode_hex(&key)?, &decode_hex(&salt)?)?),
		Cmd::Verify { key, salt, commitment } => KeyCommitment::verify(
			&decode_hex(&key)?,
			&decode_hex(&salt)?,
			&decode_hex(&commitment)?,
		)
		.to_string(),
		Cmd::Round { timestamp } => codec.round_for_timestamp(timestamp)?.to_string(),
		Cmd::Timestamp { round } => codec.timestamp_for_round(round).to_string(),
		Cmd::Lock { secret, round } => encode_hex(&codec.lock(&decode_hex(&secret)?, round)),
		Cmd::Unlock { ciphertext, round } =>
			encode_hex(&codec.unlock(&decode_hex(&ciphertext)?, round)),
		Cmd::Seal { secret, round } => {
			if !codec.is_round_reached_now(round) {
				log::info!(
					target: LOG_TARGET,
					"Round {} is published at {}",
					round,
					codec.timestamp_for_round(round)
				);
			}
			encode_hex(&codec.seal_encoded(&decode_hex(&secret)?, round, &mut rand::rngs::OsRng)?)
		},
		Cmd::Open { ciphertext, round, signature } => encode_hex(&codec.open_encoded(
			&decode_hex(&ciphertext)?,
			round,
			&decode_hex(&signature)?,
		)?),
	};
	Ok(out)
}

fn main() -> Result<(), Error> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let out = run(Cli::parse())?;
	println!("{}", out);
	Ok(())
}
